use std::time::{Duration, Instant};

use crate::activity::channel_tracker::ChannelActivityTracker;
use crate::activity::guild_tracker::GuildActivityTracker;

mod guild_tracker;
mod service;

/// Shorthand for building a timeline of instants in tests.
fn at(base: Instant, millis: u64) -> Instant {
    base + Duration::from_millis(millis)
}
