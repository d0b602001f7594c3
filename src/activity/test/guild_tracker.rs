use super::*;
use std::thread::sleep;

/// Tests that a channel tracker is evicted exactly when it empties.
///
/// Removing the last member must drop the channel tracker from the cache;
/// removing one of several must not.
///
/// Expected: guild empty only after the final member leaves
#[test]
fn channel_tracker_evicted_when_emptied() {
    let t0 = Instant::now();
    let mut guild = GuildActivityTracker::new(0);

    guild.add_channel_at(10, 1, false, t0);
    guild.add_channel_at(10, 2, false, t0);

    assert!(guild.remove_channel_at(10, 1, at(t0, 1_000)).is_some());
    assert!(!guild.is_empty());

    assert!(guild.remove_channel_at(10, 2, at(t0, 2_000)).is_some());
    assert!(guild.is_empty());
}

/// Tests removal against a channel that was never tracked.
///
/// Expected: None without creating a tracker
#[test]
fn remove_from_unknown_channel_returns_none() {
    let t0 = Instant::now();
    let mut guild = GuildActivityTracker::new(0);

    assert!(guild.remove_channel_at(10, 1, t0).is_none());
    assert!(guild.is_empty());
}

/// Tests that a freeze broadcast reaches the member's channel.
///
/// The broadcast touches every cached channel tracker; the one tracking the
/// member applies the flag, the others ignore it. Frozen time must not
/// accrue afterwards.
///
/// Expected: totals stop at the freeze instant
#[test]
fn freeze_broadcast_reaches_member_channel() {
    let t0 = Instant::now();
    let mut guild = GuildActivityTracker::new(0);

    guild.add_channel_at(10, 1, false, t0);
    guild.add_channel_at(10, 2, false, t0);
    guild.add_channel_at(20, 3, false, t0);

    guild.freeze_at(1, true, at(t0, 60_000));

    let state = guild.remove_channel_at(10, 1, at(t0, 120_000)).unwrap();

    assert_eq!(state.activity_time_millis(), 60_000);
}

/// Tests that idle channel trackers expire after the TTL with no access.
///
/// Expected: guild reports empty once the idle TTL elapses
#[test]
fn idle_channel_tracker_expires() {
    let mut guild = GuildActivityTracker::with_idle_ttl(0, Duration::from_millis(40));

    guild.add_channel(10, 1, false);
    assert!(!guild.is_empty());

    sleep(Duration::from_millis(60));

    assert!(guild.is_empty());
}
