use std::time::{Duration, Instant};

use crate::activity::channel_tracker::ChannelActivityTracker;
use crate::activity::member_state::MemberActivityState;
use crate::util::expiring::TtlCache;

/// Channel trackers are dropped after this long without any access.
pub const TRACKER_IDLE_TTL: Duration = Duration::from_secs(10 * 24 * 60 * 60);

/// Tracks voice activity across every active channel of one guild.
///
/// Channel trackers are created lazily on first join, removed explicitly when
/// their last member leaves, and swept by the idle TTL as a backstop for
/// trackers orphaned by missed leave events. The owning
/// [`super::service::ActivityService`] serializes access behind a per-guild
/// lock.
pub struct GuildActivityTracker {
    channels: TtlCache<u64, ChannelActivityTracker>,
    max_speaking_members: u32,
}

impl GuildActivityTracker {
    pub fn new(max_speaking_members: u32) -> Self {
        Self::with_idle_ttl(max_speaking_members, TRACKER_IDLE_TTL)
    }

    pub(crate) fn with_idle_ttl(max_speaking_members: u32, idle_ttl: Duration) -> Self {
        Self {
            channels: TtlCache::new(idle_ttl),
            max_speaking_members,
        }
    }

    /// Whether no channel trackers are currently cached.
    pub fn is_empty(&mut self) -> bool {
        self.channels.is_empty()
    }

    /// Starts tracking `user_id` in `channel_id`, creating the channel
    /// tracker if this is the first member.
    pub fn add_channel(&mut self, channel_id: u64, user_id: u64, frozen: bool) {
        self.add_channel_at(channel_id, user_id, frozen, Instant::now());
    }

    pub(crate) fn add_channel_at(&mut self, channel_id: u64, user_id: u64, frozen: bool, now: Instant) {
        let max_speaking = self.max_speaking_members;
        let tracker = self
            .channels
            .get_or_insert_with(channel_id, || ChannelActivityTracker::new(max_speaking));
        tracker.add_member_at(user_id, frozen, now);
    }

    /// Stops tracking `user_id` in `channel_id` and returns the settled state.
    ///
    /// The channel tracker is evicted from the cache the moment its member
    /// map becomes empty. Returns `None` when the channel or member was not
    /// tracked.
    pub fn remove_channel(&mut self, channel_id: u64, user_id: u64) -> Option<MemberActivityState> {
        self.remove_channel_at(channel_id, user_id, Instant::now())
    }

    pub(crate) fn remove_channel_at(
        &mut self,
        channel_id: u64,
        user_id: u64,
        now: Instant,
    ) -> Option<MemberActivityState> {
        let tracker = self.channels.get_mut(&channel_id)?;
        let state = tracker.remove_member_at(user_id, now);

        if tracker.is_empty() {
            self.channels.remove(&channel_id);
        }
        state
    }

    /// Applies a frozen-state change to `user_id` in every cached channel.
    ///
    /// A member is normally present in at most one channel per guild, so this
    /// broadcast acts as a tolerant no-op fan-out rather than a targeted
    /// lookup; channels that do not track the member ignore the call.
    pub fn freeze(&mut self, user_id: u64, frozen: bool) {
        self.freeze_at(user_id, frozen, Instant::now());
    }

    pub(crate) fn freeze_at(&mut self, user_id: u64, frozen: bool, now: Instant) {
        for tracker in self.channels.values_mut() {
            tracker.freeze_at(user_id, frozen, now);
        }
    }
}
