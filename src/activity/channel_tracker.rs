use std::collections::HashMap;
use std::time::Instant;

use crate::activity::member_state::MemberActivityState;

/// Tracks the voice activity of every member present in one voice channel.
///
/// Every state-changing operation settles first: all tracked members are
/// credited for the interval since the previous settlement, weighted by the
/// number of concurrently speaking (non-frozen) members, before the change is
/// applied. The tracker carries no lock of its own; the owning
/// [`super::guild_tracker::GuildActivityTracker`] serializes access.
pub struct ChannelActivityTracker {
    states: HashMap<u64, MemberActivityState>,

    /// Upper bound on the speaker count used in the point formula; 0 = uncapped.
    max_speaking_members: u32,
}

impl ChannelActivityTracker {
    pub fn new(max_speaking_members: u32) -> Self {
        Self {
            states: HashMap::new(),
            max_speaking_members,
        }
    }

    /// Whether no members are currently tracked.
    ///
    /// An empty tracker is eligible for eviction from its guild cache.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Settles all members, then starts tracking `user_id`.
    pub fn add_member(&mut self, user_id: u64, frozen: bool) {
        self.add_member_at(user_id, frozen, Instant::now());
    }

    pub(crate) fn add_member_at(&mut self, user_id: u64, frozen: bool, now: Instant) {
        self.settle(now);
        self.states
            .insert(user_id, MemberActivityState::new(frozen, now));
    }

    /// Settles all members, then removes and returns `user_id`'s final state.
    ///
    /// Returns `None` if the member was not tracked. The caller owns the
    /// returned state and is responsible for flushing it.
    pub fn remove_member(&mut self, user_id: u64) -> Option<MemberActivityState> {
        self.remove_member_at(user_id, Instant::now())
    }

    pub(crate) fn remove_member_at(&mut self, user_id: u64, now: Instant) -> Option<MemberActivityState> {
        self.settle(now);
        self.states.remove(&user_id)
    }

    /// Settles all members, then updates `user_id`'s frozen flag.
    ///
    /// A no-op when the member is not tracked in this channel.
    pub fn freeze(&mut self, user_id: u64, frozen: bool) {
        self.freeze_at(user_id, frozen, Instant::now());
    }

    pub(crate) fn freeze_at(&mut self, user_id: u64, frozen: bool, now: Instant) {
        self.settle(now);
        if let Some(state) = self.states.get_mut(&user_id) {
            state.set_frozen(frozen);
        }
    }

    /// Credits every member for the interval since the last settlement.
    ///
    /// The speaker count is fixed at the start of the settlement so all
    /// members of the interval see the same weight, then every member's
    /// clock is re-based to `now` whether or not they were eligible.
    fn settle(&mut self, now: Instant) {
        let mut speaking_members = self
            .states
            .values()
            .filter(|state| !state.is_frozen())
            .count() as u64;

        if self.max_speaking_members > 0 {
            speaking_members = speaking_members.min(self.max_speaking_members as u64);
        }

        for state in self.states.values_mut() {
            state.accumulate(now, speaking_members);
        }
    }
}
