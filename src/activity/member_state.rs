use std::time::Instant;

/// Points granted per minute of eligible presence, per concurrent speaker.
const POINT_RATE: f64 = 0.4;

/// Accumulated voice activity of a single member within one channel.
///
/// Created when the member joins the channel and consumed once when they
/// leave; the final values are flushed into storage and the state discarded.
/// All mutation happens under the owning tracker's lock, so plain fields are
/// sufficient.
#[derive(Debug, Clone)]
pub struct MemberActivityState {
    /// Total eligible time spent in the channel, in milliseconds.
    activity_time: u64,

    /// Activity points earned, weighted by concurrent speaker count.
    activity_points: f64,

    /// Settlement clock: the instant up to which this member has been credited.
    last_accumulated: Instant,

    frozen: bool,
}

impl MemberActivityState {
    pub(crate) fn new(frozen: bool, now: Instant) -> Self {
        Self {
            activity_time: 0,
            activity_points: 0.0,
            last_accumulated: now,
            frozen,
        }
    }

    pub fn activity_time_millis(&self) -> u64 {
        self.activity_time
    }

    pub fn activity_points(&self) -> f64 {
        self.activity_points
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Credits the elapsed interval and re-bases the settlement clock.
    ///
    /// The member earns credit only while not frozen and while at least two
    /// non-frozen members share the channel (`speaking_members > 1`). The
    /// clock is re-based to `now` unconditionally so that an ineligible
    /// interval can never be counted retroactively. `saturating_duration_since`
    /// keeps the elapsed time non-negative even against a stale clock.
    pub(crate) fn accumulate(&mut self, now: Instant, speaking_members: u64) {
        if !self.frozen && speaking_members > 1 {
            let elapsed = now.saturating_duration_since(self.last_accumulated);
            let millis = elapsed.as_millis() as u64;

            self.activity_time += millis;
            self.activity_points += millis as f64 / 60_000.0 * speaking_members as f64 * POINT_RATE;
        }

        self.last_accumulated = now;
    }

    /// Builds a state with preset totals, bypassing settlement.
    #[cfg(test)]
    pub(crate) fn with_totals(activity_time: u64, activity_points: f64) -> Self {
        Self {
            activity_time,
            activity_points,
            last_accumulated: Instant::now(),
            frozen: false,
        }
    }
}
