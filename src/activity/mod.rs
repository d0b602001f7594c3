//! Voice and text activity accrual.
//!
//! Members present in a voice channel earn time-weighted activity credit that
//! is settled whenever the channel's membership changes, then converted into
//! experience when they leave. The module is layered leaf-first:
//!
//! - [`member_state::MemberActivityState`] - per-member accumulator
//! - [`channel_tracker::ChannelActivityTracker`] - settlement over one channel
//! - [`guild_tracker::GuildActivityTracker`] - idle-evicting channel cache
//! - [`service::ActivityService`] - event ingestion and storage flushes

pub mod channel_tracker;
pub mod guild_tracker;
pub mod member_state;
pub mod service;

#[cfg(test)]
mod test;
