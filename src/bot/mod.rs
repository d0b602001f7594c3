//! Discord bot integration.
//!
//! Event handlers translate gateway events into calls on the activity
//! service and the guild repository; `start` wires up the serenity client.

pub mod handler;
pub mod start;
