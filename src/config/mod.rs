//! JSON configuration and file helpers for the `flag_events` tool.

pub mod flag_events;
pub mod io;
