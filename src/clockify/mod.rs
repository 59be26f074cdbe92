//! Clockify REST API: wire types and the HTTP client.

mod client;
mod model;

pub use client::{ClockifyClient, PAGE_SIZE};
pub use model::{TimeEntryDto, TimeIntervalDto, UserDto, WorkspaceDto, into_raw_entries};
