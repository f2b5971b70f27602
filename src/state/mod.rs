//! State module for tracking discovery progress
//!
//! # Components
//!
//! - `Frontier`: per-crawl queue plus visited/seen sets driving the BFS
//! - `SchedulerState`: lifecycle of the background gathering worker
//! - `GatheringMode` / `GatheringStatus`: operator-facing mode and status snapshot

mod frontier;
mod gathering_state;

// Re-export main types
pub use frontier::Frontier;
pub use gathering_state::{GatheringMode, GatheringStatus, SchedulerState};
