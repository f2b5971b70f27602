/// Gathering scheduler state definitions
///
/// This module defines the scheduler's lifecycle states, the gathering modes an
/// operator can select, and the status snapshot handed out to callers.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which generator the background worker drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GatheringMode {
    /// Page through the banned-player directory
    Banned,

    /// Crawl the teammate network from a seed picked out of the store
    Random,
}

impl GatheringMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banned => "BANNED",
            Self::Random => "RANDOM",
        }
    }
}

impl fmt::Display for GatheringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GatheringMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BANNED" => Ok(Self::Banned),
            "RANDOM" => Ok(Self::Random),
            _ => Err(format!("Invalid gathering mode '{}'. Use BANNED or RANDOM", s)),
        }
    }
}

/// Lifecycle of the single background worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchedulerState {
    /// No worker running
    Idle,

    /// Worker is looping over batches
    Running,

    /// Worker is still running but will exit at its next safe point
    StopRequested,
}

impl SchedulerState {
    /// True while a worker task exists (including one that is winding down)
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::StopRequested => "stop_requested",
        };
        f.write_str(s)
    }
}

/// Read-only snapshot of the gatherer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheringStatus {
    pub is_running: bool,
    pub state: SchedulerState,
    pub mode: GatheringMode,
    pub batch_size: u32,
    pub total_profiles_gathered: u64,
    /// Seconds since the current run started; 0 when idle
    pub uptime: u64,
}
