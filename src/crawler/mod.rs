//! Discovery engine
//!
//! This module contains the player discovery logic, including:
//! - Named per-resource rate limiting
//! - Cache-first profile resolution and match lookups
//! - The teammate network crawler and the banned-list pager
//! - The background gathering scheduler and component wiring

mod banned;
mod coordinator;
mod limiter;
mod matches;
mod network;
mod profiles;
mod scheduler;

pub use banned::BannedListPager;
pub use coordinator::{Coordinator, BANNED_LIST_LIMITER, MATCH_LIMITER, PROFILE_LIMITER};
pub use limiter::RateLimiter;
pub use matches::MatchFetcher;
pub use network::{NetworkCrawler, DEFAULT_MATCH_CANDIDATE_CAP};
pub use profiles::ProfileFetcher;
pub use scheduler::{ControlError, GatheringScheduler, MAX_BATCH_SIZE};
