//! Upstream API clients
//!
//! This module contains everything that talks to third-party services:
//! - The Leetify profile and match endpoints
//! - The VacList banned-player directory
//! - HTTP client construction and response classification
//!
//! Each upstream resource sits behind a trait so the crawler can be driven by
//! in-memory fakes in tests.

mod client;
mod leetify;
mod types;
mod vaclist;

pub use client::build_http_client;
pub use leetify::LeetifyClient;
pub use types::{
    BanEntry, BannedListing, Identity, MatchDetail, MatchPlayerStats, MatchSummary, PlayerStats,
    Profile, Ranks, Rating, Teammate,
};
pub use vaclist::VaclistClient;

use async_trait::async_trait;
use thiserror::Error;

/// Outcome classification for a single upstream call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The upstream reports no such identity or match
    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx status, malformed body, or transport failure
    #[error("Upstream error (status {status:?}): {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// A 2xx response that carried no document
    #[error("Empty response for {0}")]
    ResponseEmpty(String),
}

impl FetchError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for upstream calls
pub type FetchResult<T> = Result<T, FetchError>;

/// Source of player profiles
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self, id: &Identity) -> FetchResult<Profile>;
}

/// Source of match history and match rosters
#[async_trait]
pub trait MatchApi: Send + Sync {
    /// Recent matches for a player
    async fn match_history(&self, id: &Identity) -> FetchResult<Vec<MatchSummary>>;

    /// Full detail for one match
    async fn match_details(&self, match_id: &str) -> FetchResult<MatchDetail>;
}

/// Source of banned-player candidates, paged from 0
#[async_trait]
pub trait BannedListApi: Send + Sync {
    async fn banned_page(&self, page: u32, page_size: u32) -> FetchResult<Vec<Identity>>;
}
