//! Rate-limited match history and match detail lookups

use crate::api::{FetchError, FetchResult, Identity, MatchApi, MatchDetail, MatchSummary};
use crate::crawler::limiter::RateLimiter;
use std::cmp::Reverse;
use std::sync::Arc;

/// Match client sharing one limiter across history and detail calls
pub struct MatchFetcher {
    api: Arc<dyn MatchApi>,
    limiter: RateLimiter,
}

impl MatchFetcher {
    pub fn new(api: Arc<dyn MatchApi>, limiter: RateLimiter) -> Self {
        Self { api, limiter }
    }

    /// Recent matches for a player, newest first
    ///
    /// A player unknown upstream has no history, so `NotFound` yields an empty
    /// list. Matches without a parseable finish time keep their upstream order
    /// after the dated ones.
    pub async fn history(&self, id: &Identity) -> FetchResult<Vec<MatchSummary>> {
        self.limiter.acquire().await;

        let mut matches = match self.api.match_history(id).await {
            Ok(matches) => matches,
            Err(FetchError::NotFound(_)) => {
                tracing::info!("No match history for {}", id);
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!("Failed to fetch match history for {}: {}", id, e);
                return Err(e);
            }
        };

        // Stable sort: None sorts below every timestamp under Reverse
        matches.sort_by_key(|m| Reverse(m.finished_at_utc()));

        tracing::debug!("Fetched {} matches for {}", matches.len(), id);
        Ok(matches)
    }

    /// Full roster for one match, or `None` if upstream does not know it
    pub async fn details(&self, match_id: &str) -> FetchResult<Option<MatchDetail>> {
        self.limiter.acquire().await;

        match self.api.match_details(match_id).await {
            Ok(detail) => {
                tracing::debug!(
                    "Fetched match {} ({} players)",
                    match_id,
                    detail.stats.len()
                );
                Ok(Some(detail))
            }
            Err(FetchError::NotFound(_)) => {
                tracing::info!("Match {} not found", match_id);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch match {}: {}", match_id, e);
                Err(e)
            }
        }
    }
}
