//! Cache-first profile resolution
//!
//! Resolution order:
//! 1. Profile store hit → returned as-is, no network call, no rate-limit permit
//! 2. Miss → wait for the `profile-api` limiter, then call upstream
//! 3. Upstream success → saved to the store (best-effort), then returned

use crate::api::{FetchResult, Identity, Profile, ProfileApi};
use crate::crawler::limiter::RateLimiter;
use crate::storage::ProfileStore;
use std::sync::Arc;

/// Rate-limited, store-backed profile client
pub struct ProfileFetcher {
    store: Arc<dyn ProfileStore>,
    api: Arc<dyn ProfileApi>,
    limiter: RateLimiter,
}

impl ProfileFetcher {
    pub fn new(store: Arc<dyn ProfileStore>, api: Arc<dyn ProfileApi>, limiter: RateLimiter) -> Self {
        Self {
            store,
            api,
            limiter,
        }
    }

    /// Turns an identity into a profile, consulting the store first
    ///
    /// # Returns
    ///
    /// * `Ok(Profile)` - Cached or freshly fetched profile
    /// * `Err(FetchError::NotFound)` - Upstream has no such player
    /// * `Err(FetchError::ResponseEmpty)` - Upstream answered 2xx without a body
    /// * `Err(FetchError::Upstream)` - Any other upstream or transport failure
    pub async fn resolve(&self, id: &Identity) -> FetchResult<Profile> {
        match self.store.find(id) {
            Ok(Some(profile)) => {
                tracing::debug!("Profile cache hit for {} ({})", id, profile.name);
                return Ok(profile);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Profile store lookup failed for {}: {}", id, e);
            }
        }

        self.limiter.acquire().await;

        let profile = match self.api.fetch_profile(id).await {
            Ok(profile) => profile,
            Err(e) if e.is_not_found() => {
                tracing::info!("Player {} not found upstream", id);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch profile for {}: {}", id, e);
                return Err(e);
            }
        };

        tracing::info!("Fetched profile for {} ({})", id, profile.name);

        if let Err(e) = self.store.save(&profile) {
            tracing::error!("Failed to save profile for {}: {}", id, e);
        }

        Ok(profile)
    }

    /// Whether the store already holds this identity
    ///
    /// Store failures count as "not cached" so the caller falls through to
    /// [`resolve`](Self::resolve), which re-checks the store anyway.
    pub fn is_cached(&self, id: &Identity) -> bool {
        match self.store.exists(id) {
            Ok(exists) => exists,
            Err(e) => {
                tracing::warn!("Profile store existence check failed for {}: {}", id, e);
                false
            }
        }
    }
}
