//! Banned-player directory pager
//!
//! Walks the listing page by page, resolving every candidate the store does
//! not already hold. The pager remembers where it stopped so the next pass
//! picks up from the same page instead of re-reading the head of the listing.

use crate::api::{BannedListApi, FetchError, FetchResult, Identity, Profile};
use crate::config::BannedConfig;
use crate::crawler::limiter::RateLimiter;
use crate::crawler::profiles::ProfileFetcher;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Per-page tallies, logged after each page
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PageTally {
    returned: usize,
    fresh: usize,
    collected: usize,
    not_found: usize,
    errors: usize,
}

/// Resumable pager over the banned-player listing
pub struct BannedListPager {
    profiles: Arc<ProfileFetcher>,
    api: Arc<dyn BannedListApi>,
    limiter: RateLimiter,
    page_size: u32,
    max_pages: u32,
    start_page: u32,
    cursor: AtomicU32,
}

impl BannedListPager {
    pub fn new(
        profiles: Arc<ProfileFetcher>,
        api: Arc<dyn BannedListApi>,
        limiter: RateLimiter,
        config: &BannedConfig,
    ) -> Self {
        Self {
            profiles,
            api,
            limiter,
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
            start_page: config.start_page,
            cursor: AtomicU32::new(config.start_page),
        }
    }

    /// Page the next pass will request first
    pub fn next_page(&self) -> u32 {
        self.cursor.load(Ordering::SeqCst)
    }

    /// Collects up to `target` profiles of banned players not yet in the store
    ///
    /// Ends at the target, on an empty page, on a failed listing request, or
    /// after `max-pages` page requests. A failed page keeps the cursor on that
    /// page and the profiles resolved so far are still returned.
    pub async fn gather_banned(&self, target: usize) -> Vec<Profile> {
        let mut profiles = Vec::new();
        if target == 0 {
            return profiles;
        }

        let mut page = self.next_page();
        tracing::info!(
            "Starting banned-list pass at page {} (target: {} profiles)",
            page,
            target
        );

        for _ in 0..self.max_pages {
            let candidates = match self.fetch_page(page).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::warn!(
                        "Ending banned-list pass at page {} after {} profiles: {}",
                        page,
                        profiles.len(),
                        e
                    );
                    self.cursor.store(page, Ordering::SeqCst);
                    break;
                }
            };

            if candidates.is_empty() {
                tracing::info!("Banned listing exhausted at page {}", page);
                self.cursor.store(self.start_page, Ordering::SeqCst);
                break;
            }

            let mut tally = PageTally {
                returned: candidates.len(),
                ..PageTally::default()
            };

            let fresh = self.fresh_candidates(candidates);
            tally.fresh = fresh.len();

            let mut abandoned = false;
            for (i, id) in fresh.iter().enumerate() {
                match self.profiles.resolve(id).await {
                    Ok(profile) => {
                        profiles.push(profile);
                        tally.collected += 1;
                    }
                    Err(FetchError::NotFound(_)) => tally.not_found += 1,
                    Err(e) => {
                        tracing::debug!("Skipping banned candidate {}: {}", id, e);
                        tally.errors += 1;
                    }
                }

                if profiles.len() >= target {
                    abandoned = i + 1 < fresh.len();
                    break;
                }
            }

            tracing::info!(
                "Banned page {}: {} returned, {} new, {} collected, {} not found, {} errors",
                page,
                tally.returned,
                tally.fresh,
                tally.collected,
                tally.not_found,
                tally.errors
            );

            if abandoned {
                // Leftover candidates are revisited next pass
                self.cursor.store(page, Ordering::SeqCst);
                break;
            }

            page = page.saturating_add(1);
            self.cursor.store(page, Ordering::SeqCst);

            if profiles.len() >= target {
                break;
            }
        }

        tracing::info!(
            "Banned-list pass complete: {} profiles, next page {}",
            profiles.len(),
            self.next_page()
        );
        profiles
    }

    async fn fetch_page(&self, page: u32) -> FetchResult<Vec<Identity>> {
        self.limiter.acquire().await;

        match self.api.banned_page(page, self.page_size).await {
            Ok(ids) => {
                tracing::debug!("Fetched banned page {} ({} entries)", page, ids.len());
                Ok(ids)
            }
            Err(e) => {
                tracing::debug!("Banned page {} request failed: {}", page, e);
                Err(e)
            }
        }
    }

    /// Drops in-page duplicates and identities the store already holds
    fn fresh_candidates(&self, candidates: Vec<Identity>) -> Vec<Identity> {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .filter(|id| !self.profiles.is_cached(id))
            .collect()
    }
}
