//! Teammate network crawler
//!
//! Breadth-first walk over the player graph:
//!
//! 1. Dequeue the next identity and resolve its profile (skip on failure)
//! 2. Collect the profile; stop as soon as the target is reached
//! 3. Enqueue unseen teammates (cheap: already embedded in the profile)
//! 4. If step 3 added nobody, fall back to match rosters: walk the player's
//!    history newest-first, fetching match details one at a time until the
//!    candidate cap is reached, then enqueue the unseen candidates
//!
//! The fallback fires per node, not only when the whole queue runs dry.

use crate::api::{Identity, Profile};
use crate::crawler::matches::MatchFetcher;
use crate::crawler::profiles::ProfileFetcher;
use crate::state::Frontier;
use std::collections::HashSet;
use std::sync::Arc;

/// Default cap on identities gathered from match rosters per fallback
pub const DEFAULT_MATCH_CANDIDATE_CAP: usize = 20;

/// Bounded BFS explorer over teammate and match-roster edges
pub struct NetworkCrawler {
    profiles: Arc<ProfileFetcher>,
    matches: Arc<MatchFetcher>,
    match_candidate_cap: usize,
}

impl NetworkCrawler {
    pub fn new(profiles: Arc<ProfileFetcher>, matches: Arc<MatchFetcher>) -> Self {
        Self {
            profiles,
            matches,
            match_candidate_cap: DEFAULT_MATCH_CANDIDATE_CAP,
        }
    }

    pub fn with_match_candidate_cap(mut self, cap: usize) -> Self {
        self.match_candidate_cap = cap.max(1);
        self
    }

    /// Crawls outward from one seed until `target` profiles are collected
    ///
    /// Returns profiles in discovery order. Fewer than `target` are returned when
    /// the reachable network is exhausted; none when the seed cannot be resolved.
    pub async fn crawl(&self, seed: &Identity, target: usize) -> Vec<Profile> {
        self.crawl_from(std::slice::from_ref(seed), target).await
    }

    /// Crawls outward from several seeds, visited in the given order first
    pub async fn crawl_from(&self, seeds: &[Identity], target: usize) -> Vec<Profile> {
        let mut profiles = Vec::new();
        if target == 0 {
            return profiles;
        }

        tracing::info!(
            "Starting network crawl from {} seed(s) (target: {} profiles)",
            seeds.len(),
            target
        );

        let mut frontier = Frontier::new(seeds.iter().cloned());

        while profiles.len() < target {
            let current = match frontier.pop() {
                Some(id) => id,
                None => {
                    tracing::info!("Frontier exhausted after {} profiles", profiles.len());
                    break;
                }
            };

            tracing::debug!(
                "Processing {} (progress: {}/{}, queued: {})",
                current,
                profiles.len(),
                target,
                frontier.queued()
            );

            let profile = match self.profiles.resolve(&current).await {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", current, e);
                    frontier.mark_visited(current);
                    continue;
                }
            };

            frontier.mark_visited(current.clone());
            let teammates: Vec<Identity> = profile.teammate_ids().cloned().collect();
            profiles.push(profile);

            if profiles.len() >= target {
                break;
            }

            let added = frontier.enqueue_all(&teammates);
            if added > 0 {
                tracing::debug!("Queued {} new teammates from {}", added, current);
                continue;
            }

            tracing::debug!(
                "No new teammates for {}, expanding via recent matches",
                current
            );
            let candidates = self.match_candidates(&current).await;
            let added = frontier.enqueue_all(&candidates);
            if added > 0 {
                tracing::debug!("Queued {} players from {}'s matches", added, current);
            }
        }

        tracing::info!(
            "Network crawl complete: {} profiles, {} identities resolved, {} seen",
            profiles.len(),
            frontier.visited_count(),
            frontier.seen_count()
        );
        profiles
    }

    /// Collects participant identities from a player's recent matches
    ///
    /// Stops fetching details once the candidate set reaches the cap. Failed
    /// history or detail lookups contribute nothing.
    async fn match_candidates(&self, id: &Identity) -> Vec<Identity> {
        let history = match self.matches.history(id).await {
            Ok(history) => history,
            Err(e) => {
                tracing::debug!("Match fallback unavailable for {}: {}", id, e);
                return Vec::new();
            }
        };

        let mut candidates = Vec::new();
        let mut seen = HashSet::new();
        let mut matches_processed = 0;

        for summary in &history {
            if candidates.len() >= self.match_candidate_cap {
                break;
            }

            let detail = match self.matches.details(&summary.match_id).await {
                Ok(Some(detail)) => detail,
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!("Skipping match {}: {}", summary.match_id, e);
                    continue;
                }
            };
            matches_processed += 1;

            for participant in detail.participants() {
                if candidates.len() >= self.match_candidate_cap {
                    break;
                }
                if seen.insert(participant.clone()) {
                    candidates.push(participant);
                }
            }
        }

        tracing::debug!(
            "Collected {} candidate(s) from {} match(es) of {}",
            candidates.len(),
            matches_processed,
            id
        );
        candidates
    }
}
