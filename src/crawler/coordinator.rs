//! Component wiring
//!
//! Builds the whole object graph from a validated [`Config`]: storage, the
//! shared HTTP client, one limiter per upstream resource, the API clients,
//! both generators and the scheduler. Nothing here is global; the CLI and the
//! control surface both hold a `Coordinator`.

use crate::api::{build_http_client, LeetifyClient, VaclistClient};
use crate::config::Config;
use crate::crawler::banned::BannedListPager;
use crate::crawler::limiter::RateLimiter;
use crate::crawler::matches::MatchFetcher;
use crate::crawler::network::NetworkCrawler;
use crate::crawler::profiles::ProfileFetcher;
use crate::crawler::scheduler::GatheringScheduler;
use crate::storage::{open_storage, ProfileStore};
use crate::{ConfigError, ScoutError};
use std::path::Path;
use std::sync::Arc;

pub const PROFILE_LIMITER: &str = "profile-api";
pub const MATCH_LIMITER: &str = "match-api";
pub const BANNED_LIST_LIMITER: &str = "banned-list-api";

/// Owns every long-lived component of a running gatherer
pub struct Coordinator {
    config: Arc<Config>,
    store: Arc<dyn ProfileStore>,
    crawler: Arc<NetworkCrawler>,
    pager: Arc<BannedListPager>,
    scheduler: Arc<GatheringScheduler>,
}

impl Coordinator {
    /// Opens storage and wires all components from `config`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl or serve
    /// * `Err(ScoutError)` - Storage, HTTP client or URL setup failed
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        let store: Arc<dyn ProfileStore> =
            Arc::new(open_storage(Path::new(&config.storage.database_path))?);
        tracing::info!("Profile store opened at {}", config.storage.database_path);

        let client = build_http_client(&config.api)?;

        let leetify = Arc::new(
            LeetifyClient::new(client.clone(), &config.api)
                .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.api.base_url, e)))?,
        );
        let vaclist = Arc::new(VaclistClient::new(client, &config.api).map_err(|e| {
            ConfigError::InvalidUrl(format!("{}: {}", config.api.banned_list_url, e))
        })?);

        let limits = &config.rate_limits;
        let profiles = Arc::new(ProfileFetcher::new(
            store.clone(),
            leetify.clone(),
            RateLimiter::from_config(PROFILE_LIMITER, &limits.profile_api),
        ));
        let matches = Arc::new(MatchFetcher::new(
            leetify,
            RateLimiter::from_config(MATCH_LIMITER, &limits.match_api),
        ));

        let crawler = Arc::new(
            NetworkCrawler::new(profiles.clone(), matches)
                .with_match_candidate_cap(config.crawler.match_candidate_cap),
        );
        let pager = Arc::new(BannedListPager::new(
            profiles,
            vaclist,
            RateLimiter::from_config(BANNED_LIST_LIMITER, &limits.banned_list_api),
            &config.banned,
        ));
        let scheduler = Arc::new(GatheringScheduler::new(
            crawler.clone(),
            pager.clone(),
            store.clone(),
            &config.gathering,
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            crawler,
            pager,
            scheduler,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn ProfileStore> {
        self.store.clone()
    }

    pub fn crawler(&self) -> Arc<NetworkCrawler> {
        self.crawler.clone()
    }

    pub fn pager(&self) -> Arc<BannedListPager> {
        self.pager.clone()
    }

    pub fn scheduler(&self) -> Arc<GatheringScheduler> {
        self.scheduler.clone()
    }
}
