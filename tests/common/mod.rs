//! In-memory fakes shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use squad_scout::api::{
    BannedListApi, FetchError, FetchResult, Identity, MatchApi, MatchDetail, MatchSummary, Profile,
    ProfileApi,
};
use squad_scout::config::BannedConfig;
use squad_scout::crawler::{BannedListPager, MatchFetcher, NetworkCrawler, ProfileFetcher, RateLimiter};
use squad_scout::storage::{ProfileStore, SqliteProfileStore, StorageError, StorageResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn ids(raw: &[&str]) -> Vec<Identity> {
    raw.iter().map(|s| Identity::from(*s)).collect()
}

pub fn names(profiles: &[Profile]) -> Vec<String> {
    profiles.iter().map(|p| p.steam_id.to_string()).collect()
}

/// Limiter that never makes a test wait
pub fn fast_limiter(name: &str) -> RateLimiter {
    RateLimiter::new(name, 10_000, Duration::from_millis(1))
}

pub fn memory_store() -> Arc<SqliteProfileStore> {
    Arc::new(SqliteProfileStore::open_in_memory().unwrap())
}

/// Profile source backed by a map; unknown identities are `NotFound`
#[derive(Default)]
pub struct FakeProfileApi {
    profiles: HashMap<Identity, Profile>,
    failing: HashSet<Identity>,
    calls: Mutex<Vec<Identity>>,
}

impl FakeProfileApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a profile whose teammates are `teammates`
    pub fn with_player(mut self, id: &str, teammates: &[&str]) -> Self {
        let profile = Profile::new(id, format!("player-{}", id)).with_teammates(teammates.iter().copied());
        self.profiles.insert(Identity::from(id), profile);
        self
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles.insert(profile.steam_id.clone(), profile);
        self
    }

    /// Makes lookups of `id` fail with an upstream error
    pub fn with_failure(mut self, id: &str) -> Self {
        self.failing.insert(Identity::from(id));
        self
    }

    pub fn calls(&self) -> Vec<Identity> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, id: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == id).count()
    }
}

#[async_trait]
impl ProfileApi for FakeProfileApi {
    async fn fetch_profile(&self, id: &Identity) -> FetchResult<Profile> {
        self.calls.lock().unwrap().push(id.clone());
        if self.failing.contains(id) {
            return Err(FetchError::Upstream {
                status: Some(500),
                message: "boom".to_string(),
            });
        }
        self.profiles
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }
}

/// Match source backed by maps; unknown players and matches are `NotFound`
#[derive(Default)]
pub struct FakeMatchApi {
    history: HashMap<Identity, Vec<MatchSummary>>,
    details: HashMap<String, MatchDetail>,
    history_calls: Mutex<Vec<Identity>>,
    details_calls: Mutex<Vec<String>>,
}

impl FakeMatchApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, id: &str, matches: Vec<MatchSummary>) -> Self {
        self.history.insert(Identity::from(id), matches);
        self
    }

    pub fn with_match(mut self, match_id: &str, participants: &[&str]) -> Self {
        self.details.insert(
            match_id.to_string(),
            MatchDetail::new(match_id, participants.iter().copied()),
        );
        self
    }

    pub fn history_calls_for(&self, id: &str) -> usize {
        self.history_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == id)
            .count()
    }

    pub fn details_calls(&self) -> Vec<String> {
        self.details_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchApi for FakeMatchApi {
    async fn match_history(&self, id: &Identity) -> FetchResult<Vec<MatchSummary>> {
        self.history_calls.lock().unwrap().push(id.clone());
        self.history
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(id.to_string()))
    }

    async fn match_details(&self, match_id: &str) -> FetchResult<MatchDetail> {
        self.details_calls.lock().unwrap().push(match_id.to_string());
        self.details
            .get(match_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(match_id.to_string()))
    }
}

/// Banned listing backed by explicit pages
///
/// Pages not registered are empty unless `endless` is set, in which case every
/// unregistered page returns one never-resolvable identity.
#[derive(Default)]
pub struct FakeBannedListApi {
    pages: HashMap<u32, Vec<Identity>>,
    failing_pages: HashSet<u32>,
    endless: bool,
    calls: Mutex<Vec<u32>>,
}

impl FakeBannedListApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, entries: &[&str]) -> Self {
        self.pages.insert(page, ids(entries));
        self
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    pub fn endless(mut self) -> Self {
        self.endless = true;
        self
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BannedListApi for FakeBannedListApi {
    async fn banned_page(&self, page: u32, _page_size: u32) -> FetchResult<Vec<Identity>> {
        self.calls.lock().unwrap().push(page);
        if self.failing_pages.contains(&page) {
            return Err(FetchError::Upstream {
                status: Some(503),
                message: "listing unavailable".to_string(),
            });
        }
        match self.pages.get(&page) {
            Some(entries) => Ok(entries.clone()),
            None if self.endless => Ok(vec![Identity::new(format!("ghost-{}", page))]),
            None => Ok(Vec::new()),
        }
    }
}

/// Store whose every operation fails
pub struct FailingStore;

impl FailingStore {
    fn error() -> StorageError {
        StorageError::Database("disk unavailable".to_string())
    }
}

impl ProfileStore for FailingStore {
    fn find(&self, _id: &Identity) -> StorageResult<Option<Profile>> {
        Err(Self::error())
    }

    fn exists(&self, _id: &Identity) -> StorageResult<bool> {
        Err(Self::error())
    }

    fn save(&self, _profile: &Profile) -> StorageResult<()> {
        Err(Self::error())
    }

    fn any_identity(&self) -> StorageResult<Option<Identity>> {
        Err(Self::error())
    }

    fn count_profiles(&self) -> StorageResult<u64> {
        Err(Self::error())
    }

    fn count_banned(&self) -> StorageResult<u64> {
        Err(Self::error())
    }
}

pub fn profile_fetcher(store: Arc<dyn ProfileStore>, api: Arc<FakeProfileApi>) -> Arc<ProfileFetcher> {
    Arc::new(ProfileFetcher::new(store, api, fast_limiter("profile-api")))
}

pub fn crawler(
    store: Arc<dyn ProfileStore>,
    profiles: Arc<FakeProfileApi>,
    matches: Arc<FakeMatchApi>,
) -> NetworkCrawler {
    NetworkCrawler::new(
        profile_fetcher(store, profiles),
        Arc::new(MatchFetcher::new(matches, fast_limiter("match-api"))),
    )
}

pub fn banned_config(page_size: u32, max_pages: u32) -> BannedConfig {
    BannedConfig {
        page_size,
        max_pages,
        start_page: 0,
    }
}

pub fn pager(
    store: Arc<dyn ProfileStore>,
    profiles: Arc<FakeProfileApi>,
    listing: Arc<FakeBannedListApi>,
    config: &BannedConfig,
) -> BannedListPager {
    BannedListPager::new(
        profile_fetcher(store, profiles),
        listing,
        fast_limiter("banned-list-api"),
        config,
    )
}
