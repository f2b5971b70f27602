use serde::Deserialize;

/// Main configuration structure for Squad-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "rate-limits", default)]
    pub rate_limits: RateLimitsConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub banned: BannedConfig,
    #[serde(default)]
    pub gathering: GatheringConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Upstream API endpoints and client identification
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Leetify public API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Leetify API key, sent as the `_leetify_key` header
    #[serde(rename = "api-key", default)]
    pub api_key: String,

    /// User-Agent sent with every upstream request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Full URL of the banned-player listing endpoint
    #[serde(rename = "banned-list-url")]
    pub banned_list_url: String,
}

/// Quota for one named rate limiter
#[derive(Debug, Clone, Deserialize)]
pub struct LimiterConfig {
    /// Calls admitted per refresh period
    #[serde(rename = "limit-for-period")]
    pub limit_for_period: u32,

    /// Length of the refresh period (milliseconds)
    #[serde(rename = "refresh-period-ms")]
    pub refresh_period_ms: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            limit_for_period: 1,
            refresh_period_ms: 1000,
        }
    }
}

/// One limiter per upstream resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateLimitsConfig {
    #[serde(rename = "profile-api", default)]
    pub profile_api: LimiterConfig,

    #[serde(rename = "match-api", default)]
    pub match_api: LimiterConfig,

    #[serde(rename = "banned-list-api", default)]
    pub banned_list_api: LimiterConfig,
}

/// Network crawl behavior
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum identities collected from match rosters per fallback expansion
    #[serde(rename = "match-candidate-cap", default = "default_match_candidate_cap")]
    pub match_candidate_cap: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            match_candidate_cap: default_match_candidate_cap(),
        }
    }
}

/// Banned-list paging behavior
#[derive(Debug, Clone, Deserialize)]
pub struct BannedConfig {
    /// Identities requested per listing page
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,

    /// Hard ceiling on page requests per pass
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: u32,

    /// First page index (0-based) the cursor starts from
    #[serde(rename = "start-page", default)]
    pub start_page: u32,
}

impl Default for BannedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            start_page: 0,
        }
    }
}

/// Background gathering timing
#[derive(Debug, Clone, Deserialize)]
pub struct GatheringConfig {
    /// Pause between successful batches (milliseconds)
    #[serde(rename = "delay-between-batches", default = "default_batch_delay")]
    pub delay_between_batches: u64,

    /// Pause after a failed batch (milliseconds)
    #[serde(rename = "error-retry-delay", default = "default_error_retry_delay")]
    pub error_retry_delay: u64,
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self {
            delay_between_batches: default_batch_delay(),
            error_retry_delay: default_error_retry_delay(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// HTTP control surface configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_match_candidate_cap() -> usize {
    20
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    100
}

fn default_batch_delay() -> u64 {
    5000
}

fn default_error_retry_delay() -> u64 {
    30000
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}
