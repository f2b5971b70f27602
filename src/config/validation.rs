use crate::config::types::{
    ApiConfig, BannedConfig, Config, CrawlerConfig, LimiterConfig, ServerConfig, StorageConfig,
};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_limiter("profile-api", &config.rate_limits.profile_api)?;
    validate_limiter("match-api", &config.rate_limits.match_api)?;
    validate_limiter("banned-list-api", &config.rate_limits.banned_list_api)?;
    validate_crawler_config(&config.crawler)?;
    validate_banned_config(&config.banned)?;
    validate_storage_config(&config.storage)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates upstream API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_http_url("base_url", &config.base_url)?;
    validate_http_url("banned_list_url", &config.banned_list_url)?;

    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key is required (set it in the file or via LEETIFY_API_KEY)".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            field, value
        )));
    }

    Ok(())
}

/// Validates one named limiter quota
fn validate_limiter(name: &str, config: &LimiterConfig) -> Result<(), ConfigError> {
    if config.limit_for_period < 1 {
        return Err(ConfigError::Validation(format!(
            "{}: limit_for_period must be >= 1, got {}",
            name, config.limit_for_period
        )));
    }

    if config.refresh_period_ms < 1 {
        return Err(ConfigError::Validation(format!(
            "{}: refresh_period_ms must be >= 1",
            name
        )));
    }

    Ok(())
}

fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.match_candidate_cap < 1 {
        return Err(ConfigError::Validation(
            "match_candidate_cap must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn validate_banned_config(config: &BannedConfig) -> Result<(), ConfigError> {
    if config.page_size < 1 || config.page_size > 1000 {
        return Err(ConfigError::Validation(format!(
            "page_size must be between 1 and 1000, got {}",
            config.page_size
        )));
    }

    if config.max_pages < 1 || config.max_pages > 100 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and 100, got {}",
            config.max_pages
        )));
    }

    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind_address.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!(
            "Invalid bind_address '{}': {}",
            config.bind_address, e
        ))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("base_url", "https://api.example.com").is_ok());
        assert!(validate_http_url("base_url", "http://127.0.0.1:9000").is_ok());

        assert!(validate_http_url("base_url", "").is_err());
        assert!(validate_http_url("base_url", "not a url").is_err());
        assert!(validate_http_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_limiter() {
        assert!(validate_limiter("x", &LimiterConfig::default()).is_ok());

        let zero_quota = LimiterConfig {
            limit_for_period: 0,
            refresh_period_ms: 1000,
        };
        assert!(validate_limiter("x", &zero_quota).is_err());

        let zero_period = LimiterConfig {
            limit_for_period: 1,
            refresh_period_ms: 0,
        };
        assert!(validate_limiter("x", &zero_period).is_err());
    }

    #[test]
    fn test_validate_banned_config() {
        assert!(validate_banned_config(&BannedConfig::default()).is_ok());

        let too_many_pages = BannedConfig {
            max_pages: 101,
            ..BannedConfig::default()
        };
        assert!(validate_banned_config(&too_many_pages).is_err());
    }

    #[test]
    fn test_validate_server_config() {
        assert!(validate_server_config(&ServerConfig::default()).is_ok());

        let bad = ServerConfig {
            bind_address: "localhost".to_string(),
        };
        assert!(validate_server_config(&bad).is_err());
    }
}
