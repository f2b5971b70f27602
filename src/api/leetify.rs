//! Leetify public API client (profiles and matches)

use crate::api::client::fetch_json;
use crate::api::{FetchError, FetchResult, Identity, MatchApi, MatchDetail, MatchSummary};
use crate::api::{Profile, ProfileApi};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use url::Url;

const PROFILE_PATH: &str = "v3/profile";
const MATCH_HISTORY_PATH: &str = "v3/profile/matches";
const MATCH_DETAILS_PATH: &str = "v2/matches/";
const API_KEY_HEADER: &str = "_leetify_key";

/// HTTP client for the Leetify profile and match endpoints
#[derive(Clone)]
pub struct LeetifyClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl LeetifyClient {
    /// Creates a client rooted at `config.base_url`
    pub fn new(client: Client, config: &ApiConfig) -> Result<Self, url::ParseError> {
        // Joining relative paths only keeps the last segment without a trailing slash
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> FetchResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::upstream(format!("Invalid endpoint {}: {}", path, e)))
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.client.get(url);
        if self.api_key.is_empty() {
            request
        } else {
            request.header(API_KEY_HEADER, &self.api_key)
        }
    }
}

#[async_trait]
impl ProfileApi for LeetifyClient {
    async fn fetch_profile(&self, id: &Identity) -> FetchResult<Profile> {
        let mut url = self.endpoint(PROFILE_PATH)?;
        url.query_pairs_mut().append_pair("steam64_id", id.as_str());

        tracing::trace!("GET {}", url);
        fetch_json(self.get(url), id.as_str()).await
    }
}

#[async_trait]
impl MatchApi for LeetifyClient {
    async fn match_history(&self, id: &Identity) -> FetchResult<Vec<MatchSummary>> {
        let mut url = self.endpoint(MATCH_HISTORY_PATH)?;
        url.query_pairs_mut().append_pair("steam64_id", id.as_str());

        tracing::trace!("GET {}", url);
        match fetch_json(self.get(url), id.as_str()).await {
            Err(FetchError::ResponseEmpty(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    async fn match_details(&self, match_id: &str) -> FetchResult<MatchDetail> {
        let url = self.endpoint(&format!("{}{}", MATCH_DETAILS_PATH, match_id))?;

        tracing::trace!("GET {}", url);
        fetch_json(self.get(url), match_id).await
    }
}
