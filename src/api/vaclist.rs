//! VacList banned-player directory client

use crate::api::client::fetch_json;
use crate::api::{BannedListApi, BannedListing, FetchError, FetchResult, Identity};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// HTTP client for the paged banned-player listing
#[derive(Clone)]
pub struct VaclistClient {
    client: Client,
    listing_url: Url,
}

impl VaclistClient {
    pub fn new(client: Client, config: &ApiConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            listing_url: Url::parse(&config.banned_list_url)?,
        })
    }
}

#[async_trait]
impl BannedListApi for VaclistClient {
    async fn banned_page(&self, page: u32, page_size: u32) -> FetchResult<Vec<Identity>> {
        let mut url = self.listing_url.clone();
        url.query_pairs_mut()
            .append_pair("count", &page_size.to_string())
            .append_pair("page", &page.to_string());

        tracing::trace!("GET {}", url);
        let key = format!("banned page {}", page);
        let rows: Vec<BannedListing> = match fetch_json(self.client.get(url), &key).await {
            Ok(rows) => rows,
            // An empty or missing page means the directory is exhausted
            Err(FetchError::ResponseEmpty(_)) | Err(FetchError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(rows.into_iter().filter_map(|row| row.steam_id).collect())
    }
}
