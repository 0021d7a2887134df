//! Content API client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{ContentError, Result};
use super::post::{PostPage, SearchResponse};
use crate::config::PrismicConfig;

/// Where post pages come from
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Query the first page of posts
    async fn first_page(&self) -> Result<PostPage>;

    /// Follow a `next_page` URL returned by a previous response
    async fn fetch_page(&self, url: &str) -> Result<PostPage>;
}

/// API root document; only the refs are needed
#[derive(Debug, Deserialize)]
struct ApiInfo {
    #[serde(default)]
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

/// REST client for a Prismic repository
pub struct PrismicClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    document_type: String,
    fetch: String,
    page_size: u32,
}

impl PrismicClient {
    pub fn new(config: &PrismicConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token: config.resolved_access_token(),
            document_type: config.document_type.clone(),
            fetch: config.fetch_selectors(),
            page_size: config.page_size.max(1),
        }
    }

    /// Predicate selecting documents of the configured type
    fn type_predicate(&self) -> String {
        format!("[[at(document.type, \"{}\")]]", self.document_type)
    }

    /// Look up the master ref every search has to be pinned to
    async fn master_ref(&self) -> Result<String> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let info: ApiInfo = send_json(request).await?;
        info.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or_else(|| ContentError::NoMasterRef(self.endpoint.clone()))
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn first_page(&self) -> Result<PostPage> {
        let master_ref = self.master_ref().await?;
        tracing::debug!(master_ref = %master_ref, "Resolved master ref");

        let url = format!("{}/documents/search", self.endpoint);
        let predicate = self.type_predicate();
        let page_size = self.page_size.to_string();
        let mut params = vec![
            ("ref", master_ref.as_str()),
            ("q", predicate.as_str()),
            ("fetch", self.fetch.as_str()),
            ("pageSize", page_size.as_str()),
        ];
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.as_str()));
        }

        let response: SearchResponse = send_json(self.client.get(&url).query(&params)).await?;
        let page = PostPage::from(response);
        tracing::info!(
            count = page.results.len(),
            page = page.page,
            total_pages = page.total_pages,
            "Fetched first page of posts"
        );
        Ok(page)
    }

    async fn fetch_page(&self, url: &str) -> Result<PostPage> {
        let response: SearchResponse = send_json(self.client.get(url)).await?;
        let page = PostPage::from(response);
        tracing::info!(
            count = page.results.len(),
            page = page.page,
            total_pages = page.total_pages,
            "Fetched next page of posts"
        );
        Ok(page)
    }
}

/// Send a request and decode a JSON body, mapping non-2xx statuses to errors
async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let resp = request.send().await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ContentError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
