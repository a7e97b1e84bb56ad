//! Page-level access to the Sentry issue events API

use crate::app::config::SentryConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::Client;
use serde_json::Value;
use std::collections::VecDeque;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::links::next_page_url;

/// One page of the issue's event collection
///
/// The body is kept as raw JSON: an error payload is a valid page that the
/// event source must be able to recognise and stop on.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub body: Value,
    pub next: Option<String>,
}

/// Fetches single pages of the event collection
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Page>;
}

/// Sentry REST client authenticated with a bearer token
pub struct SentryClient {
    client: Client,
    base_url: String,
    issue_id: String,
    auth_token: String,
}

impl SentryClient {
    /// Requests carry no timeout; a slow page is waited for
    pub fn new(config: &SentryConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("usage-badges/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            issue_id: config.issue_id.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// First page of the issue's events, newest first
    pub fn events_url(&self) -> String {
        format!("{}/api/0/issues/{}/events/", self.base_url, self.issue_id)
    }
}

#[async_trait]
impl PageFetcher for SentryClient {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.auth_token)
            .send()
            .await?;

        let status = response.status();
        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_page_url);
        debug!("GET {} -> {} (next page: {})", url, status, next.is_some());

        let text = response.text().await?;
        trace!("Response body: {}", text);

        match serde_json::from_str(&text) {
            Ok(body) => Ok(Page { body, next }),
            Err(_) if !status.is_success() => Err(Error::HttpStatus {
                status,
                url: url.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

/// Scripted [`PageFetcher`] that serves queued pages in order
///
/// Requested URLs are recorded so tests can verify how far pagination went.
/// Running out of pages is reported as an error payload.
#[derive(Default)]
pub struct MockPageFetcher {
    pages: Mutex<VecDeque<Result<Page>>>,
    requested: Mutex<Vec<String>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page with the given JSON body
    pub fn with_page(mut self, body: Value, next: Option<&str>) -> Self {
        self.pages.get_mut().push_back(Ok(Page {
            body,
            next: next.map(str::to_string),
        }));
        self
    }

    /// Queue a failed fetch
    pub fn with_error(mut self, error: Error) -> Self {
        self.pages.get_mut().push_back(Err(error));
        self
    }

    /// URLs requested so far, in order
    pub async fn requested(&self) -> Vec<String> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        self.requested.lock().await.push(url.to_string());
        self.pages.lock().await.pop_front().unwrap_or_else(|| {
            Ok(Page {
                body: serde_json::json!({"detail": "no more scripted pages"}),
                next: None,
            })
        })
    }
}
