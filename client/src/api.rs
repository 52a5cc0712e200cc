//! Transport layer for the mock content API
//!
//! The `SectionApi` trait is the seam between the feed logic and the
//! network: production code goes through [`HttpSectionApi`], tests go
//! through an in-memory mock. Kinds stay plain strings on this side of
//! the wire so an unknown kind degrades to a lookup miss instead of a
//! deserialization failure.

use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// A reference to one feed section, as listed by `/api/sections`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct SectionRef {
    pub kind: String,
    pub index: u64,
}

impl SectionRef {
    pub fn new(kind: impl Into<String>, index: u64) -> Self {
        Self {
            kind: kind.into(),
            index,
        }
    }

    /// Stable identity, used as the cache and tracker key. Matches the
    /// server's lookup key format.
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind, self.index)
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.index)
    }
}

/// The full content payload for one section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionDetail {
    pub kind: String,
    pub index: u64,
    pub title: String,
    pub text: String,
    pub image: String,
    /// Present only for video sections.
    #[serde(rename = "videoUrl", default)]
    pub video_url: Option<String>,
}

/// One page of section references.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPage {
    pub items: Vec<SectionRef>,
    /// Next page number, or `None` when the catalog is exhausted.
    pub next_page: Option<u32>,
    pub total_items: u64,
}

/// Transport errors for feed requests
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("section not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Whether retrying could plausibly succeed. Connection-level
    /// failures and 5xx responses are transient; a 404 or a malformed
    /// body is not.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Request(err) => !err.is_decode(),
            ApiError::Api { status, .. } => *status >= 500,
            ApiError::NotFound(_) => false,
        }
    }
}

/// Port to the content API. Page fetches and detail fetches are the only
/// suspension points in the client.
#[async_trait]
pub trait SectionApi: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<SectionPage, ApiError>;

    async fn fetch_detail(&self, section: &SectionRef) -> Result<SectionDetail, ApiError>;
}

/// HTTP client for the mock content API
#[derive(Clone)]
pub struct HttpSectionApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSectionApi {
    /// Create a client from the environment.
    ///
    /// `FEED_API_URL` overrides the base URL (e.g. a LAN address for a
    /// physical device); defaults to the server's compiled-in port.
    pub fn from_env() -> Self {
        let base_url = std::env::var("FEED_API_URL")
            .unwrap_or_else(|_| "http://localhost:5174".to_string());
        Self::new(&base_url)
    }

    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SectionApi for HttpSectionApi {
    async fn fetch_page(&self, page: u32) -> Result<SectionPage, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/sections", self.base_url))
            .query(&[("page", page)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(response.json().await?)
    }

    async fn fetch_detail(&self, section: &SectionRef) -> Result<SectionDetail, ApiError> {
        let index = section.index.to_string();
        let response = self
            .client
            .get(format!("{}/api/section", self.base_url))
            .query(&[("kind", section.kind.as_str()), ("index", index.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(section.key()));
        }
        if !status.is_success() {
            return Err(api_error(status, response).await);
        }

        Ok(response.json().await?)
    }
}

async fn api_error(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
    let message = response.text().await.unwrap_or_default();
    ApiError::Api {
        status: status.as_u16(),
        message,
    }
}
