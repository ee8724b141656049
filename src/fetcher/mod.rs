pub mod http_fetcher;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use http_fetcher::HttpFetcher;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("server returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

/// Retrieves the raw markup of a listing page.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
