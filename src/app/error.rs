use thiserror::Error;

use crate::config::ConfigError;
use crate::fetcher::FetchError;
use crate::notifier::DeliveryError;

#[derive(Error, Debug)]
pub enum TrendmailError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrendmailError {
    /// Pipeline stage the error belongs to, used in the operator-facing diagnostic.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "fetch",
            Self::Parse(_) => "parse",
            Self::Delivery(_) => "deliver",
            Self::InvalidUrl(_) | Self::Config(_) => "config",
            Self::Io(_) => "output",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendmailError>;
