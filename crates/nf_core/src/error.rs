use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a poll cycle failed. Every variant degrades to the same outcome
/// (serve the fallback list and keep polling), but the snapshot carries the
/// variant so callers can react without parsing log text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}
