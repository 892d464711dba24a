use std::time::Duration;

use nf_core::{Error, Result};

/// Topic rotation set used when `NF_TOPICS` is not configured.
pub const DEFAULT_TOPICS: [&str; 4] = [
    "rhinoplasty",
    "plastic surgery",
    "cosmetic surgery",
    "nose job",
];

pub const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4";

const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_COUNTRY: &str = "us";
const DEFAULT_MAX_RESULTS: u32 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct GnewsConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub country: String,
    pub max_results: u32,
    pub timeout: Duration,
    pub topics: Vec<String>,
}

impl GnewsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Build the configuration from the environment, loading a `.env` file
    /// when one is present. `NF_API_KEY` is required; everything else has a
    /// default.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("NF_API_KEY")
            .map_err(|_| Error::Config("NF_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("NF_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(language) = std::env::var("NF_LANGUAGE") {
            config.language = language;
        }
        if let Ok(country) = std::env::var("NF_COUNTRY") {
            config.country = country;
        }
        if let Ok(raw) = std::env::var("NF_MAX_RESULTS") {
            config.max_results = raw.parse().map_err(|_| {
                Error::Config(format!("NF_MAX_RESULTS must be a number, got '{}'", raw))
            })?;
        }
        if let Ok(raw) = std::env::var("NF_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                Error::Config(format!("NF_TIMEOUT_SECS must be a number, got '{}'", raw))
            })?;
            if secs == 0 {
                return Err(Error::Config(
                    "NF_TIMEOUT_SECS must be positive".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Ok(raw) = std::env::var("NF_TOPICS") {
            let topics = parse_topics(&raw);
            if topics.is_empty() {
                return Err(Error::Config(
                    "NF_TOPICS must name at least one topic".to_string(),
                ));
            }
            config.topics = topics;
        }

        Ok(config)
    }
}

fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}
