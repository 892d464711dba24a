use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use nf_core::{Article, Error, FetchError, NewsSource, Result, PLACEHOLDER_IMAGE_URL};

use crate::config::{GnewsConfig, DEFAULT_TOPICS};

/// GNews v4 search response. Only the fields we map are declared; anything
/// else in the payload is ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    articles: Vec<RemoteArticle>,
}

#[derive(Debug, Deserialize)]
struct RemoteArticle {
    title: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: String,
    source: RemoteSource,
}

#[derive(Debug, Deserialize)]
struct RemoteSource {
    name: String,
}

pub struct GnewsSource {
    client: reqwest::Client,
    search_base: Url,
    config: GnewsConfig,
}

impl GnewsSource {
    pub fn new(config: GnewsConfig) -> Result<Self> {
        let search_base = Url::parse(&format!(
            "{}/search",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|_| Error::InvalidUrl(config.base_url.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            search_base,
            config,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GnewsConfig::from_env()?)
    }

    pub fn topics(&self) -> &[String] {
        &self.config.topics
    }

    fn pick_topic(&self) -> &str {
        self.config
            .topics
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_TOPICS[0])
    }

    fn search_url(&self, topic: &str) -> Url {
        let mut url = self.search_base.clone();
        url.query_pairs_mut()
            .append_pair("q", topic)
            .append_pair("lang", &self.config.language)
            .append_pair("country", &self.config.country)
            .append_pair("max", &self.config.max_results.to_string())
            .append_pair("apikey", &self.config.api_key);
        url
    }
}

#[async_trait]
impl NewsSource for GnewsSource {
    fn name(&self) -> &str {
        "gnews"
    }

    async fn fetch(&self) -> std::result::Result<Vec<Article>, FetchError> {
        let topic = self.pick_topic();
        debug!("🔎 Searching gnews for '{}'", topic);

        let response = self
            .client
            .get(self.search_url(topic))
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let body = response.text().await.map_err(classify)?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let mut articles = Vec::with_capacity(parsed.articles.len());
        for remote in parsed.articles {
            match map_article(remote) {
                Ok(article) => articles.push(article),
                Err(reason) => debug!("🚮 Dropping record: {}", reason),
            }
        }
        Ok(articles)
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::Malformed(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

fn map_article(remote: RemoteArticle) -> std::result::Result<Article, String> {
    let published_at = DateTime::parse_from_rfc3339(&remote.published_at)
        .map_err(|e| format!("bad publishedAt '{}': {}", remote.published_at, e))?
        .with_timezone(&Utc);

    let image_url = match remote.image {
        Some(image) if !image.is_empty() => image,
        _ => PLACEHOLDER_IMAGE_URL.to_string(),
    };

    let article = Article {
        title: remote.title,
        description: remote.description.unwrap_or_default(),
        url: remote.url,
        image_url,
        published_at,
        source_name: remote.source.name,
    };

    if !article.is_valid() {
        return Err(format!("empty title or unusable url '{}'", article.url));
    }
    Ok(article)
}
