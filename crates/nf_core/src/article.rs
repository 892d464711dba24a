use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Shown when the remote feed supplies no image for an article.
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: String,
    pub published_at: DateTime<Utc>,
    pub source_name: String,
}

impl Article {
    /// An article is publishable when it carries a title and its link
    /// parses as an absolute URL.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && Url::parse(&self.url).is_ok()
    }

    /// Publisher names containing "Journal" or "News" count as press
    /// coverage, everything else as blog content.
    pub fn category(&self) -> ArticleCategory {
        if self.source_name.contains("Journal") || self.source_name.contains("News") {
            ArticleCategory::Press
        } else {
            ArticleCategory::Blog
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleCategory {
    Press,
    Blog,
}
