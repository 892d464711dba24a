use async_trait::async_trait;

use crate::article::Article;
use crate::error::FetchError;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Label used in logs and status lines
    fn name(&self) -> &str;

    /// Run one fetch against the upstream feed
    async fn fetch(&self) -> Result<Vec<Article>, FetchError>;
}
