pub mod article;
pub mod error;
pub mod snapshot;
pub mod source;
pub mod time;

pub use article::{Article, ArticleCategory, PLACEHOLDER_IMAGE_URL};
pub use error::{Error, FetchError, Result};
pub use snapshot::Snapshot;
pub use source::NewsSource;
pub use time::time_ago;
