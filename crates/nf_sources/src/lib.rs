pub mod config;
pub mod fallback;
pub mod gnews;

pub use config::{GnewsConfig, DEFAULT_TOPICS};
pub use fallback::fallback_articles;
pub use gnews::GnewsSource;
