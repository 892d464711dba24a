use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use nf_core::{time_ago, Article, ArticleCategory, Snapshot};
use nf_poll::NewsPoller;
use nf_sources::{fallback_articles, GnewsConfig, GnewsSource};

#[derive(Debug, Clone, Copy)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total = 0u64;
        let mut digits = String::new();
        let mut saw_component = false;

        for c in s.trim().chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }
            let value: u64 = digits
                .parse()
                .map_err(|_| format!("expected a number before '{}'", c))?;
            let scale = match c {
                's' => 1,
                'm' => 60,
                'h' => 3600,
                'd' => 86400,
                _ => return Err(format!("unknown duration unit '{}'", c)),
            };
            total = value
                .checked_mul(scale)
                .and_then(|seconds| total.checked_add(seconds))
                .ok_or_else(|| "duration too large".to_string())?;
            digits.clear();
            saw_component = true;
        }

        // a bare trailing number means seconds
        if !digits.is_empty() {
            let value: u64 = digits.parse().map_err(|_| "invalid number".to_string())?;
            total = total
                .checked_add(value)
                .ok_or_else(|| "duration too large".to_string())?;
            saw_component = true;
        }

        if !saw_component {
            return Err("empty duration".to_string());
        }
        if total == 0 {
            return Err("duration must be positive".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
enum CategoryFilter {
    All,
    Press,
    Blog,
}

impl CategoryFilter {
    fn keeps(self, article: &Article) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Press => article.category() == ArticleCategory::Press,
            CategoryFilter::Blog => article.category() == ArticleCategory::Blog,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Polls a news feed and degrades gracefully", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one poll cycle and print the result
    Fetch {
        /// Search this topic instead of rotating through the configured set
        #[arg(long)]
        topic: Option<String>,
        #[arg(long, value_enum, default_value = "all")]
        category: CategoryFilter,
        /// Print the snapshot as JSON instead of a rendered list
        #[arg(long)]
        json: bool,
    },
    /// Poll continuously and re-render on every update
    Watch {
        /// Fetch interval (e.g. 30s, 1m30s, 1h)
        #[arg(long, default_value = "60s")]
        interval: HumanDuration,
        #[arg(long, value_enum, default_value = "all")]
        category: CategoryFilter,
    },
    /// Print the configured topic rotation
    Topics,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Fetch {
            topic,
            category,
            json,
        } => fetch(topic, category, json).await,
        Commands::Watch { interval, category } => watch(interval.0, category).await,
        Commands::Topics => topics(),
    }
}

async fn fetch(topic: Option<String>, category: CategoryFilter, json: bool) -> anyhow::Result<()> {
    let mut config = GnewsConfig::from_env().context("loading configuration")?;
    if let Some(topic) = topic {
        info!("🔎 Using topic override '{}'", topic);
        config.topics = vec![topic];
    }
    let source = GnewsSource::new(config).context("building the news source")?;
    let poller = NewsPoller::new(Arc::new(source), fallback_articles(Utc::now()));

    let snapshot = poller.fetch_once().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        render(&snapshot, category);
    }
    Ok(())
}

async fn watch(interval: Duration, category: CategoryFilter) -> anyhow::Result<()> {
    let source = GnewsSource::from_env().context("building the news source")?;
    let poller = NewsPoller::new(Arc::new(source), fallback_articles(Utc::now()));
    let mut updates = poller.subscribe();

    poller.start(interval);
    println!("Watching the feed. Press Enter or 'r' to refresh, 'q' to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if snapshot.is_loading {
                    continue;
                }
                render(&snapshot, category);
            }
            line = lines.next_line() => {
                match line?.map(|l| l.trim().to_lowercase()) {
                    Some(cmd) if cmd == "q" || cmd == "quit" => break,
                    Some(cmd) if cmd.is_empty() || cmd == "r" => {
                        if !poller.refresh_now() {
                            println!("(a fetch is already running)");
                        }
                    }
                    Some(_) => println!("(press Enter or 'r' to refresh, 'q' to quit)"),
                    None => break,
                }
            }
        }
    }

    poller.stop();
    Ok(())
}

fn topics() -> anyhow::Result<()> {
    let source = GnewsSource::from_env().context("building the news source")?;
    for topic in source.topics() {
        println!("- {}", topic);
    }
    Ok(())
}

fn render(snapshot: &Snapshot, category: CategoryFilter) {
    let now = Utc::now();
    if let Some(err) = &snapshot.last_error {
        println!("⚠️ Live fetch failed ({}), showing the fallback list\n", err);
    }

    let shown: Vec<&Article> = snapshot
        .articles
        .iter()
        .filter(|article| category.keeps(article))
        .collect();
    if shown.is_empty() {
        println!("No articles in this category.");
    }
    for article in shown {
        println!("📰 {}", article.title);
        println!(
            "   {} • {}",
            article.source_name,
            time_ago(article.published_at, now)
        );
        if !article.description.is_empty() {
            println!("   {}", article.description);
        }
        println!("   {}", article.url);
        println!();
    }

    if let Some(updated) = snapshot.last_updated_at {
        let mode = if snapshot.last_error.is_some() {
            "fallback"
        } else {
            "live"
        };
        println!("Last updated {} • {}", time_ago(updated, now), mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::PLACEHOLDER_IMAGE_URL;

    #[test]
    fn parses_single_units() {
        assert_eq!("30s".parse::<HumanDuration>().unwrap().0.as_secs(), 30);
        assert_eq!("2m".parse::<HumanDuration>().unwrap().0.as_secs(), 120);
        assert_eq!("1h".parse::<HumanDuration>().unwrap().0.as_secs(), 3600);
        assert_eq!("1d".parse::<HumanDuration>().unwrap().0.as_secs(), 86400);
    }

    #[test]
    fn parses_compound_durations() {
        assert_eq!(
            "1h15m30s".parse::<HumanDuration>().unwrap().0.as_secs(),
            4530
        );
        assert_eq!("1m 30s".parse::<HumanDuration>().unwrap().0.as_secs(), 90);
    }

    #[test]
    fn bare_numbers_are_seconds() {
        assert_eq!("90".parse::<HumanDuration>().unwrap().0.as_secs(), 90);
    }

    #[test]
    fn rejects_nonsense() {
        assert!("".parse::<HumanDuration>().is_err());
        assert!("abc".parse::<HumanDuration>().is_err());
        assert!("10x".parse::<HumanDuration>().is_err());
        assert!("h".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
        assert!("9000000000000000000h".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn category_filter_keeps_matching_articles() {
        let press = Article {
            title: "t".to_string(),
            description: String::new(),
            url: "https://example.com/press".to_string(),
            image_url: PLACEHOLDER_IMAGE_URL.to_string(),
            published_at: Utc::now(),
            source_name: "Daily News".to_string(),
        };
        let blog = Article {
            source_name: "Mayo Clinic".to_string(),
            url: "https://example.com/blog".to_string(),
            ..press.clone()
        };

        assert!(CategoryFilter::All.keeps(&press));
        assert!(CategoryFilter::All.keeps(&blog));
        assert!(CategoryFilter::Press.keeps(&press));
        assert!(!CategoryFilter::Press.keeps(&blog));
        assert!(CategoryFilter::Blog.keeps(&blog));
        assert!(!CategoryFilter::Blog.keeps(&press));
    }
}
