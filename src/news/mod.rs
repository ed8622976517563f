//! News retrieval for a user's preferences.
//!
//! [`NewsFetcher`] applies one recovery policy: when the provider is not
//! configured, or a call to it fails for any reason, the feed degrades to
//! synthetic articles generated from the preference terms. Callers always get
//! a list of articles. [`NewsFeed::origin`] records which path produced it.

pub mod client;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;

use crate::config::Config;
use crate::models::Article;

pub use client::NewsApiClient;

const SYNTHETIC_SOURCE: &str = "Mock News Source";
const QUERY_SEPARATOR: &str = " OR ";

#[derive(Error, Debug)]
pub enum NewsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("news provider error ({status}): {message}")]
    Status { status: u16, message: String },
}

/// A source of articles for a search query.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError>;
}

/// How a feed was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOrigin {
    /// The user has no preferences; nothing was requested.
    NoPreferences,
    /// No provider is configured; articles are synthetic.
    Unconfigured,
    /// Articles came from the provider.
    Provider,
    /// The provider failed; articles are synthetic.
    Degraded,
}

#[derive(Debug, Clone)]
pub struct NewsFeed {
    pub origin: FeedOrigin,
    pub articles: Vec<Article>,
}

pub struct NewsFetcher {
    provider: Option<Arc<dyn NewsProvider>>,
}

impl NewsFetcher {
    pub fn new(provider: Arc<dyn NewsProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// A fetcher that always serves synthetic articles.
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Uses the NewsAPI client when a real key is configured.
    pub fn from_config(config: &Config) -> Result<Self, NewsError> {
        if !config.news_api_configured() {
            log::info!("NEWS_API_KEY not configured, serving synthetic news");
            return Ok(Self::unconfigured());
        }
        let client = NewsApiClient::new(
            &config.news_api_url,
            &config.news_api_key,
            config.news_timeout,
        )?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns the articles for `preferences`. Never fails.
    pub async fn fetch_news(&self, preferences: &[String]) -> Vec<Article> {
        self.fetch(preferences).await.articles
    }

    pub async fn fetch(&self, preferences: &[String]) -> NewsFeed {
        if preferences.is_empty() {
            return NewsFeed {
                origin: FeedOrigin::NoPreferences,
                articles: Vec::new(),
            };
        }

        let provider = match &self.provider {
            Some(provider) => provider,
            None => {
                return NewsFeed {
                    origin: FeedOrigin::Unconfigured,
                    articles: synthetic_articles(preferences),
                }
            }
        };

        let query = build_query(preferences);
        match provider.search(&query).await {
            Ok(articles) => NewsFeed {
                origin: FeedOrigin::Provider,
                articles,
            },
            Err(err) => {
                log::warn!("news provider failed for {:?}, degrading: {}", query, err);
                NewsFeed {
                    origin: FeedOrigin::Degraded,
                    articles: synthetic_articles(preferences),
                }
            }
        }
    }
}

/// Joins preference terms into a disjunctive search query.
pub fn build_query(preferences: &[String]) -> String {
    preferences.join(QUERY_SEPARATOR)
}

/// One placeholder article per preference term.
///
/// Everything except `publishedAt` is derived from the term and its position.
pub fn synthetic_articles(preferences: &[String]) -> Vec<Article> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    preferences
        .iter()
        .enumerate()
        .map(|(index, term)| Article {
            title: Some(format!("Latest news about {}", term)),
            description: Some(format!("This is a sample news article about {}", term)),
            url: Some(format!("https://example.com/news/{}-{}", term, index)),
            published_at: Some(now.clone()),
            source: SYNTHETIC_SOURCE.to_string(),
        })
        .collect()
}
