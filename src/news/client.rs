// HTTP client for NewsAPI-compatible search endpoints

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{NewsError, NewsProvider};
use crate::models::Article;

/// Maximum number of articles requested per search.
pub const PAGE_SIZE: u32 = 10;
const SORT_BY: &str = "publishedAt";
const UNKNOWN_SOURCE: &str = "Unknown";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<String>,
    source: Option<RawSource>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            title: raw.title,
            description: raw.description,
            url: raw.url,
            published_at: raw.published_at,
            source: raw
                .source
                .and_then(|s| s.name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        }
    }
}

pub struct NewsApiClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl NewsApiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, NewsError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError> {
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("apiKey", self.api_key.as_str()),
                ("pageSize", page_size.as_str()),
                ("sortBy", SORT_BY),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.articles.into_iter().map(Article::from).collect())
    }
}
