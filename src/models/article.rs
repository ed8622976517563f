use serde::{Deserialize, Serialize};

/// A news item as returned by `GET /news`.
///
/// Text fields pass through whatever the provider sent, including nulls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsResponse {
    pub news: Vec<Article>,
}
