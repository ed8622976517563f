use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default port of the news service.
pub const DEFAULT_NEWS_PORT: u16 = 3001;
/// Default port of the task service.
pub const DEFAULT_TASKS_PORT: u16 = 3000;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";
/// Placeholder API key. While it is in effect the news provider is treated as unconfigured.
pub const NEWS_API_KEY_PLACEHOLDER: &str = "your-news-api-key";
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

const DEFAULT_NEWS_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Process configuration for both services.
#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// HMAC secret used to sign and verify bearer tokens.
    pub jwt_secret: String,
    pub news_api_key: String,
    pub news_api_url: String,
    /// Upper bound on a single call to the news provider.
    pub news_timeout: Duration,
    pub bcrypt_cost: u32,
    /// Optional JSON file with initial tasks for the task service.
    pub tasks_seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: DEFAULT_NEWS_PORT,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            news_api_key: NEWS_API_KEY_PLACEHOLDER.to_string(),
            news_api_url: DEFAULT_NEWS_API_URL.to_string(),
            news_timeout: Duration::from_secs(DEFAULT_NEWS_TIMEOUT_SECS),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            tasks_seed_file: None,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment, falling back to
    /// literal defaults for anything unset.
    pub fn from_env(default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(default_port, |key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_number(&lookup, "PORT")?.unwrap_or(default_port),
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            news_api_key: lookup("NEWS_API_KEY").unwrap_or(defaults.news_api_key),
            news_api_url: lookup("NEWS_API_URL").unwrap_or(defaults.news_api_url),
            news_timeout: parse_number(&lookup, "NEWS_API_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.news_timeout),
            bcrypt_cost: parse_number(&lookup, "BCRYPT_COST")?.unwrap_or(defaults.bcrypt_cost),
            tasks_seed_file: lookup("TASKS_SEED_FILE")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    /// Whether a real news API key has been supplied.
    pub fn news_api_configured(&self) -> bool {
        !self.news_api_key.is_empty() && self.news_api_key != NEWS_API_KEY_PLACEHOLDER
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}
