//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

pub const DEFAULT_AUTHOR: &str = "Harsh Kadiya";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseSettings>,
    pub blog: BlogSettings,
}

/// Connection settings for the blog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Defaults applied to blog writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSettings {
    pub default_author: String,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseSettings {
                url,
                max_connections: parse_or(lookup("DB_MAX_CONNECTIONS"), 20),
                min_connections: parse_or(lookup("DB_MIN_CONNECTIONS"), 2),
            });

        let blog = BlogSettings {
            default_author: lookup("BLOG_DEFAULT_AUTHOR")
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(lookup("PORT"), 8080),
            database,
            blog,
        }
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
