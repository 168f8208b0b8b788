//! Data Transfer Objects - request types for the API.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/blogs`.
///
/// Values stay as raw strings so the server can apply its own parsing rules
/// (`published=all`, comma-separated `tags`) and report bad input as
/// validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlogsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Comma-separated; a post matches when it has any of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// `true` (default), `false`, or `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListBlogsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tags
            .into_iter()
            .map(|t| t.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.tags = Some(joined);
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published.to_string());
        self
    }

    /// Include drafts as well as published posts.
    pub fn all_posts(mut self) -> Self {
        self.published = Some("all".to_string());
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured.to_string());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Query string of `GET /api/blogs/{slug}` and `/related`.
///
/// Drafts answer 404 unless `published` opts them in, using the same values
/// as [`ListBlogsQuery::published`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBlogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl GetBlogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the post whether or not it is published.
    pub fn all_posts(mut self) -> Self {
        self.published = Some("all".to_string());
        self
    }
}
