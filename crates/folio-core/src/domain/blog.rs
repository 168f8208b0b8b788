use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::read_time::estimate_read_time;
use super::slug::{is_valid_slug, normalize_slug, slugify};
use crate::error::ValidationErrors;

pub const TITLE_MAX_CHARS: usize = 200;
pub const EXCERPT_MAX_CHARS: usize = 500;

/// Blog post entity - the only document the store holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: String,
    pub views: i64,
    pub likes: i64,
    pub published: bool,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with zeroed counters and fresh timestamps.
    pub fn new(fields: BlogFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug: fields.slug,
            title: fields.title,
            excerpt: fields.excerpt,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            author: fields.author,
            read_time: fields.read_time,
            views: 0,
            likes: 0,
            published: fields.published,
            featured: fields.featured,
            cover_image: fields.cover_image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field, keeping identity, counters and
    /// `created_at`.
    pub fn replace(self, fields: BlogFields) -> Self {
        Self {
            slug: fields.slug,
            title: fields.title,
            excerpt: fields.excerpt,
            content: fields.content,
            category: fields.category,
            tags: fields.tags,
            author: fields.author,
            read_time: fields.read_time,
            published: fields.published,
            featured: fields.featured,
            cover_image: fields.cover_image,
            updated_at: Utc::now(),
            ..self
        }
    }

    pub fn counter(&self, counter: Counter) -> i64 {
        match counter {
            Counter::Views => self.views,
            Counter::Likes => self.likes,
        }
    }

    /// Bump a counter by one and return the new value.
    pub fn increment(&mut self, counter: Counter) -> i64 {
        let value = match counter {
            Counter::Views => &mut self.views,
            Counter::Likes => &mut self.likes,
        };
        *value += 1;
        *value
    }
}

/// List view of a post: everything but the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: String,
    pub views: i64,
    pub likes: i64,
    pub published: bool,
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BlogPost> for BlogSummary {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id,
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            category: post.category,
            tags: post.tags,
            author: post.author,
            read_time: post.read_time,
            views: post.views,
            likes: post.likes,
            published: post.published,
            featured: post.featured,
            cover_image: post.cover_image,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// The two public counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Likes,
}

/// Write payload for create and update, as sent by clients.
///
/// Every field is optional on the wire so that missing values surface as
/// field errors from [`BlogDraft::prepare`] rather than as decode failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl BlogDraft {
    /// Fill in derived fields and validate the result.
    ///
    /// A missing slug is derived from the title and a missing read time from
    /// the content; a missing author falls back to `default_author`.
    pub fn prepare(self, default_author: &str) -> Result<BlogFields, ValidationErrors> {
        let title = trimmed(self.title).unwrap_or_default();
        let slug = trimmed(self.slug)
            .map(|s| normalize_slug(&s))
            .unwrap_or_else(|| slugify(&title));
        let content = self.content.unwrap_or_default();
        let read_time = trimmed(self.read_time).unwrap_or_else(|| estimate_read_time(&content));

        let fields = BlogFields {
            slug,
            title,
            excerpt: self.excerpt.unwrap_or_default(),
            content,
            category: trimmed(self.category).unwrap_or_default(),
            tags: self
                .tags
                .into_iter()
                .filter_map(|t| trimmed(Some(t)))
                .collect(),
            author: trimmed(self.author).unwrap_or_else(|| default_author.trim().to_string()),
            read_time,
            published: self.published.unwrap_or(false),
            featured: self.featured.unwrap_or(false),
            cover_image: trimmed(self.cover_image),
        };

        fields.validate()?;
        Ok(fields)
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validated, fully-derived editable fields of a post.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogFields {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: String,
    pub published: bool,
    pub featured: bool,
    pub cover_image: Option<String>,
}

impl BlogFields {
    /// Check required fields and length limits.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", "Please provide a title");
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors.add(
                "title",
                format!("Title cannot be more than {TITLE_MAX_CHARS} characters"),
            );
        }

        if self.slug.is_empty() {
            errors.add("slug", "Please provide a slug");
        } else if !is_valid_slug(&self.slug) {
            errors.add(
                "slug",
                "Slug may only contain lowercase letters, digits, hyphens and underscores",
            );
        }

        if self.excerpt.trim().is_empty() {
            errors.add("excerpt", "Please provide an excerpt");
        } else if self.excerpt.chars().count() > EXCERPT_MAX_CHARS {
            errors.add(
                "excerpt",
                format!("Excerpt cannot be more than {EXCERPT_MAX_CHARS} characters"),
            );
        }

        if self.content.trim().is_empty() {
            errors.add("content", "Please provide content");
        }
        if self.category.trim().is_empty() {
            errors.add("category", "Please provide a category");
        }
        if self.author.trim().is_empty() {
            errors.add("author", "Please provide an author");
        }
        if self.read_time.trim().is_empty() {
            errors.add("readTime", "Please provide read time");
        }

        errors.into_result()
    }
}
