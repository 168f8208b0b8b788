//! List filters and pagination.

use super::blog::BlogPost;
use crate::error::ValidationErrors;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
/// How many related posts accompany a post.
pub const RELATED_LIMIT: u64 = 2;

/// Which publication states a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Published,
    Drafts,
    All,
}

impl Visibility {
    pub fn admits(&self, published: bool) -> bool {
        match self {
            Visibility::Published => published,
            Visibility::Drafts => !published,
            Visibility::All => true,
        }
    }
}

/// Criteria for listing and counting posts. All criteria are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    pub visibility: Visibility,
    /// Exact category match.
    pub category: Option<String>,
    /// Matches posts carrying at least one of these tags.
    pub tags: Vec<String>,
    pub featured: Option<bool>,
    /// Case-insensitive substring of title, excerpt or content.
    pub search: Option<String>,
    /// Leaves out the post with this slug.
    pub exclude_slug: Option<String>,
}

impl BlogFilter {
    /// Other published posts in the same category as `post`.
    pub fn related_to(post: &BlogPost) -> Self {
        Self {
            category: Some(post.category.clone()),
            exclude_slug: Some(post.slug.clone()),
            ..Self::default()
        }
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        if !self.visibility.admits(post.published) {
            return false;
        }

        if self.exclude_slug.as_deref() == Some(post.slug.as_str()) {
            return false;
        }

        if let Some(category) = &self.category {
            if &post.category != category {
                return false;
            }
        }

        if !self.tags.is_empty() && !post.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if let Some(featured) = self.featured {
            if post.featured != featured {
                return false;
            }
        }

        match &self.search {
            Some(needle) => {
                let needle = needle.to_lowercase();
                [&post.title, &post.excerpt, &post.content]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// A 1-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if page == 0 {
            errors.add("page", "page must be at least 1");
        }
        if limit == 0 {
            errors.add("limit", "limit must be at least 1");
        }
        errors.into_result()?;
        Ok(Self { page, limit })
    }

    /// Number of documents to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}
