use async_trait::async_trait;

use crate::domain::{BlogFields, BlogFilter, BlogPost, Counter, PageRequest};
use crate::error::RepoError;

/// Blog record store. Slugs are the external identifier and are unique.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Find a post by slug, whatever its publication state.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError>;

    /// One page of matching posts, newest first.
    async fn find_many(
        &self,
        filter: &BlogFilter,
        page: PageRequest,
    ) -> Result<Vec<BlogPost>, RepoError>;

    /// Number of posts matching `filter`, ignoring pagination.
    async fn count(&self, filter: &BlogFilter) -> Result<u64, RepoError>;

    async fn insert(&self, fields: BlogFields) -> Result<BlogPost, RepoError>;

    /// Replace the editable fields of the post currently at `slug`.
    async fn update_by_slug(&self, slug: &str, fields: BlogFields) -> Result<BlogPost, RepoError>;

    async fn delete_by_slug(&self, slug: &str) -> Result<(), RepoError>;

    /// Atomically add one to a counter and return the new value.
    async fn increment(&self, slug: &str, counter: Counter) -> Result<i64, RepoError>;

    /// Remove every post, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, RepoError>;
}
