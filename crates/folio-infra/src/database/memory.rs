//! In-memory blog repository - used when no database is configured and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use folio_core::domain::{BlogFields, BlogFilter, BlogPost, Counter, PageRequest};
use folio_core::error::RepoError;
use folio_core::ports::BlogRepository;

/// In-memory blog store using a Vec behind an async RwLock.
///
/// Posts are kept in insertion order. Note: data is lost on process restart.
pub struct InMemoryBlogRepository {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    fn position(posts: &[BlogPost], slug: &str) -> Option<usize> {
        posts.iter().position(|p| p.slug == slug)
    }

    /// Matching posts, newest first.
    fn matching<'a>(posts: &'a [BlogPost], filter: &BlogFilter) -> Vec<&'a BlogPost> {
        let mut matching: Vec<&BlogPost> =
            posts.iter().rev().filter(|p| filter.matches(p)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

impl Default for InMemoryBlogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.slug == slug).cloned())
    }

    async fn find_many(
        &self,
        filter: &BlogFilter,
        page: PageRequest,
    ) -> Result<Vec<BlogPost>, RepoError> {
        let posts = self.posts.read().await;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit).unwrap_or(usize::MAX);

        Ok(Self::matching(&posts, filter)
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &BlogFilter) -> Result<u64, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn insert(&self, fields: BlogFields) -> Result<BlogPost, RepoError> {
        fields.validate()?;

        let mut posts = self.posts.write().await;
        if Self::position(&posts, &fields.slug).is_some() {
            return Err(RepoError::duplicate_slug(&fields.slug));
        }

        let post = BlogPost::new(fields);
        posts.push(post.clone());
        Ok(post)
    }

    async fn update_by_slug(&self, slug: &str, fields: BlogFields) -> Result<BlogPost, RepoError> {
        fields.validate()?;

        let mut posts = self.posts.write().await;
        let index = Self::position(&posts, slug).ok_or(RepoError::NotFound)?;

        if fields.slug != slug && Self::position(&posts, &fields.slug).is_some() {
            return Err(RepoError::duplicate_slug(&fields.slug));
        }

        let updated = posts[index].clone().replace(fields);
        posts[index] = updated.clone();
        Ok(updated)
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), RepoError> {
        let mut posts = self.posts.write().await;
        let index = Self::position(&posts, slug).ok_or(RepoError::NotFound)?;
        posts.remove(index);
        Ok(())
    }

    async fn increment(&self, slug: &str, counter: Counter) -> Result<i64, RepoError> {
        // The write lock covers the whole read-increment-store.
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.slug == slug)
            .ok_or(RepoError::NotFound)?;
        Ok(post.increment(counter))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        Ok(removed)
    }
}
