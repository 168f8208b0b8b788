//! PostgreSQL blog repository.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DbConn, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};

use folio_core::domain::{BlogFields, BlogFilter, BlogPost, Counter, PageRequest, Visibility};
use folio_core::error::RepoError;
use folio_core::ports::BlogRepository;

use super::connections::DatabaseConnections;
use super::entity::blog::{self, Entity as BlogEntity};

/// PostgreSQL blog repository backed by the `blogs` table.
pub struct PostgresBlogRepository {
    connections: Arc<DatabaseConnections>,
}

impl PostgresBlogRepository {
    pub fn new(connections: Arc<DatabaseConnections>) -> Self {
        Self { connections }
    }

    async fn db(&self) -> Result<&DbConn, RepoError> {
        self.connections
            .main()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }
}

fn query_error(err: DbErr) -> RepoError {
    RepoError::Query(err.to_string())
}

/// The primary key is a random UUID, so a unique violation on write can only
/// come from the slug index.
fn write_error(err: DbErr, slug: &str) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepoError::duplicate_slug(slug),
        _ => query_error(err),
    }
}

fn counter_column(counter: Counter) -> blog::Column {
    match counter {
        Counter::Views => blog::Column::Views,
        Counter::Likes => blog::Column::Likes,
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Translate a list filter into a WHERE condition.
pub(crate) fn filter_condition(filter: &BlogFilter) -> Condition {
    let mut condition = Condition::all();

    match filter.visibility {
        Visibility::Published => condition = condition.add(blog::Column::Published.eq(true)),
        Visibility::Drafts => condition = condition.add(blog::Column::Published.eq(false)),
        Visibility::All => {}
    }

    if let Some(category) = &filter.category {
        condition = condition.add(blog::Column::Category.eq(category.as_str()));
    }

    if !filter.tags.is_empty() {
        // array overlap: any shared tag
        condition = condition.add(Expr::cust_with_values(
            r#""blogs"."tags" && ?"#,
            [filter.tags.clone()],
        ));
    }

    if let Some(slug) = &filter.exclude_slug {
        condition = condition.add(blog::Column::Slug.ne(slug.as_str()));
    }

    if let Some(featured) = filter.featured {
        condition = condition.add(blog::Column::Featured.eq(featured));
    }

    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        let any_field = [
            blog::Column::Title,
            blog::Column::Excerpt,
            blog::Column::Content,
        ]
        .into_iter()
        .fold(Condition::any(), |any, column| {
            any.add(
                Expr::expr(Func::lower(Expr::col((blog::Entity, column))))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
        });
        condition = condition.add(any_field);
    }

    condition
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        tracing::debug!(slug, "Finding blog by slug");

        let result = BlogEntity::find()
            .filter(blog::Column::Slug.eq(slug))
            .one(self.db().await?)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_many(
        &self,
        filter: &BlogFilter,
        page: PageRequest,
    ) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogEntity::find()
            .filter(filter_condition(filter))
            .order_by_desc(blog::Column::CreatedAt)
            .order_by_desc(blog::Column::Id)
            .offset(page.offset())
            .limit(page.limit)
            .all(self.db().await?)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &BlogFilter) -> Result<u64, RepoError> {
        BlogEntity::find()
            .filter(filter_condition(filter))
            .count(self.db().await?)
            .await
            .map_err(query_error)
    }

    async fn insert(&self, fields: BlogFields) -> Result<BlogPost, RepoError> {
        fields.validate()?;
        let slug = fields.slug.clone();

        let active_model: blog::ActiveModel = BlogPost::new(fields).into();
        let model = active_model
            .insert(self.db().await?)
            .await
            .map_err(|e| write_error(e, &slug))?;

        tracing::debug!(slug = %model.slug, "Blog inserted");
        Ok(model.into())
    }

    async fn update_by_slug(&self, slug: &str, fields: BlogFields) -> Result<BlogPost, RepoError> {
        fields.validate()?;
        let db = self.db().await?;
        let new_slug = fields.slug.clone();

        let existing = BlogEntity::find()
            .filter(blog::Column::Slug.eq(slug))
            .one(db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let mut active_model: blog::ActiveModel = BlogPost::from(existing).replace(fields).into();
        // Counters only move through increment(); leaving them out of the
        // UPDATE keeps concurrent increments intact.
        active_model.views = ActiveValue::NotSet;
        active_model.likes = ActiveValue::NotSet;

        let model = active_model.update(db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => RepoError::NotFound,
            other => write_error(other, &new_slug),
        })?;

        Ok(model.into())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<(), RepoError> {
        let result = BlogEntity::delete_many()
            .filter(blog::Column::Slug.eq(slug))
            .exec(self.db().await?)
            .await
            .map_err(query_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn increment(&self, slug: &str, counter: Counter) -> Result<i64, RepoError> {
        let column = counter_column(counter);

        // Single UPDATE ... SET col = col + 1 RETURNING *, never read-modify-write.
        let updated = BlogEntity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(blog::Column::Slug.eq(slug))
            .exec_with_returning(self.db().await?)
            .await
            .map_err(query_error)?;

        let model = updated.into_iter().next().ok_or(RepoError::NotFound)?;
        Ok(BlogPost::from(model).counter(counter))
    }

    async fn delete_all(&self) -> Result<u64, RepoError> {
        let result = BlogEntity::delete_many()
            .exec(self.db().await?)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }
}
