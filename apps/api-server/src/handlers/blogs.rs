//! Blog handlers.

use actix_web::{HttpRequest, HttpResponse, web};

use folio_core::ValidationErrors;
use folio_core::domain::{
    BlogDraft, BlogFilter, BlogPost, BlogSummary, Counter, DEFAULT_LIMIT, DEFAULT_PAGE,
    PageRequest, RELATED_LIMIT, Visibility,
};
use folio_shared::{ApiResponse, CounterResponse, GetBlogQuery, ListBlogsQuery, Pagination};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/blogs
pub async fn list_blogs(
    state: web::Data<AppState>,
    query: web::Query<ListBlogsQuery>,
) -> AppResult<HttpResponse> {
    let (filter, page) = list_criteria(&query)?;

    // Same filter for both, so total always agrees with the page.
    let (posts, total) = futures::try_join!(
        state.blogs.find_many(&filter, page),
        state.blogs.count(&filter)
    )?;
    tracing::debug!(total, returned = posts.len(), page = page.page, "Listed blogs");

    let data: Vec<BlogSummary> = posts.into_iter().map(BlogSummary::from).collect();
    let pagination = Pagination::new(page.page, page.limit, total);

    Ok(HttpResponse::Ok().json(ApiResponse::paginated(data, pagination)))
}

/// POST /api/blogs
pub async fn create_blog(
    state: web::Data<AppState>,
    body: web::Json<BlogDraft>,
) -> AppResult<HttpResponse> {
    let fields = body.into_inner().prepare(&state.settings.default_author)?;
    let post = state.blogs.insert(fields).await?;

    tracing::info!(slug = %post.slug, published = post.published, "Blog created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// GET /api/blogs/{slug}
///
/// Drafts are hidden unless `published=all` (or `false`) asks for them.
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<GetBlogQuery>,
) -> AppResult<HttpResponse> {
    let post = find_visible(&state, path.into_inner(), &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// GET /api/blogs/{slug}/related
///
/// Up to two other published posts from the same category.
pub async fn related_blogs(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<GetBlogQuery>,
) -> AppResult<HttpResponse> {
    let post = find_visible(&state, path.into_inner(), &query).await?;

    let page = PageRequest {
        page: DEFAULT_PAGE,
        limit: RELATED_LIMIT,
    };
    let related: Vec<BlogSummary> = state
        .blogs
        .find_many(&BlogFilter::related_to(&post), page)
        .await?
        .into_iter()
        .map(BlogSummary::from)
        .collect();
    tracing::debug!(slug = %post.slug, related = related.len(), "Found related blogs");

    Ok(HttpResponse::Ok().json(ApiResponse::ok(related)))
}

async fn find_visible(
    state: &AppState,
    slug: String,
    query: &GetBlogQuery,
) -> AppResult<BlogPost> {
    let visibility = visibility(query.published.as_deref());
    match state.blogs.find_by_slug(&slug).await? {
        Some(post) if visibility.admits(post.published) => Ok(post),
        _ => Err(AppError::NotFound(slug)),
    }
}

/// PUT /api/blogs/{slug}
///
/// Replaces every editable field. Without a `slug` in the body the post keeps
/// its current one.
pub async fn update_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<BlogDraft>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let mut draft = body.into_inner();
    if draft.slug.as_deref().is_none_or(|s| s.trim().is_empty()) {
        draft.slug = Some(slug.clone());
    }

    let fields = draft.prepare(&state.settings.default_author)?;
    let post = state.blogs.update_by_slug(&slug, fields).await?;

    tracing::info!(slug = %slug, new_slug = %post.slug, "Blog updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/blogs/{slug}
pub async fn delete_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    state.blogs.delete_by_slug(&slug).await?;

    tracing::info!(slug = %slug, "Blog deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({}))))
}

/// POST /api/blogs/{slug}/like
pub async fn like_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let likes = state
        .blogs
        .increment(&path.into_inner(), Counter::Likes)
        .await?;
    Ok(HttpResponse::Ok().json(CounterResponse::likes(likes)))
}

/// POST /api/blogs/{slug}/view
pub async fn view_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let views = state
        .blogs
        .increment(&path.into_inner(), Counter::Views)
        .await?;
    Ok(HttpResponse::Ok().json(CounterResponse::views(views)))
}

/// Fallback for any unsupported method on a blog route.
pub async fn method_not_allowed(req: HttpRequest) -> AppResult<HttpResponse> {
    tracing::debug!(method = %req.method(), path = %req.path(), "Method not allowed");
    Err(AppError::MethodNotAllowed(req.method().to_string()))
}

/// Turn raw query parameters into a filter and a page.
///
/// Empty values count as absent, except `published`, where anything other
/// than `true` or `all` selects drafts.
pub fn list_criteria(query: &ListBlogsQuery) -> Result<(BlogFilter, PageRequest), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let page = parse_count("page", query.page.as_deref(), DEFAULT_PAGE, &mut errors);
    let limit = parse_count("limit", query.limit.as_deref(), DEFAULT_LIMIT, &mut errors);
    errors.into_result()?;
    let page = PageRequest::new(page, limit)?;

    let tags = non_empty(query.tags.as_deref())
        .map(|tags| {
            tags.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let filter = BlogFilter {
        visibility: visibility(query.published.as_deref()),
        category: non_empty(query.category.as_deref()).map(String::from),
        tags,
        featured: query.featured.as_deref().map(|f| f == "true"),
        search: non_empty(query.search.as_deref()).map(String::from),
        exclude_slug: None,
    };

    Ok((filter, page))
}

/// `published` parameter: unset or `true`, `all`, anything else for drafts.
fn visibility(published: Option<&str>) -> Visibility {
    match published {
        None | Some("true") => Visibility::Published,
        Some("all") => Visibility::All,
        Some(_) => Visibility::Drafts,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_count(
    field: &'static str,
    raw: Option<&str>,
    default: u64,
    errors: &mut ValidationErrors,
) -> u64 {
    match non_empty(raw) {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            errors.add(field, format!("{field} must be a positive integer"));
            default
        }),
    }
}
