use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use folio_core::domain::{BlogDraft, BlogPost, BlogSummary};
use folio_shared::{
    ApiResponse, CounterResponse, ErrorResponse, GetBlogQuery, ListBlogsQuery, Pagination,
};

use crate::ClientError;

/// One page of the blog list.
#[derive(Debug, Clone)]
pub struct BlogPage {
    pub data: Vec<BlogSummary>,
    pub pagination: Pagination,
}

/// HTTP client for the blog API.
///
/// No retries, caching or request deduplication.
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BlogClient {
    /// Client for the server at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET /api/blogs
    pub async fn list(&self, query: &ListBlogsQuery) -> Result<BlogPage, ClientError> {
        let request = self.request(Method::GET, &[])?.query(query);
        let body: ApiResponse<Vec<BlogSummary>> = decode(send(request).await?).await?;

        let pagination = body
            .pagination
            .ok_or_else(|| ClientError::Decode("missing pagination".to_string()))?;
        Ok(BlogPage {
            data: body.data.unwrap_or_default(),
            pagination,
        })
    }

    /// GET /api/blogs/{slug}, `None` when no published post has that slug.
    pub async fn get(&self, slug: &str) -> Result<Option<BlogPost>, ClientError> {
        self.get_with(slug, &GetBlogQuery::new()).await
    }

    /// Like [`get`](Self::get); `GetBlogQuery::new().all_posts()` also finds drafts.
    pub async fn get_with(
        &self,
        slug: &str,
        query: &GetBlogQuery,
    ) -> Result<Option<BlogPost>, ClientError> {
        let response = self.request(Method::GET, &[slug])?.query(query).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(slug, "Blog not found");
            return Ok(None);
        }

        let body: ApiResponse<BlogPost> = decode(check(response).await?).await?;
        data(body).map(Some)
    }

    /// GET /api/blogs/{slug}/related
    pub async fn related(&self, slug: &str) -> Result<Vec<BlogSummary>, ClientError> {
        let response = send(self.request(Method::GET, &[slug, "related"])?).await?;
        let body: ApiResponse<Vec<BlogSummary>> = decode(response).await?;
        data(body)
    }

    /// POST /api/blogs
    pub async fn create(&self, draft: &BlogDraft) -> Result<BlogPost, ClientError> {
        let request = self.request(Method::POST, &[])?.json(draft);
        data(decode(send(request).await?).await?)
    }

    /// PUT /api/blogs/{slug}
    pub async fn update(&self, slug: &str, draft: &BlogDraft) -> Result<BlogPost, ClientError> {
        let request = self.request(Method::PUT, &[slug])?.json(draft);
        data(decode(send(request).await?).await?)
    }

    /// DELETE /api/blogs/{slug}
    pub async fn delete(&self, slug: &str) -> Result<(), ClientError> {
        send(self.request(Method::DELETE, &[slug])?).await?;
        Ok(())
    }

    /// POST /api/blogs/{slug}/like, returning the new like count.
    pub async fn like(&self, slug: &str) -> Result<i64, ClientError> {
        let response = send(self.request(Method::POST, &[slug, "like"])?).await?;
        let body: CounterResponse = decode(response).await?;
        body.likes
            .ok_or_else(|| ClientError::Decode("missing likes".to_string()))
    }

    /// POST /api/blogs/{slug}/view, returning the new view count.
    pub async fn view(&self, slug: &str) -> Result<i64, ClientError> {
        let response = send(self.request(Method::POST, &[slug, "view"])?).await?;
        let body: CounterResponse = decode(response).await?;
        body.views
            .ok_or_else(|| ClientError::Decode("missing views".to_string()))
    }

    /// Request to `/api/blogs/<segments..>`; segments are percent-encoded.
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "blogs"])
            .extend(segments);
        Ok(self.http.request(method, url))
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    check(request.send().await?).await
}

/// Turn a non-2xx response into [`ClientError::Server`].
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    tracing::debug!(%status, %message, "Blog API request failed");
    Err(ClientError::Server { status, message })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

fn data<T>(body: ApiResponse<T>) -> Result<T, ClientError> {
    body.data
        .ok_or_else(|| ClientError::Decode("missing data".to_string()))
}
