//! # Folio Shared
//!
//! Wire types shared between the API server and its clients.

pub mod dto;
pub mod response;

pub use dto::{GetBlogQuery, ListBlogsQuery};
pub use response::{ApiResponse, CounterResponse, ErrorResponse, Pagination};
