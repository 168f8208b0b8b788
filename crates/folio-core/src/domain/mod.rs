//! Domain entities - the core business objects.

mod blog;
mod filter;
mod read_time;
mod slug;

pub use blog::{
    BlogDraft, BlogFields, BlogPost, BlogSummary, Counter, EXCERPT_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use filter::{
    BlogFilter, DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, RELATED_LIMIT, Visibility,
};
pub use read_time::{WORDS_PER_MINUTE, estimate_read_time};
pub use slug::{is_valid_slug, normalize_slug, slugify};
