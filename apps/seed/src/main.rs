//! Seed CLI: load blog drafts from a JSON fixture into PostgreSQL.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use folio_core::domain::{BlogDraft, BlogFields};
use folio_core::ports::BlogRepository;
use folio_infra::{DatabaseConfig, DatabaseConnections, PostgresBlogRepository};

const DEFAULT_AUTHOR: &str = "Harsh Kadiya";

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Populate the blog store from a JSON fixture")]
struct Cli {
    /// JSON array of blog drafts
    #[arg(long, value_name = "PATH", default_value = "fixtures/blogs.json")]
    fixture: PathBuf,

    /// Keep existing posts instead of clearing the store first
    #[arg(long)]
    keep: bool,

    /// How many of the first posts to mark as featured
    #[arg(long, value_name = "N", default_value_t = 3)]
    featured: usize,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    #[arg(long, env = "BLOG_DEFAULT_AUTHOR", default_value = DEFAULT_AUTHOR)]
    author: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let posts = load_fixture(&cli.fixture, cli.featured, &cli.author)?;

    let connections = Arc::new(DatabaseConnections::lazy(DatabaseConfig::new(
        &cli.database_url,
    )));
    let repo = PostgresBlogRepository::new(connections);

    if !cli.keep {
        let removed = repo.delete_all().await.context("Failed to clear blogs")?;
        tracing::info!(removed, "Cleared existing blogs");
    }

    let mut inserted = Vec::with_capacity(posts.len());
    for fields in posts {
        let slug = fields.slug.clone();
        let post = repo
            .insert(fields)
            .await
            .with_context(|| format!("Failed to insert '{slug}'"))?;
        inserted.push(post);
    }
    tracing::info!(count = inserted.len(), "Seeded blogs");

    for post in inserted.iter().take(3) {
        tracing::info!(
            slug = %post.slug,
            title = %post.title,
            category = %post.category,
            featured = post.featured,
            "Sample"
        );
    }

    Ok(())
}

/// Read the fixture and prepare each draft the way the API would, publishing
/// every post and featuring the first `featured`.
fn load_fixture(path: &Path, featured: usize, author: &str) -> anyhow::Result<Vec<BlogFields>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    let drafts: Vec<BlogDraft> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid fixture {}", path.display()))?;

    drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| {
            let title = draft.title.clone().unwrap_or_default();
            BlogDraft {
                published: Some(true),
                featured: Some(i < featured),
                ..draft
            }
            .prepare(author)
            .map_err(|e| anyhow::anyhow!("Fixture entry {i} ('{title}'): {e}"))
        })
        .collect()
}
