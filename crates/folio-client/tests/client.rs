use actix_web::{App, HttpServer, web};
use reqwest::StatusCode;

use api_server::config::BlogSettings;
use api_server::handlers::configure_routes;
use api_server::state::AppState;
use folio_client::{BlogClient, ClientError};
use folio_core::domain::BlogDraft;
use folio_shared::{GetBlogQuery, ListBlogsQuery};

/// Starts the API on an ephemeral port, backed by a fresh in-memory store.
fn spawn_server() -> BlogClient {
    let state = AppState::in_memory(BlogSettings::default());
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    BlogClient::new(&format!("http://{addr}")).unwrap()
}

fn draft(title: &str, category: &str, tags: &[&str]) -> BlogDraft {
    BlogDraft {
        title: Some(title.to_string()),
        excerpt: Some(format!("About {title}")),
        content: Some("A handful of words".to_string()),
        category: Some(category.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        published: Some(true),
        ..Default::default()
    }
}

#[actix_rt::test]
async fn create_get_update_delete() {
    let client = spawn_server();

    let created = client.create(&draft("Client Post", "Rust", &["rust"])).await.unwrap();
    assert_eq!(created.slug, "client-post");
    assert_eq!(created.read_time, "1 min read");
    assert_eq!(created.author, "Harsh Kadiya");

    let fetched = client.get("client-post").await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.content, "A handful of words");

    let mut changes = draft("Client Post", "Go", &["go"]);
    changes.content = Some("word ".repeat(201));
    let updated = client.update("client-post", &changes).await.unwrap();
    assert_eq!(updated.category, "Go");
    assert_eq!(updated.read_time, "2 min read");
    assert_eq!(updated.created_at, created.created_at);

    client.delete("client-post").await.unwrap();
    assert!(client.get("client-post").await.unwrap().is_none());
}

#[actix_rt::test]
async fn get_missing_is_none() {
    let client = spawn_server();
    assert!(client.get("does-not-exist").await.unwrap().is_none());
}

#[actix_rt::test]
async fn drafts_are_hidden_unless_asked_for() {
    let client = spawn_server();
    let mut hidden = draft("Hidden", "Rust", &[]);
    hidden.published = Some(false);
    client.create(&hidden).await.unwrap();

    assert!(client.get("hidden").await.unwrap().is_none());

    let post = client
        .get_with("hidden", &GetBlogQuery::new().all_posts())
        .await
        .unwrap()
        .unwrap();
    assert!(!post.published);
}

#[actix_rt::test]
async fn related_posts_share_the_category() {
    let client = spawn_server();
    for title in ["Go One", "Go Two", "Go Three"] {
        client.create(&draft(title, "Go", &[])).await.unwrap();
    }
    client.create(&draft("Rust One", "Rust", &[])).await.unwrap();

    let related = client.related("go-one").await.unwrap();
    assert_eq!(related.len(), 2);
    assert!(related.iter().all(|p| p.category == "Go" && p.slug != "go-one"));

    assert!(client.related("rust-one").await.unwrap().is_empty());

    let err = client.related("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[actix_rt::test]
async fn list_filters_and_paginates() {
    let client = spawn_server();
    for i in 1..=3 {
        client
            .create(&draft(&format!("Flutter {i}"), "Flutter", &["dart"]))
            .await
            .unwrap();
    }
    client.create(&draft("Rust 1", "Rust", &["rust"])).await.unwrap();

    let page = client
        .list(&ListBlogsQuery::new().category("Flutter").limit(2))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].slug, "flutter-3");
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.total_pages, 2);

    let page = client
        .list(&ListBlogsQuery::new().tags(["rust", "missing"]))
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.data[0].slug, "rust-1");
}

#[actix_rt::test]
async fn counters_return_new_values() {
    let client = spawn_server();
    client.create(&draft("Counted", "Rust", &[])).await.unwrap();

    assert_eq!(client.like("counted").await.unwrap(), 1);
    assert_eq!(client.like("counted").await.unwrap(), 2);
    assert_eq!(client.view("counted").await.unwrap(), 1);
}

#[actix_rt::test]
async fn server_errors_carry_the_envelope_message() {
    let client = spawn_server();
    client.create(&draft("Taken", "Rust", &[])).await.unwrap();

    let err = client.create(&draft("Taken", "Rust", &[])).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    match err {
        ClientError::Server { message, .. } => assert!(message.contains("taken")),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.like("nobody").await.unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(message, "Blog not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.delete("nobody").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}

#[actix_rt::test]
async fn unreachable_server_is_a_network_error() {
    // Bind then drop, leaving a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = BlogClient::new(&format!("http://{addr}")).unwrap();

    let err = client.get("anything").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
