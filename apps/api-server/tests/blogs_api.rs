use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use api_server::config::BlogSettings;
use api_server::handlers::configure_routes;
use api_server::state::AppState;

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory(BlogSettings::default())))
                .configure(configure_routes),
        )
        .await
    };
}

/// Runs a request and returns the status with the decoded JSON body.
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn draft(title: &str, category: &str, published: bool) -> Value {
    json!({
        "title": title,
        "excerpt": format!("About {title}"),
        "content": "Some words about the topic",
        "category": category,
        "published": published,
    })
}

fn create(body: Value) -> test::TestRequest {
    test::TestRequest::post().uri("/api/blogs").set_json(body)
}

#[actix_web::test]
async fn create_derives_slug_and_read_time() {
    let app = test_app!();

    let body = json!({
        "title": "Test Post",
        "excerpt": "...",
        "content": "word ".repeat(250),
        "category": "Tutorial",
    });
    let (status, body) = call!(app, create(body));

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["slug"], "test-post");
    assert_eq!(body["data"]["readTime"], "2 min read");
    assert_eq!(body["data"]["author"], "Harsh Kadiya");
    assert_eq!(body["data"]["views"], 0);
    assert_eq!(body["data"]["likes"], 0);
    assert_eq!(body["data"]["published"], false);
}

#[actix_web::test]
async fn duplicate_slug_is_rejected() {
    let app = test_app!();

    let (status, _) = call!(app, create(draft("Hello World", "Rust", true)));
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(app, create(draft("Hello, World!", "Rust", true)));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("hello-world"));
}

#[actix_web::test]
async fn missing_fields_are_reported_per_field() {
    let app = test_app!();

    let (status, body) = call!(app, create(json!({ "title": "Only a title" })));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"excerpt"));
    assert!(fields.contains(&"content"));
    assert!(fields.contains(&"category"));
}

#[actix_web::test]
async fn list_hides_drafts_unless_asked() {
    let app = test_app!();
    call!(app, create(draft("Public one", "Rust", true)));
    call!(app, create(draft("Secret one", "Rust", false)));

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/blogs"));
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["slug"], "public-one");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?published=all")
    );
    assert_eq!(body["pagination"]["total"], 2);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?published=false")
    );
    assert_eq!(body["data"][0]["slug"], "secret-one");
    assert_eq!(body["pagination"]["total"], 1);
}

#[actix_web::test]
async fn category_pagination_reports_totals() {
    let app = test_app!();
    for i in 1..=5 {
        call!(app, create(draft(&format!("Flutter {i}"), "Flutter", true)));
    }
    call!(app, create(draft("Rust 1", "Rust", true)));

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?category=Flutter&page=1&limit=2")
    );

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["slug"], "flutter-5");
    assert_eq!(data[1]["slug"], "flutter-4");
    assert!(data.iter().all(|post| post.get("content").is_none()));
    assert_eq!(
        body["pagination"],
        json!({ "page": 1, "limit": 2, "total": 5, "pages": 3 })
    );

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?category=Flutter&page=3&limit=2")
    );
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["slug"], "flutter-1");
}

#[actix_web::test]
async fn tags_match_any_and_search_ignores_case() {
    let app = test_app!();
    let mut dart = draft("Dart Basics", "Flutter", true);
    dart["tags"] = json!(["dart", "mobile"]);
    let mut rust = draft("Rust Ownership", "Rust", true);
    rust["tags"] = json!(["rust"]);
    let mut go = draft("Go Channels", "Go", true);
    go["tags"] = json!(["go"]);
    for body in [dart, rust, go] {
        call!(app, create(body));
    }

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?tags=mobile,rust")
    );
    assert_eq!(body["pagination"]["total"], 2);

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?search=OWNERSHIP")
    );
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["slug"], "rust-ownership");
}

#[actix_web::test]
async fn featured_filter() {
    let app = test_app!();
    let mut featured = draft("Featured", "Rust", true);
    featured["featured"] = json!(true);
    call!(app, create(featured));
    call!(app, create(draft("Plain", "Rust", true)));

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?featured=true")
    );
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["data"][0]["slug"], "featured");

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?featured=false")
    );
    assert_eq!(body["data"][0]["slug"], "plain");
}

#[actix_web::test]
async fn get_hides_drafts_unless_all_is_requested() {
    let app = test_app!();
    call!(app, create(draft("Draft Post", "Rust", false)));

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/draft-post")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Blog not found" }));

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/draft-post?published=all")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["content"], "Some words about the topic");

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/draft-post?published=true")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/no-such-post")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Blog not found" }));
}

#[actix_web::test]
async fn related_lists_two_published_posts_from_the_same_category() {
    let app = test_app!();
    for title in ["Go One", "Go Two", "Go Three"] {
        call!(app, create(draft(title, "Go", true)));
    }
    call!(app, create(draft("Go Draft", "Go", false)));
    call!(app, create(draft("Rust One", "Rust", true)));

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/go-one/related")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let related = body["data"].as_array().unwrap();
    assert_eq!(related.len(), 2);
    for post in related {
        assert_eq!(post["category"], "Go");
        assert_eq!(post["published"], true);
        assert_ne!(post["slug"], "go-one");
        assert!(post.get("content").is_none());
    }

    let (_, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/rust-one/related")
    );
    assert_eq!(body["data"], json!([]));

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/go-draft/related")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/go-draft/related?published=all")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn update_replaces_fields_and_keeps_counters() {
    let app = test_app!();
    let (_, created) = call!(app, create(draft("Original", "Rust", false)));
    call!(
        app,
        test::TestRequest::post().uri("/api/blogs/original/view")
    );

    let mut changes = draft("Renamed Title", "Go", true);
    changes["content"] = json!("word ".repeat(450));
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/blogs/original")
            .set_json(changes)
    );

    assert_eq!(status, StatusCode::OK);
    let post = &body["data"];
    assert_eq!(post["slug"], "original");
    assert_eq!(post["title"], "Renamed Title");
    assert_eq!(post["category"], "Go");
    assert_eq!(post["published"], true);
    assert_eq!(post["readTime"], "3 min read");
    assert_eq!(post["views"], 1);
    assert_eq!(post["id"], created["data"]["id"]);
    assert_eq!(post["createdAt"], created["data"]["createdAt"]);

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/blogs/missing")
            .set_json(draft("Missing", "Rust", true))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn update_can_move_to_new_slug() {
    let app = test_app!();
    call!(app, create(draft("First", "Rust", true)));
    call!(app, create(draft("Second", "Rust", true)));

    let mut changes = draft("First", "Rust", true);
    changes["slug"] = json!("Second");
    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/blogs/first")
            .set_json(changes.clone())
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    changes["slug"] = json!("first-renamed");
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/blogs/first")
            .set_json(changes)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slug"], "first-renamed");
}

#[actix_web::test]
async fn delete_removes_post() {
    let app = test_app!();
    call!(app, create(draft("Short Lived", "Rust", true)));

    let (status, body) = call!(
        app,
        test::TestRequest::delete().uri("/api/blogs/short-lived")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": {} }));

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/short-lived")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call!(
        app,
        test::TestRequest::delete().uri("/api/blogs/short-lived")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn like_and_view_increment() {
    let app = test_app!();
    call!(app, create(draft("Counted", "Rust", true)));

    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/blogs/counted/like")
    );
    assert_eq!(body, json!({ "success": true, "likes": 1 }));
    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/blogs/counted/like")
    );
    assert_eq!(body["likes"], 2);

    let (_, body) = call!(
        app,
        test::TestRequest::post().uri("/api/blogs/counted/view")
    );
    assert_eq!(body, json!({ "success": true, "views": 1 }));

    let (status, body) = call!(
        app,
        test::TestRequest::post().uri("/api/blogs/missing/view")
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Blog not found");
}

#[actix_web::test]
async fn concurrent_views_are_all_counted() {
    let app = test_app!();
    call!(app, create(draft("Popular", "Rust", true)));

    let requests = (0..20).map(|_| {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/blogs/popular/view")
                .to_request(),
        )
    });
    let responses = futures::future::join_all(requests).await;
    assert!(responses.iter().all(|r| r.status().is_success()));

    let (_, body) = call!(app, test::TestRequest::get().uri("/api/blogs/popular"));
    assert_eq!(body["data"]["views"], 20);
}

#[actix_web::test]
async fn unsupported_methods_are_405() {
    let app = test_app!();

    let (status, body) = call!(app, test::TestRequest::patch().uri("/api/blogs"));
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "success": false, "error": "Method not allowed" }));

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs/anything/like")
    );
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/api/blogs/anything")
    );
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = call!(
        app,
        test::TestRequest::post().uri("/api/blogs/anything/related")
    );
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn bad_input_is_400() {
    let app = test_app!();

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/blogs?page=0"));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "page");

    let (status, _) = call!(
        app,
        test::TestRequest::get().uri("/api/blogs?limit=ten")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/blogs")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn health_reports_in_memory_store() {
    let app = test_app!();

    let (status, body) = call!(app, test::TestRequest::get().uri("/api/health"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "in-memory");
}
