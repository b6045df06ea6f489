use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::middleware::NormalizePath;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use press_core::domain::SiteMeta;
use press_core::ports::PasswordService;
use press_core::services::AdminAccount;
use press_infra::{Argon2PasswordService, JwtConfig, TeraRenderer};

use crate::state::{AppState, Stores};

const PASSWORD: &str = "correct horse";

fn state() -> AppState {
    let renderer = TeraRenderer::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html"))
        .expect("templates should parse");
    let hash = Argon2PasswordService::new().hash(PASSWORD).unwrap();

    AppState::assemble(
        Stores::in_memory(),
        Arc::new(renderer),
        SiteMeta::default(),
        AdminAccount {
            username: "admin".to_string(),
            password_hash: Some(hash),
        },
        JwtConfig::default(),
    )
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new(state()))
                .configure(super::configure_routes),
        )
        .await
    };
}

/// Call the app with a `TestRequest`.
macro_rules! send {
    ($app:expr, $req:expr) => {
        test::call_service($app, $req.to_request()).await
    };
}

/// Sign in and return the `Authorization` header value.
macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/admin/api/login")
            .set_json(json!({ "username": "admin", "password": PASSWORD }));
        let body: Value = test::read_body_json(send!($app, req)).await;
        format!("Bearer {}", body["access_token"].as_str().unwrap())
    }};
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri)
}

fn admin_get(token: &str, uri: &str) -> test::TestRequest {
    get(uri).insert_header((header::AUTHORIZATION, token.to_string()))
}

fn admin_post(token: &str, uri: &str, payload: Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((header::AUTHORIZATION, token.to_string()))
        .set_json(payload)
}

async fn body_text(resp: ServiceResponse) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

async fn data_id(resp: ServiceResponse) -> String {
    let body: Value = test::read_body_json(resp).await;
    body["data"]["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn test_health_reports_backend() {
    let app = app!();
    let body: Value = test::read_body_json(send!(&app, get("/api/health"))).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[actix_web::test]
async fn test_empty_home_renders() {
    let app = app!();
    let resp = send!(&app, get("/"));

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<title>Press Magazine – Lifestyle, Travel, Tech &amp; Culture</title>"));
    assert!(html.contains("Nothing published yet."));
}

#[actix_web::test]
async fn test_publish_flow() {
    let app = app!();
    let token = login!(&app);

    let resp = send!(&app, admin_post(&token, "/admin/api/categories", json!({ "name": "Tech" })));
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Value = test::read_body_json(resp).await;
    assert_eq!(category["data"]["slug"], "tech");
    let category_id = category["data"]["id"].as_str().unwrap().to_string();

    let payload = json!({
        "title": "Hello, World!",
        "category_id": category_id,
        "content": "<p>First post</p>",
        "tags": ["Rust"],
        "section": "hero",
        "published": true
    });
    let resp = send!(&app, admin_post(&token, "/admin/api/posts", payload));
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["data"]["slug"], "hello-world");
    assert_eq!(post["data"]["meta_title"], "Hello, World!");
    assert_eq!(post["data"]["section"], "hero");
    assert_eq!(post["data"]["views"], 0);

    let resp = send!(&app, get("/post/hello-world/"));
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("<p>First post</p>"));
    assert!(html.contains(r#"href="/tag/rust""#));

    let html = body_text(send!(&app, get("/"))).await;
    assert!(html.contains(r#"class="hero-card lead""#));

    let resp = send!(&app, get("/tag/rust"));
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("/post/hello-world"));

    let resp = send!(&app, get("/category/tech/"));
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Hello, World!"));
}

#[actix_web::test]
async fn test_drafts_stay_private() {
    let app = app!();
    let token = login!(&app);

    let category_id = data_id(send!(
        &app,
        admin_post(&token, "/admin/api/categories", json!({ "name": "Tech" }))
    ))
    .await;
    let payload = json!({ "title": "Draft", "category_id": category_id });
    let post_id = data_id(send!(&app, admin_post(&token, "/admin/api/posts", payload))).await;

    assert_eq!(send!(&app, get("/post/draft")).status(), StatusCode::NOT_FOUND);

    let resp = send!(&app, admin_get(&token, &format!("/admin/api/posts/{}", post_id)));
    assert_eq!(resp.status(), StatusCode::OK);

    let listing: Value = test::read_body_json(send!(
        &app,
        admin_get(&token, "/admin/api/posts?published=false")
    ))
    .await;
    assert_eq!(listing["data"][0]["slug"], "draft");
}

#[actix_web::test]
async fn test_missing_pages() {
    let app = app!();

    let resp = send!(&app, get("/category/nope"));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["status"], 404);

    assert_eq!(send!(&app, get("/post/nope")).status(), StatusCode::NOT_FOUND);

    let resp = send!(&app, get("/tag/nope"));
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("No posts tagged"));
}

#[actix_web::test]
async fn test_admin_requires_valid_token() {
    let app = app!();

    let resp = send!(&app, get("/admin/api/categories"));
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send!(
        &app,
        admin_post("Bearer garbage", "/admin/api/categories", json!({ "name": "X" }))
    );
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/admin/api/login")
        .set_json(json!({ "username": "admin", "password": "wrong" }));
    assert_eq!(send!(&app, req).status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_rejections() {
    let app = app!();
    let token = login!(&app);

    let category_id = data_id(send!(
        &app,
        admin_post(&token, "/admin/api/categories", json!({ "name": "Tech" }))
    ))
    .await;
    let post = |title: &str| json!({ "title": title, "category_id": category_id });

    let first = send!(&app, admin_post(&token, "/admin/api/posts", post("Same Title")));
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = send!(&app, admin_post(&token, "/admin/api/posts", post("Same Title")));
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let underivable = send!(&app, admin_post(&token, "/admin/api/posts", post("!!!")));
    assert_eq!(underivable.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bad_id = json!({ "title": "Anything", "category_id": "not-a-uuid" });
    let resp = send!(&app, admin_post(&token, "/admin/api/posts", bad_id));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bad_section =
        json!({ "title": "Anything", "category_id": category_id, "section": "sidebar" });
    let resp = send!(&app, admin_post(&token, "/admin/api/posts", bad_section));
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_delete_category_removes_posts() {
    let app = app!();
    let token = login!(&app);

    let category_id = data_id(send!(
        &app,
        admin_post(&token, "/admin/api/categories", json!({ "name": "Tech" }))
    ))
    .await;
    for title in ["One", "Two", "Three"] {
        let payload = json!({ "title": title, "category_id": category_id, "published": true });
        let resp = send!(&app, admin_post(&token, "/admin/api/posts", payload));
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/api/categories/{}", category_id))
        .insert_header((header::AUTHORIZATION, token.clone()));
    assert_eq!(send!(&app, req).status(), StatusCode::OK);

    let listing: Value = test::read_body_json(send!(&app, admin_get(&token, "/admin/api/posts"))).await;
    assert_eq!(listing["data"].as_array().map(Vec::len), Some(0));

    assert_eq!(send!(&app, get("/post/one")).status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_admin_listing_filters() {
    let app = app!();
    let token = login!(&app);

    for name in ["Tech", "Travel", "Food"] {
        let resp = send!(&app, admin_post(&token, "/admin/api/categories", json!({ "name": name })));
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let found: Value =
        test::read_body_json(send!(&app, admin_get(&token, "/admin/api/categories?search=Tr"))).await;
    assert_eq!(found["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(found["data"][0]["name"], "Travel");

    let resp = send!(
        &app,
        admin_get(&token, "/admin/api/posts?created_from=2024-01-01T00:00:00Z")
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send!(&app, admin_get(&token, "/admin/api/posts?created_from=yesterday"));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
