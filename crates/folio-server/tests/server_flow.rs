use std::fs;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use folio_server::config::{ReturnDirective, ServerConfig};
use folio_server::{AppState, create_router};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

fn site() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("index.html"), "<div id=\"app\"></div>").expect("index");
    fs::write(dir.path().join("404.html"), "<h1>missing</h1>").expect("404");
    fs::create_dir(dir.path().join("assets")).expect("assets dir");
    fs::write(dir.path().join("assets/app.js"), "console.log(1)").expect("js");
    dir
}

fn config_for(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        root: Some(dir.path().to_path_buf()),
        ..ServerConfig::default()
    }
    .validate()
    .expect("valid config")
}

async fn send(app: &axum::Router, method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.expect("body").to_bytes();
    (status, content_type, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn serves_index_and_assets() {
    let dir = site();
    let app = create_router(AppState::new(config_for(&dir)));

    let (status, content_type, body) = send(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html"));
    assert!(body.contains("id=\"app\""));

    let (status, content_type, body) = send(&app, Method::GET, "/assets/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap_or_default().contains("javascript"));
    assert_eq!(body, "console.log(1)");
}

#[tokio::test]
async fn client_routes_fall_back_to_index() {
    let dir = site();
    let app = create_router(AppState::new(config_for(&dir)));

    let (status, _, body) = send(&app, Method::GET, "/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"app\""));
}

#[tokio::test]
async fn missing_files_get_the_404_page() {
    let dir = site();
    let app = create_router(AppState::new(config_for(&dir)));

    let (status, _, body) = send(&app, Method::GET, "/assets/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "<h1>missing</h1>");

    let mut cfg = config_for(&dir);
    cfg.spa_fallback = false;
    let strict = create_router(AppState::new(cfg));
    let (status, _, _) = send(&strict, Method::GET, "/projects").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejected_requests_are_counted_in_health_report() {
    let dir = site();
    let app = create_router(AppState::new(config_for(&dir)));

    let (status, _, _) = send(&app, Method::POST, "/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = send(&app, Method::GET, "/%2e%2e/etc/passwd").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);

    let (status, content_type, report) = send(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap_or_default().starts_with("text/html"));
    assert!(report.contains("Requests served: 4"), "{report}");
    assert!(report.contains("- 1 valid (GET)"));
    assert!(report.contains("- 1 invalid"));
    assert!(report.contains("- 1 malicious"));
    assert!(report.contains("- 1 health checks"));
}

#[tokio::test]
async fn return_directive_redirects_every_request() {
    let cfg = ServerConfig {
        server_name: Some("example.com".to_string()),
        return_directive: Some(ReturnDirective {
            code: 301,
            target: "https://$host$request_uri".to_string(),
        }),
        ..ServerConfig::default()
    }
    .validate()
    .expect("valid config");
    let app = create_router(AppState::new(cfg));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/projects?tag=Web").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
        Some("https://example.com/projects?tag=Web")
    );
    let body = response.into_body().collect().await.expect("body").to_bytes();
    assert_eq!(&body[..], b"Redirecting to https://example.com/projects?tag=Web");
}

#[tokio::test]
async fn oversized_post_is_counted_as_malicious() {
    let dir = site();
    let app = create_router(AppState::new(config_for(&dir)));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/")
                .header(header::CONTENT_LENGTH, "1000000")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let (_, _, report) = send(&app, Method::GET, "/health").await;
    assert!(report.contains("- 1 malicious"), "{report}");
    assert!(report.contains("- 0 invalid"), "{report}");
}

#[tokio::test]
async fn health_with_query_is_served_as_a_file_target() {
    let dir = site();
    let app = create_router(AppState::new(config_for(&dir)));

    let (status, _, body) = send(&app, Method::GET, "/health?x=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("id=\"app\""));

    let (_, _, report) = send(&app, Method::GET, "/health").await;
    assert!(report.contains("- 1 valid (GET)"), "{report}");
    assert!(report.contains("- 1 health checks"), "{report}");
}
