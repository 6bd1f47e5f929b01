use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use hello_version::app;
use hello_version::config::EnvironmentConfig;
use tower::ServiceExt;

const EXPECTED: &str = "hello from version 1.0.1";

fn test_app() -> Router {
    app::create_app(EnvironmentConfig::default())
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn greeting_constant_matches() {
    assert_eq!(hello_version::GREETING, EXPECTED);
}

#[tokio::test]
async fn root_test() {
    let (status, body) = send(test_app(), Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK, "Response should be 200.");
    assert_eq!(body, EXPECTED);
}

#[tokio::test]
async fn version_test() {
    let (status, body) = send(test_app(), Method::GET, "/version").await;
    assert_eq!(status, StatusCode::OK, "Response should be 200.");
    assert_eq!(body, EXPECTED);
}

#[tokio::test]
async fn plain_text_response() {
    let request = Request::get("/version").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();

    let content_type = response.headers().get("content-type").unwrap();
    assert_eq!(content_type, "text/plain; charset=utf-8");
}

#[tokio::test]
async fn repeated_calls_are_identical() {
    let app = test_app();
    for uri in ["/", "/version"] {
        let (_, first) = send(app.clone(), Method::GET, uri).await;
        let (_, second) = send(app.clone(), Method::GET, uri).await;
        assert_eq!(first.as_bytes(), second.as_bytes(), "{uri} changed between calls");
    }
}

#[tokio::test]
async fn request_content_is_ignored() {
    let request = Request::get("/?verbose=true")
        .header("content-type", "application/json")
        .body(Body::from("{\"ignored\":true}"))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], EXPECTED.as_bytes());
}

#[tokio::test]
async fn other_methods_not_allowed() {
    for (method, uri) in [
        (Method::POST, "/"),
        (Method::PUT, "/"),
        (Method::DELETE, "/version"),
        (Method::PATCH, "/version"),
    ] {
        let (status, _) = send(test_app(), method.clone(), uri).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
    }
}

#[tokio::test]
async fn unmapped_path_not_found() {
    let (status, _) = send(test_app(), Method::GET, "/foo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_lists_routes() {
    let (status, body) = send(test_app(), Method::GET, "/api.json").await;
    assert_eq!(status, StatusCode::OK);

    let document: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(document["info"]["title"], "hello-version");
    assert_eq!(document["info"]["version"], "1.0.1");
    assert!(document["paths"]["/"]["get"].is_object());
    assert!(document["paths"]["/version"]["get"].is_object());
}

#[tokio::test]
async fn swagger_ui_is_served() {
    let (status, _) = send(test_app(), Method::GET, "/api/docs").await;
    assert!(
        status.is_success() || status.is_redirection(),
        "unexpected status {status}"
    );
}

#[tokio::test]
async fn routes_respond_with_otel_layers() {
    let config = EnvironmentConfig {
        otel_enabled: true,
        ..Default::default()
    };
    let app = app::create_app(config);

    for uri in ["/", "/version"] {
        let (status, body) = send(app.clone(), Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri} should be 200.");
        assert_eq!(body, EXPECTED);
    }
}

#[tokio::test]
async fn permissive_cors_headers() {
    let config = EnvironmentConfig {
        cors_permissive: true,
        ..Default::default()
    };

    let request = Request::get("/version")
        .header("origin", "https://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app::create_app(config).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
