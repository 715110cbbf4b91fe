use crate::AppState;
use crate::app;
use crate::config::AppConfig;
use crate::features::forms::model::Ack;
use crate::tests::api_records_router::test_config;
use crate::tests::mocks::MockRepository;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    test_app_with(test_config())
}

fn test_app_with(config: Arc<AppConfig>) -> Router {
    app(AppState {
        store: Arc::new(MockRepository::new()),
        config,
    })
}

fn form_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

// every form route renders the index page on GET
#[tokio::test]
async fn test_form_routes_render_index_page() {
    for uri in ["/get", "/post", "/ajax"] {
        let response = test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("Welcome to example.org"));
        assert!(html.contains("mailto:ops@example.org"));
    }
}

#[tokio::test]
async fn test_get_route_post_is_empty_ok() {
    let response = test_app()
        .oneshot(form_post(
            "/get",
            "firstname=Ada&lastname=Lovelace&username=ada",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_post_route_returns_fixed_ack() {
    let response = test_app()
        .oneshot(form_post(
            "/post",
            "firstname=Ada&lastname=Lovelace&username=ada",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({"res": 1, "status": 200}));
}

// missing fields are fine, they are only logged
#[tokio::test]
async fn test_ajax_route_accepts_partial_form() {
    let response = test_app()
        .oneshot(form_post("/ajax", "username=ada"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let ack: Ack = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(ack, Ack::ok());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = test_app()
        .oneshot(Request::builder().uri("/login").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// configured labels are escaped before they reach the page
#[tokio::test]
async fn test_index_page_escapes_site_labels() {
    let mut config = (*test_config()).clone();
    config.site_name = "<script>alert('x')</script>".to_string();
    config.site_email = "a&b@example.org".to_string();

    let response = test_app_with(Arc::new(config))
        .oneshot(Request::builder().uri("/get").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("a&amp;b@example.org"));
}

// only urlencoded bodies are read; multipart submissions are refused
#[tokio::test]
async fn test_multipart_submission_is_unsupported() {
    let body = "--XYZ\r\nContent-Disposition: form-data; name=\"username\"\r\n\r\nada\r\n--XYZ--\r\n";
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/post")
                .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XYZ")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
