//! Integration tests for catalog browsing and filtering.

use std::sync::Arc;

use axum::http::{StatusCode, header};
use ragvynn_core::CartPolicy;
use ragvynn_integration_tests::{FakeModel, TestClient};

fn client() -> TestClient {
    TestClient::new(Arc::new(FakeModel::new()), CartPolicy::Retain)
}

fn card_count(body: &str) -> usize {
    body.matches("class=\"product-card\"").count()
}

#[tokio::test]
async fn test_health() {
    let mut client = client();
    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_catalog_lists_master_collection() {
    let mut client = client();
    let resp = client.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(card_count(&resp.body), 82);
    assert!(resp.body.contains("Aero V-LAB #1"));
    assert!(resp.body.contains("$85.00"));
    assert!(resp.body.contains("background-position: 0.0000% 0.0000%"));
    assert!(resp.headers.contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn test_filters_combine() {
    let mut client = client();

    let resp = client.get("/?category=running").await;
    assert_eq!(card_count(&resp.body), 21);

    // Category sticks while gender narrows further
    let resp = client.get("/?gender=men").await;
    assert_eq!(card_count(&resp.body), 7);

    let resp = client.get("/?category=all&gender=all&q=NIKE").await;
    assert_eq!(card_count(&resp.body), 22);
    assert!(!resp.body.contains("Adidas"));
}

#[tokio::test]
async fn test_empty_result_offers_reset() {
    let mut client = client();

    let resp = client.get("/?q=no-such-shoe").await;
    assert_eq!(card_count(&resp.body), 0);
    assert!(resp.body.contains("hx-post=\"/filters/reset\""));

    let resp = client.post("/filters/reset", "").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(card_count(&resp.body), 82);
    assert!(!resp.body.contains("<html"));

    let resp = client.get("/").await;
    assert_eq!(card_count(&resp.body), 82);
}

#[tokio::test]
async fn test_home_resets_filters() {
    let mut client = client();
    client.get("/?category=outdoor").await;

    let resp = client.get("/home").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.headers[header::LOCATION], "/");

    let resp = client.get("/").await;
    assert_eq!(card_count(&resp.body), 82);
}

#[tokio::test]
async fn test_filters_are_per_session() {
    let mut first = client();
    first.get("/?category=basketball").await;

    let mut second = first.fresh_session();
    let resp = second.get("/").await;
    assert_eq!(card_count(&resp.body), 82);

    let resp = first.get("/").await;
    assert_eq!(card_count(&resp.body), 20);
}

#[tokio::test]
async fn test_unknown_category_is_rejected() {
    let mut client = client();
    let resp = client.get("/?category=tennis").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_product_detail() {
    let mut client = client();

    let resp = client.get("/products/shoe-42").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Vortex Elite #42"));
    assert!(resp.body.contains("New Balance"));
    assert!(resp.body.contains("$187.50"));
    assert!(resp.body.contains("value=\"8.5\""));
    assert!(resp.body.contains("Kinetic Sole Architecture"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut client = client();
    assert_eq!(client.get("/products/shoe-999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.get("/products/boot-1").await.status, StatusCode::NOT_FOUND);
}
