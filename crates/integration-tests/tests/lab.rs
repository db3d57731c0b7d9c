//! Integration tests for the design lab.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{StatusCode, header};
use ragvynn_core::CartPolicy;
use ragvynn_integration_tests::{FakeModel, Reply, TestClient, png};

fn design_link(body: &str) -> Option<&str> {
    let start = body.find("/lab/designs/")?;
    let end = start + body.get(start..)?.find("/image")? + "/image".len();
    body.get(start..end)
}

#[tokio::test]
async fn test_lab_page_renders() {
    let mut client = TestClient::new(Arc::new(FakeModel::new()), CartPolicy::Retain);
    let resp = client.get("/lab").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Design Lab"));
    assert!(resp.body.contains("Your generated designs will appear here."));
}

#[tokio::test]
async fn test_generate_prepends_and_downloads() {
    let model = Arc::new(
        FakeModel::new()
            .with_image(Reply::ok(Some(png(b"shoe"))))
            .with_image(Reply::ok(Some(png(b"boot")))),
    );
    let mut client = TestClient::new(Arc::clone(&model), CartPolicy::Retain);

    let resp = client.post("/lab/designs", "prompt=Volcanic+glass+runner").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("data:image/png;base64,c2hvZQ=="));
    assert!(resp.body.contains("Volcanic glass runner"));

    let link = design_link(&resp.body).map(str::to_string).unwrap_or_default();
    let download = client.get(&link).await;
    assert_eq!(download.status, StatusCode::OK);
    assert_eq!(download.headers[header::CONTENT_TYPE], "image/png");
    assert!(
        download.headers[header::CONTENT_DISPOSITION]
            .to_str()
            .is_ok_and(|v| v.starts_with("attachment; filename=\"ragvynn-"))
    );
    assert_eq!(download.body, "shoe");

    let resp = client.post("/lab/designs", "prompt=Moss+hiking+boot").await;
    let newest = resp.body.find("Moss hiking boot");
    let oldest = resp.body.find("Volcanic glass runner");
    assert!(newest.is_some() && oldest.is_some() && newest < oldest);

    let requests = model.image_requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.aspect_ratio == "1:1"));
    assert!(requests.first().is_some_and(|r| !r.prompt.contains("Avoid")));
    assert!(requests.get(1).is_some_and(|r| r.prompt.contains(
        "Avoid any designs or color palettes similar to: Volcanic glass runner."
    )));
}

#[tokio::test]
async fn test_missing_image_shows_notice() {
    let model = Arc::new(FakeModel::new().with_image(Reply::ok(None)));
    let mut client = TestClient::new(model, CartPolicy::Retain);

    let resp = client.post("/lab/designs", "prompt=Chrome+loafer").await;
    assert!(resp.body.contains("Design generation failed in the matrix. Try again."));
    assert!(resp.body.contains("Your generated designs will appear here."));
}

#[tokio::test]
async fn test_service_failure_shows_notice() {
    let model = Arc::new(FakeModel::new().with_image(Reply::failure()));
    let mut client = TestClient::new(model, CartPolicy::Retain);

    let resp = client.post("/lab/designs", "prompt=Chrome+loafer").await;
    assert!(resp.body.contains("Design generation failed in the matrix. Try again."));
}

#[tokio::test]
async fn test_blank_prompt_is_ignored() {
    let model = Arc::new(FakeModel::new());
    let mut client = TestClient::new(Arc::clone(&model), CartPolicy::Retain);

    let resp = client.post("/lab/designs", "prompt=").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(model.image_requests().is_empty());
}

#[tokio::test]
async fn test_designs_are_private_to_a_session() {
    let model = Arc::new(FakeModel::new().with_image(Reply::ok(Some(png(b"shoe")))));
    let mut owner = TestClient::new(model, CartPolicy::Retain);

    let resp = owner.post("/lab/designs", "prompt=Volcanic+glass+runner").await;
    let link = design_link(&resp.body).map(str::to_string).unwrap_or_default();

    let mut stranger = owner.fresh_session();
    assert_eq!(stranger.get(&link).await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        stranger.get("/lab/designs/not-a-uuid/image").await.status,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test(start_paused = true)]
async fn test_late_design_is_discarded() {
    let model = Arc::new(
        FakeModel::new()
            .with_image(Reply::ok(Some(png(b"slow"))).after(Duration::from_secs(5)))
            .with_image(Reply::ok(Some(png(b"fast"))).after(Duration::from_secs(1))),
    );
    let mut first = TestClient::new(Arc::clone(&model), CartPolicy::Retain);
    first.get("/lab").await;
    let mut second = first.same_session();

    let (slow, fast) = tokio::join!(
        first.post("/lab/designs", "prompt=Slow+suede+mule"),
        second.post("/lab/designs", "prompt=Fast+mesh+racer"),
    );

    // base64("fast") and base64("slow")
    assert!(fast.body.contains("ZmFzdA=="));
    assert!(slow.body.contains("ZmFzdA=="));
    assert!(!slow.body.contains("c2xvdw=="));
    assert!(!slow.body.contains("Slow suede mule"));

    let resp = first.get("/lab").await;
    assert_eq!(resp.body.matches("/image\"").count(), 1);
    assert!(resp.body.contains("Fast mesh racer"));
    assert!(!resp.body.contains("c2xvdw=="));
}
