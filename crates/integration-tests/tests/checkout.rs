//! Integration tests for the simulated checkout.
//!
//! Time is paused so the processing delay is stepped through explicitly.

use std::sync::Arc;
use std::time::Duration;

use ragvynn_core::CartPolicy;
use ragvynn_integration_tests::{FakeModel, TestClient};

const ADD: &str = "product_id=shoe-5&size=9&color=Original+Palette";

fn client(policy: CartPolicy) -> TestClient {
    TestClient::new(Arc::new(FakeModel::new()), policy)
}

#[tokio::test(start_paused = true)]
async fn test_empty_cart_is_rejected() {
    let mut client = client(CartPolicy::Retain);

    let resp = client.post("/checkout", "").await;
    assert!(resp.body.contains("cannot check out an empty cart"));
    assert!(!resp.body.contains("Processing your order"));
}

#[tokio::test(start_paused = true)]
async fn test_checkout_completes_after_delay() {
    let mut client = client(CartPolicy::Retain);
    client.post("/cart/add", ADD).await;

    let resp = client.post("/checkout", "").await;
    assert!(resp.body.contains("Processing your order"));
    assert!(resp.body.contains("hx-get=\"/checkout/status\""));

    tokio::time::advance(Duration::from_millis(1999)).await;
    let resp = client.get("/checkout/status").await;
    assert!(resp.body.contains("Processing your order"));

    let resp = client.post("/checkout", "").await;
    assert!(resp.body.contains("checkout already in progress"));

    tokio::time::advance(Duration::from_millis(1)).await;
    let resp = client.get("/checkout/status").await;
    assert!(resp.body.contains("Order Confirmed"));
    assert!(!resp.body.contains("hx-get=\"/checkout/status\""));

    let resp = client.post("/checkout", "").await;
    assert!(resp.body.contains("previous order must be dismissed first"));

    // Retain keeps the order in the bag
    assert_eq!(client.get("/cart/count").await.body.trim(), "1");

    // Dismissal returns to the collection with the drawer closed
    let resp = client.post("/checkout/dismiss", "").await;
    assert!(!resp.body.contains("Order Confirmed"));
    assert!(!resp.body.contains("class=\"drawer\""));

    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Checkout"));
    assert!(resp.body.contains("Qty 1"));
}

#[tokio::test(start_paused = true)]
async fn test_clear_on_success_empties_cart() {
    let mut client = client(CartPolicy::ClearOnSuccess);
    client.post("/cart/add", ADD).await;
    client.post("/checkout", "").await;

    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(client.get("/cart/count").await.body.trim(), "0");
    let resp = client.get("/checkout/status").await;
    assert!(resp.body.contains("Order Confirmed"));

    client.post("/checkout/dismiss", "").await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Your bag is empty."));
}

#[tokio::test(start_paused = true)]
async fn test_clear_on_success_keeps_lines_added_while_processing() {
    let mut client = client(CartPolicy::ClearOnSuccess);
    client.post("/cart/quick-add", "product_id=shoe-1").await;
    client.post("/checkout", "").await;

    let resp = client.post("/cart/quick-add", "product_id=shoe-2").await;
    assert!(resp.body.contains("Processing your order"));

    tokio::time::sleep(Duration::from_millis(2500)).await;

    assert_eq!(client.get("/cart/count").await.body.trim(), "1");
    client.post("/checkout/dismiss", "").await;
    let resp = client.get("/cart").await;
    assert!(resp.body.contains("Vortex Elite #2"));
    assert!(!resp.body.contains("Aero V-LAB #1"));
}
