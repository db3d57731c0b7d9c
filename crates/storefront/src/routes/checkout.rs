//! Checkout route handlers.
//!
//! Checkout is simulated: `POST /checkout` moves the machine to processing
//! and spawns a timer that completes the order after the configured delay.
//! The drawer polls `GET /checkout/status` while processing.

use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::middleware::CurrentShopper;
use crate::models::now;
use crate::routes::cart::drawer_response;
use crate::services::SharedShopper;
use crate::state::AppState;

/// Begin checkout (HTMX). Rejections show up as a notice in the drawer.
#[instrument(skip(state, shopper))]
pub async fn begin(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> impl IntoResponse {
    let mut guard = shopper.lock().await;
    match guard.begin_checkout(now()) {
        Ok(done_at) => {
            add_breadcrumb(
                "checkout",
                "Checkout started",
                &[("items", &guard.cart.quantity_total().to_string())],
            );
            spawn_completion(shopper.clone(), done_at);
        }
        Err(e) => {
            guard.cart_open = true;
            tracing::info!(error = %e, "checkout rejected");
        }
    }

    drawer_response(&guard, &state)
}

/// Current drawer, advancing checkout if its delay has elapsed.
#[instrument(skip(state, shopper))]
pub async fn status(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> impl IntoResponse {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());

    drawer_response(&shopper, &state)
}

/// Leave the success screen.
#[instrument(skip(state, shopper))]
pub async fn dismiss(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> impl IntoResponse {
    let mut shopper = shopper.lock().await;
    if shopper.dismiss_checkout(now()) {
        add_breadcrumb("checkout", "Order confirmation dismissed", &[]);
    }

    drawer_response(&shopper, &state)
}

/// Complete the order once `done_at` is reached.
///
/// Reads tick the machine too, so this task only guarantees progress for a
/// shopper who stops polling.
fn spawn_completion(shopper: SharedShopper, done_at: std::time::Instant) {
    tokio::spawn(async move {
        tokio::time::sleep_until(tokio::time::Instant::from_std(done_at)).await;
        if shopper.lock().await.tick(now()) {
            tracing::info!("order completed");
        }
    });
}
