//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Catalog (query: category, gender, q)
//! GET  /home                   - Reset filters, redirect to /
//! POST /filters/reset          - Reset filters (returns product_grid fragment)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (HTMX fragments, mutations trigger cart-updated)
//! GET  /cart                   - Open drawer
//! POST /cart/add               - Add (product_id, size, color)
//! POST /cart/quick-add         - Add with first size and color
//! POST /cart/remove            - Remove line by index
//! POST /cart/close             - Close drawer
//! GET  /cart/count             - Cart count badge
//!
//! # Checkout (returns cart_drawer fragment)
//! POST /checkout               - Begin simulated checkout
//! GET  /checkout/status        - Polled while processing
//! POST /checkout/dismiss       - Leave the success screen
//!
//! # AI (rate limited per client IP)
//! POST /assistant/ask          - Style advice (returns advice fragment)
//! POST /lab/designs            - Generate a design (returns gallery fragment)
//!
//! # Lab
//! GET  /lab                    - Design lab page
//! GET  /lab/designs/{id}/image - Download a generated design
//! ```

pub mod assistant;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod lab;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::ai_rate_limiter;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/quick-add", post(cart::quick_add))
        .route("/remove", post(cart::remove))
        .route("/close", post(cart::close))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::begin))
        .route("/status", get(checkout::status))
        .route("/dismiss", post(checkout::dismiss))
}

/// Create the design lab routes router.
pub fn lab_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(lab::index))
        .route("/designs/{id}/image", get(lab::download))
}

/// Create the generative AI routes router.
///
/// Every route here calls the remote model, so the whole group shares one
/// per-client rate limit.
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/assistant/ask", post(assistant::ask))
        .route("/lab/designs", post(lab::generate))
        .route_layer(ai_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(catalog::index))
        .route("/home", get(catalog::home))
        .route("/filters/reset", post(catalog::reset_filters))
        .route("/products/{id}", get(products::show))
        // Cart drawer
        .nest("/cart", cart_routes())
        // Simulated checkout
        .nest("/checkout", checkout_routes())
        // Design lab pages
        .nest("/lab", lab_routes())
        // Model-backed endpoints
        .merge(ai_routes())
}
