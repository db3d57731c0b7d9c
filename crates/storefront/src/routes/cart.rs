//! Cart route handlers.
//!
//! Cart operations use HTMX: every mutation answers with the re-rendered
//! cart drawer and an `HX-Trigger: cart-updated` header so the header badge
//! refreshes itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use ragvynn_core::{CartItem, CheckoutState, ProductId, ShoeSize};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::CurrentShopper;
use crate::models::{Shopper, now};
use crate::routes::products::SpriteView;
use crate::state::AppState;

/// HTMX event fired after any cart change.
pub const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    /// Position in the cart, used by the remove form.
    pub index: usize,
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub sprite: SpriteView,
}

impl CartLineView {
    fn new(index: usize, item: &CartItem, state: &AppState) -> Self {
        Self {
            index,
            product_id: item.product.id.to_string(),
            name: item.product.name.clone(),
            brand: item.product.brand.clone(),
            size: item.size.to_string(),
            color: item.color.clone(),
            quantity: item.quantity,
            unit_price: item.product.price.to_string(),
            line_price: item.line_total().to_string(),
            sprite: SpriteView::new(state, item.product.sprite_index),
        }
    }
}

/// Cart drawer display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub open: bool,
    pub items: Vec<CartLineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub processing: bool,
    pub success: bool,
    /// Why the last checkout attempt was refused.
    pub notice: Option<String>,
}

impl CartView {
    #[must_use]
    pub fn new(shopper: &Shopper, state: &AppState) -> Self {
        let state_flags = shopper.checkout.state();
        Self {
            open: shopper.cart_open,
            items: shopper
                .cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartLineView::new(index, item, state))
                .collect(),
            item_count: shopper.cart.quantity_total(),
            subtotal: shopper.cart.price_total().to_string(),
            processing: matches!(state_flags, CheckoutState::Processing { .. }),
            success: state_flags == CheckoutState::Success,
            notice: shopper.checkout_notice.map(|e| e.to_string()),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub size: String,
    pub color: String,
}

/// Quick add form data.
#[derive(Debug, Deserialize)]
pub struct QuickAddForm {
    pub product_id: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("unknown product {raw:?}")))
}

/// Render the drawer with the cart-updated trigger.
pub(crate) fn drawer_response(shopper: &Shopper, state: &AppState) -> impl IntoResponse + use<> {
    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartDrawerTemplate {
            cart: CartView::new(shopper, state),
        },
    )
}

/// Add one unit of a product in one of its offered sizes and colors (HTMX).
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<AddToCartForm>,
) -> Result<impl IntoResponse> {
    let product_id = parse_product_id(&form.product_id)?;
    let product = state
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;
    let size: ShoeSize = form
        .size
        .parse()
        .map_err(|e: ragvynn_core::ParseSizeError| AppError::BadRequest(e.to_string()))?;
    if !product.offers_size(size) {
        return Err(AppError::BadRequest(format!(
            "size {size} is not offered for {product_id}"
        )));
    }
    let color = form.color.trim();
    if color.is_empty() {
        return Err(AppError::BadRequest("color is required".to_string()));
    }
    if !product.offers_color(color) {
        return Err(AppError::BadRequest(format!(
            "color {color:?} is not offered for {product_id}"
        )));
    }

    let mut shopper = shopper.lock().await;
    shopper.tick(now());
    shopper.cart.add(product.clone(), size, color);
    shopper.cart_open = true;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", &form.product_id), ("size", &form.size)],
    );

    Ok(drawer_response(&shopper, &state))
}

/// Add one unit with the product's first size and color (HTMX).
#[instrument(skip(state, shopper))]
pub async fn quick_add(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<QuickAddForm>,
) -> Result<impl IntoResponse> {
    let product_id = parse_product_id(&form.product_id)?;
    let product = state
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id}")))?;

    let mut shopper = shopper.lock().await;
    shopper.tick(now());
    if shopper.cart.quick_add(product.clone()).is_none() {
        tracing::warn!(%product_id, "product has no default size or color");
    }
    shopper.cart_open = true;

    Ok(drawer_response(&shopper, &state))
}

/// Remove the line at a position (HTMX). Unknown positions are ignored.
#[instrument(skip(state, shopper))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Form(form): Form<RemoveFromCartForm>,
) -> impl IntoResponse {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());
    if shopper.cart.remove(form.index).is_none() {
        tracing::debug!(index = form.index, "remove ignored, no such line");
    }

    drawer_response(&shopper, &state)
}

/// Open the cart drawer.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> CartDrawerTemplate {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());
    shopper.cart_open = true;

    CartDrawerTemplate {
        cart: CartView::new(&shopper, &state),
    }
}

/// Close the cart drawer.
#[instrument(skip(state, shopper))]
pub async fn close(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> CartDrawerTemplate {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());
    shopper.cart_open = false;

    CartDrawerTemplate {
        cart: CartView::new(&shopper, &state),
    }
}

/// Cart count badge (HTMX).
#[instrument(skip(shopper))]
pub async fn count(CurrentShopper(shopper): CurrentShopper) -> CartCountTemplate {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());

    CartCountTemplate {
        count: shopper.cart.quantity_total(),
    }
}
