//! Product route handlers and shared product views.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use ragvynn_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::models::now;
use crate::routes::assistant::AdviceView;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// A crop of the sprite sheet, rendered as an inline background style.
#[derive(Clone)]
pub struct SpriteView {
    pub url: String,
    pub size: String,
    pub position: String,
}

impl SpriteView {
    #[must_use]
    pub fn new(state: &AppState, sprite_index: u32) -> Self {
        let grid = state.catalog().grid();
        Self {
            url: state.config().sprite_sheet_url.clone(),
            size: grid.background_size(),
            position: grid.offset(sprite_index).css_position(),
        }
    }

    /// Value for a `style` attribute.
    #[must_use]
    pub fn style(&self) -> String {
        format!(
            "background-image: url('{}'); background-size: {}; background-position: {}; background-repeat: no-repeat;",
            self.url, self.size, self.position
        )
    }
}

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub description: String,
    pub category: &'static str,
    pub accent: &'static str,
    pub rating: String,
    pub reviews_count: u32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub features: Vec<String>,
    pub tags: Vec<String>,
    pub sprite: SpriteView,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, state: &AppState) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            category: product.category.as_str(),
            accent: product.category.accent_class(),
            rating: format!("{:.1}", product.rating),
            reviews_count: product.reviews_count,
            sizes: product.sizes.iter().map(ToString::to_string).collect(),
            colors: product.colors.clone(),
            features: product.features.clone(),
            tags: product.tags.clone(),
            sprite: SpriteView::new(state, product.sprite_index),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    pub cart: CartView,
    pub advice: AdviceView,
}

/// Display product detail page.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let product_id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("Product {id}")))?;
    let product = state
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let mut shopper = shopper.lock().await;
    shopper.tick(now());

    Ok(ProductShowTemplate {
        product: ProductView::new(product, &state),
        cart: CartView::new(&shopper, &state),
        advice: AdviceView::new(&shopper),
    })
}
