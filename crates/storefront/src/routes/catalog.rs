//! Catalog route handlers.
//!
//! The catalog page is a pure function of the shopper's filter: the visible
//! set is recomputed from the catalog on every render.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::instrument;

use ragvynn_core::{Category, FilterState, Gender, Selector};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::CurrentShopper;
use crate::models::{Shopper, now};
use crate::routes::assistant::AdviceView;
use crate::routes::cart::CartView;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Catalog query parameters. Each present parameter replaces that part of
/// the shopper's filter; absent ones leave it untouched.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub gender: Option<String>,
    pub q: Option<String>,
}

impl CatalogQuery {
    fn apply_to(&self, filter: &mut FilterState) -> Result<()> {
        if let Some(category) = &self.category {
            filter.category = category
                .parse::<Selector<Category>>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
        }
        if let Some(gender) = &self.gender {
            filter.gender = gender
                .parse::<Selector<Gender>>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
        }
        if let Some(q) = &self.q {
            filter.query = q.trim().to_string();
        }
        Ok(())
    }
}

/// One button in the filter bar.
#[derive(Clone)]
pub struct FilterOption {
    /// Query value sent back when chosen.
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Filter bar display data.
#[derive(Clone)]
pub struct FilterView {
    pub categories: Vec<FilterOption>,
    pub genders: Vec<FilterOption>,
    pub query: String,
    pub active: bool,
}

impl FilterView {
    #[must_use]
    pub fn new(filter: &FilterState) -> Self {
        let all = |selected: bool| FilterOption {
            value: "all".to_string(),
            label: "All".to_string(),
            selected,
        };

        let mut categories = vec![all(filter.category.is_all())];
        categories.extend(Category::ALL.into_iter().map(|c| FilterOption {
            value: c.as_str().to_lowercase(),
            label: c.as_str().to_string(),
            selected: filter.category == Selector::Only(c),
        }));

        let mut genders = vec![all(filter.gender.is_all())];
        genders.extend(Gender::ALL.into_iter().map(|g| FilterOption {
            value: g.tag().to_string(),
            label: gender_label(g).to_string(),
            selected: filter.gender == Selector::Only(g),
        }));

        Self {
            categories,
            genders,
            query: filter.query.clone(),
            active: filter.is_active(),
        }
    }
}

const fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Men => "Men",
        Gender::Women => "Women",
        Gender::Unisex => "Unisex",
    }
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogTemplate {
    pub filter: FilterView,
    pub products: Vec<ProductView>,
    pub total: usize,
    pub cart: CartView,
    pub advice: AdviceView,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub filter: FilterView,
    pub products: Vec<ProductView>,
    pub total: usize,
}

fn visible_products(shopper: &Shopper, state: &AppState) -> Vec<ProductView> {
    shopper
        .filter
        .apply(state.catalog())
        .iter()
        .map(|p| ProductView::new(p, state))
        .collect()
}

/// Display the catalog, applying any filter parameters first.
#[instrument(skip(state, shopper))]
pub async fn index(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
    Query(query): Query<CatalogQuery>,
) -> Result<CatalogTemplate> {
    let mut shopper = shopper.lock().await;
    shopper.tick(now());
    query.apply_to(&mut shopper.filter)?;

    let products = visible_products(&shopper, &state);
    tracing::debug!(visible = products.len(), "catalog rendered");

    Ok(CatalogTemplate {
        filter: FilterView::new(&shopper.filter),
        total: state.catalog().len(),
        products,
        cart: CartView::new(&shopper, &state),
        advice: AdviceView::new(&shopper),
    })
}

/// Clear every filter and go back to the catalog.
#[instrument(skip(shopper))]
pub async fn home(CurrentShopper(shopper): CurrentShopper) -> Redirect {
    shopper.lock().await.filter.reset();
    Redirect::to("/")
}

/// Clear every filter and return the full grid (HTMX).
#[instrument(skip(state, shopper))]
pub async fn reset_filters(
    State(state): State<AppState>,
    CurrentShopper(shopper): CurrentShopper,
) -> ProductGridTemplate {
    let mut shopper = shopper.lock().await;
    shopper.filter.reset();

    ProductGridTemplate {
        filter: FilterView::new(&shopper.filter),
        products: visible_products(&shopper, &state),
        total: state.catalog().len(),
    }
}
