//! Application state shared across handlers.

use std::sync::Arc;

use ragvynn_core::Catalog;

use crate::config::StorefrontConfig;
use crate::gemini::GenerativeModel;
use crate::services::{DesignStudio, ShopperStore, StyleAdvisor};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is built once at
/// startup and injected here; nothing reads it from a global.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    shoppers: ShopperStore,
    advisor: StyleAdvisor,
    studio: DesignStudio,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - The product catalog
    /// * `model` - Generative model behind the advisor and the design lab
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        model: Arc<dyn GenerativeModel>,
    ) -> Self {
        let shoppers = ShopperStore::new(config.shopper_idle_timeout, config.checkout);
        let advisor = StyleAdvisor::new(
            Arc::clone(&model),
            &catalog,
            config.gemini.advice_temperature,
        );
        let studio = DesignStudio::new(model);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shoppers,
                advisor,
                studio,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn shoppers(&self) -> &ShopperStore {
        &self.inner.shoppers
    }

    #[must_use]
    pub fn advisor(&self) -> &StyleAdvisor {
        &self.inner.advisor
    }

    #[must_use]
    pub fn studio(&self) -> &DesignStudio {
        &self.inner.studio
    }
}
