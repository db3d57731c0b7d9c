//! In-memory shopper records.
//!
//! Records are keyed by a random id kept in the visitor's session and are
//! evicted after a period of inactivity. Nothing is persisted.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::CheckoutConfig;
use crate::models::Shopper;

/// A shopper record shared between concurrent requests of one visitor.
pub type SharedShopper = Arc<Mutex<Shopper>>;

/// Upper bound on live shopper records, and on live sessions.
pub const MAX_SHOPPERS: u64 = 10_000;

/// Store of live shopper records.
#[derive(Clone)]
pub struct ShopperStore {
    cache: Cache<Uuid, SharedShopper>,
    checkout: CheckoutConfig,
}

impl ShopperStore {
    #[must_use]
    pub fn new(idle_timeout: Duration, checkout: CheckoutConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_SHOPPERS)
            .time_to_idle(idle_timeout)
            .build();

        Self { cache, checkout }
    }

    /// The record for `id`, created empty on first use.
    pub async fn get_or_create(&self, id: Uuid) -> SharedShopper {
        let checkout = self.checkout;
        self.cache
            .get_with(id, async move {
                Arc::new(Mutex::new(Shopper::new(checkout.delay, checkout.cart_policy)))
            })
            .await
    }
}
