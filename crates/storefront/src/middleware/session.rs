//! Session middleware configuration.
//!
//! Sessions only carry the shopper id, so they live in memory next to the
//! shopper records and expire on the same inactivity window. The store is a
//! moka cache: idle and overflowing records are evicted rather than kept
//! until the process exits.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, session_store};

use crate::config::StorefrontConfig;
use crate::services::shoppers::MAX_SHOPPERS;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ragvynn_session";

/// Bounded in-memory session store.
#[derive(Clone)]
pub struct ShopperSessionStore {
    records: Cache<Id, Record>,
}

impl ShopperSessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration, max_sessions: u64) -> Self {
        let records = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .build();

        Self { records }
    }

    /// Live records, after pending evictions have run.
    pub async fn live_records(&self) -> u64 {
        self.records.run_pending_tasks().await;
        self.records.entry_count()
    }
}

impl fmt::Debug for ShopperSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopperSessionStore")
            .field("records", &self.records.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for ShopperSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.records.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let Some(record) = self.records.get(session_id).await else {
            return Ok(None);
        };
        if record.expiry_date > OffsetDateTime::now_utc() {
            Ok(Some(record))
        } else {
            self.records.invalidate(session_id).await;
            Ok(None)
        }
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer over a [`ShopperSessionStore`].
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<ShopperSessionStore> {
    let idle_seconds = i64::try_from(config.shopper_idle_timeout.as_secs()).unwrap_or(i64::MAX);
    let store = ShopperSessionStore::new(config.shopper_idle_timeout, MAX_SHOPPERS);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
