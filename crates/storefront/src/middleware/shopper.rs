//! Shopper extractor.
//!
//! Resolves the visitor's shopper record from the session, creating both the
//! session entry and the record on first contact.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::session_keys;
use crate::services::SharedShopper;
use crate::state::AppState;

/// The current visitor's shopper record.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentShopper(shopper): CurrentShopper) -> impl IntoResponse {
///     let shopper = shopper.lock().await;
///     shopper.cart.quantity_total().to_string()
/// }
/// ```
pub struct CurrentShopper(pub SharedShopper);

impl FromRequestParts<AppState> for CurrentShopper {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))?;

        let id = if let Some(id) = session.get::<Uuid>(session_keys::SHOPPER_ID).await? {
            id
        } else {
            let id = Uuid::new_v4();
            session.insert(session_keys::SHOPPER_ID, id).await?;
            tracing::debug!(shopper_id = %id, "new shopper");
            id
        };

        Ok(Self(state.shoppers().get_or_create(id).await))
    }
}
