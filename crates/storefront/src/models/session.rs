//! Session-related types.

/// Session keys.
pub mod keys {
    /// Key for the visitor's shopper record id.
    pub const SHOPPER_ID: &str = "shopper_id";
}
