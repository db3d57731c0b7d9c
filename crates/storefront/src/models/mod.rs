//! Storefront models.
//!
//! - [`session`] - keys for values stored in the session cookie's record
//! - [`shopper`] - the in-memory state of one visitor

pub mod session;
pub mod shopper;

pub use session::keys as session_keys;
pub use shopper::{Shopper, now};
