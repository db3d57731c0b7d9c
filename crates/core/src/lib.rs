//! Ragvynn Core - storefront domain library.
//!
//! This crate holds the parts of the storefront that are pure data flow:
//! - [`catalog`] - The product catalog and its deterministic factory
//! - [`filter`] - Category / gender / text filtering over the catalog
//! - [`cart`] - The cart state machine (merge, remove, totals)
//! - [`checkout`] - The idle → processing → success checkout machine
//! - [`sprite`] - Sprite-sheet index to crop-offset mapping
//! - [`design`] - Generated design records and the design gallery
//! - [`slot`] - Request-generation slots for discarding stale async results
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP
//! clients, no clocks. Callers pass `Instant`s in explicitly, which keeps
//! every state transition deterministic under test.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod design;
pub mod filter;
pub mod slot;
pub mod sprite;
pub mod types;

pub use cart::{Cart, CartItem};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{CartPolicy, Checkout, CheckoutError, CheckoutState};
pub use design::{DesignGallery, GeneratedDesign, ImagePayload};
pub use filter::FilterState;
pub use slot::{Resolution, Slot, Ticket};
pub use sprite::{SpriteGrid, SpriteOffset};
pub use types::*;
