//! Core value types for the storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod size;

pub use category::{Category, Gender, ParseEnumError, Selector};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use size::{ParseSizeError, ShoeSize};
