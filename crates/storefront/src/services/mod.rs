//! Services used by the route handlers.
//!
//! - [`style_advisor`] - catalog-aware style advice from the text model
//! - [`design_studio`] - shoe concepts from the image model
//! - [`shoppers`] - in-memory per-visitor state

pub mod design_studio;
pub mod shoppers;
pub mod style_advisor;

pub use design_studio::{DESIGN_FAILED, DesignStudio};
pub use shoppers::{SharedShopper, ShopperStore};
pub use style_advisor::StyleAdvisor;
