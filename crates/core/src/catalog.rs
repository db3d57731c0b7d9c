//! The product catalog.
//!
//! The catalog is built once at bootstrap by [`Catalog::master`] and handed to
//! the rest of the system. Products are immutable and shared by `Arc`, so
//! filtered views and cart lines point at the very same records.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sprite::SpriteGrid;
use crate::types::{Category, Gender, Price, ProductId, ShoeSize};

/// Number of silhouettes in the master collection.
pub const MASTER_COLLECTION_SIZE: u32 = 82;

const NAME_PREFIXES: [&str; 10] = [
    "Aero", "Vortex", "Zenith", "Nova", "Titan", "Kinetic", "Onyx", "Crest", "Flux", "Apex",
];
const NAME_SUFFIXES: [&str; 8] = [
    "V-LAB", "Elite", "Prime", "Core", "Shift", "Ultima", "Pro", "Edition",
];
const GENDER_ROTATION: [Gender; 3] = [Gender::Unisex, Gender::Men, Gender::Women];
const FEATURES: [&str; 3] = [
    "High-Fidelity Mesh",
    "Anatomical Support",
    "Kinetic Sole Architecture",
];
const DEFAULT_COLOR: &str = "Original Palette";

/// Errors building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A product points past the end of the sprite grid.
    #[error("sprite index {index} does not fit a grid of {capacity} cells")]
    SpriteOverflow { index: u32, capacity: u32 },

    /// Two products share a sprite cell.
    #[error("sprite index {0} is used by more than one product")]
    DuplicateSprite(u32),

    /// Two products share an ID.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub description: String,
    pub category: Category,
    /// Flat index into the sprite sheet grid.
    pub sprite_index: u32,
    pub sizes: Vec<ShoeSize>,
    pub colors: Vec<String>,
    /// Average rating out of 5.
    pub rating: Decimal,
    pub reviews_count: u32,
    pub features: Vec<String>,
    /// Free-text tags; gender filtering matches against these.
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
}

impl Product {
    /// Whether the product carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// First listed size, used by quick add.
    #[must_use]
    pub fn default_size(&self) -> Option<ShoeSize> {
        self.sizes.first().copied()
    }

    /// First listed color, used by quick add.
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(String::as_str)
    }

    #[must_use]
    pub fn offers_size(&self, size: ShoeSize) -> bool {
        self.sizes.contains(&size)
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

/// The full, ordered product list.
///
/// Cheap to clone; clones share the same products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Arc<Product>]>,
    grid: SpriteGrid,
}

impl Catalog {
    /// Build the master collection on the master sprite grid.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the collection does not fit the grid.
    pub fn master() -> Result<Self, CatalogError> {
        Self::generate(MASTER_COLLECTION_SIZE, SpriteGrid::MASTER)
    }

    /// Build `count` products with the deterministic archive generator.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SpriteOverflow` if `count` exceeds the grid.
    pub fn generate(count: u32, grid: SpriteGrid) -> Result<Self, CatalogError> {
        Self::from_products((0..count).map(archive_entry).collect(), grid)
    }

    /// Wrap an explicit product list, validating it against the grid.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if a sprite index is out of range or reused,
    /// or if two products share an ID.
    pub fn from_products(products: Vec<Product>, grid: SpriteGrid) -> Result<Self, CatalogError> {
        let mut sprites = HashSet::with_capacity(products.len());
        let mut ids = HashSet::with_capacity(products.len());
        for product in &products {
            if grid.cell(product.sprite_index).is_none() {
                return Err(CatalogError::SpriteOverflow {
                    index: product.sprite_index,
                    capacity: grid.capacity(),
                });
            }
            if !sprites.insert(product.sprite_index) {
                return Err(CatalogError::DuplicateSprite(product.sprite_index));
            }
            if !ids.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            grid,
        })
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The sprite grid every product's `sprite_index` addresses.
    #[must_use]
    pub const fn grid(&self) -> SpriteGrid {
        self.grid
    }
}

/// Generate archive entry `index` (0-based).
#[allow(clippy::indexing_slicing)] // every index is reduced modulo its array length
fn archive_entry(index: u32) -> Product {
    let number = index + 1;
    let brand = match index {
        0..20 => "Adidas",
        20..40 => "Asics",
        40..60 => "New Balance",
        _ => "Nike",
    };
    let category = Category::ALL[(index % 4) as usize];
    let prefix = NAME_PREFIXES[(index % 10) as usize];
    let suffix = NAME_SUFFIXES[(index % 8) as usize];
    let gender = GENDER_ROTATION[(index % 3) as usize];

    Product {
        id: ProductId::new(number),
        name: format!("{prefix} {suffix} #{number}"),
        brand: brand.to_string(),
        // 85 + 2.5 * index
        price: Price::usd(Decimal::new(850 + 25 * i64::from(index), 1)),
        description: format!(
            "Archive entry #{number}. A unique silhouette from our proprietary collection, \
             featuring high-fidelity architectural detailing and performance-grade materials."
        ),
        category,
        sprite_index: index,
        sizes: vec![
            ShoeSize::whole(7),
            ShoeSize::whole(8),
            ShoeSize::half_above(8),
            ShoeSize::whole(9),
            ShoeSize::whole(10),
            ShoeSize::whole(11),
            ShoeSize::whole(12),
        ],
        colors: vec![DEFAULT_COLOR.to_string()],
        rating: Decimal::new(400 + i64::from((index * 37) % 100), 2),
        reviews_count: 12 + (index * 53) % 200,
        features: FEATURES.iter().map(ToString::to_string).collect(),
        tags: vec!["unique".to_string(), gender.tag().to_string()],
        keywords: vec![
            brand.to_lowercase(),
            category.as_str().to_lowercase(),
            "archive".to_string(),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_master_collection_shape() {
        let catalog = Catalog::master().unwrap();
        assert_eq!(catalog.len(), 82);
        let first = &catalog.products()[0];
        assert_eq!(first.id.to_string(), "shoe-1");
        assert_eq!(first.name, "Aero V-LAB #1");
        assert_eq!(first.brand, "Adidas");
        assert_eq!(first.category, Category::Running);
        assert_eq!(first.price.to_string(), "$85.00");
        assert!(first.has_tag("unisex"));
        assert!(first.has_tag("unique"));
    }

    #[test]
    fn test_generator_rotations() {
        let catalog = Catalog::master().unwrap();
        let p = &catalog.products()[41];
        assert_eq!(p.id, ProductId::new(42));
        assert_eq!(p.brand, "New Balance");
        assert_eq!(p.category, Category::Lifestyle);
        assert_eq!(p.name, "Vortex Elite #42");
        assert_eq!(p.price.to_string(), "$187.50");
        assert!(p.has_tag("women"));
        assert_eq!(p.keywords, vec!["new balance", "lifestyle", "archive"]);

        let last = &catalog.products()[81];
        assert_eq!(last.brand, "Nike");
        assert!(last.has_tag("unisex"));
    }

    #[test]
    fn test_generator_is_deterministic() {
        let a = Catalog::master().unwrap();
        let b = Catalog::master().unwrap();
        for (x, y) in a.products().iter().zip(b.products()) {
            assert_eq!(x.as_ref(), y.as_ref());
        }
    }

    #[test]
    fn test_ratings_and_reviews_in_range() {
        let catalog = Catalog::master().unwrap();
        for p in catalog.products() {
            assert!(p.rating >= Decimal::new(4, 0) && p.rating < Decimal::new(5, 0));
            assert!((12..212).contains(&p.reviews_count));
        }
    }

    #[test]
    fn test_quick_add_defaults() {
        let catalog = Catalog::master().unwrap();
        let p = &catalog.products()[0];
        assert_eq!(p.default_size(), Some(ShoeSize::whole(7)));
        assert_eq!(p.default_color(), Some("Original Palette"));
    }

    #[test]
    fn test_offered_sizes_and_colors() {
        let catalog = Catalog::master().unwrap();
        let p = &catalog.products()[0];
        assert!(p.offers_size(ShoeSize::half_above(8)));
        assert!(!p.offers_size(ShoeSize::whole(13)));
        assert!(p.offers_color("Original Palette"));
        assert!(!p.offers_color("Neon Pink"));
    }

    #[test]
    fn test_overflowing_grid_is_rejected() {
        let err = Catalog::generate(13, SpriteGrid::new(4, 3)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::SpriteOverflow {
                index: 12,
                capacity: 12
            }
        );
    }

    #[test]
    fn test_duplicate_sprite_is_rejected() {
        let mut products: Vec<Product> = (0..2).map(archive_entry).collect();
        products[1].sprite_index = 0;
        let err = Catalog::from_products(products, SpriteGrid::MASTER).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSprite(0));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::master().unwrap();
        assert_eq!(catalog.get(ProductId::new(7)).unwrap().sprite_index, 6);
        assert!(catalog.get(ProductId::new(500)).is_none());
    }
}
