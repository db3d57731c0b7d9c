//! Catalog filtering.
//!
//! Three orthogonal predicates: category, gender tag and a free-text query
//! matched case-insensitively against name or brand. The visible set is
//! recomputed by a linear scan on every call; it is never cached.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::types::{Category, Gender, Selector};

/// The shopper's current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub category: Selector<Category>,
    pub gender: Selector<Gender>,
    pub query: String,
}

impl FilterState {
    /// Restore every selector to its wildcard and clear the query.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any selector is narrowing the catalog.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.category.is_all() || !self.gender.is_all() || !self.query.is_empty()
    }

    /// Whether `product` satisfies all three predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with_needle(product, &self.query.to_lowercase())
    }

    /// The visible products, in catalog order.
    ///
    /// Returned handles are the catalog's own `Arc`s.
    #[must_use]
    pub fn apply(&self, catalog: &Catalog) -> Vec<Arc<Product>> {
        let needle = self.query.to_lowercase();
        catalog
            .products()
            .iter()
            .filter(|p| self.matches_with_needle(p, &needle))
            .cloned()
            .collect()
    }

    /// `needle` is the query lowercased once by the caller.
    fn matches_with_needle(&self, product: &Product, needle: &str) -> bool {
        self.category.accepts(&product.category)
            && self.matches_gender(product)
            && matches_query(product, needle)
    }

    fn matches_gender(&self, product: &Product) -> bool {
        match self.gender {
            Selector::All => true,
            Selector::Only(gender) => product.has_tag(gender.tag()),
        }
    }
}

/// `needle` must already be lowercase. An empty needle matches everything.
fn matches_query(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.name.to_lowercase().contains(needle)
        || product.brand.to_lowercase().contains(needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::master().unwrap()
    }

    fn filter(category: Selector<Category>, gender: Selector<Gender>, query: &str) -> FilterState {
        FilterState {
            category,
            gender,
            query: query.to_string(),
        }
    }

    /// Every element of `subset` appears in `full`, by identity, in order.
    fn is_ordered_subsequence(subset: &[Arc<Product>], full: &[Arc<Product>]) -> bool {
        let mut rest = full.iter();
        subset
            .iter()
            .all(|wanted| rest.any(|candidate| Arc::ptr_eq(wanted, candidate)))
    }

    #[test]
    fn test_default_filter_returns_whole_catalog() {
        let catalog = catalog();
        let visible = FilterState::default().apply(&catalog);
        assert_eq!(visible.len(), catalog.len());
        assert!(!FilterState::default().is_active());
    }

    #[test]
    fn test_results_are_ordered_subsequences_satisfying_every_predicate() {
        let catalog = catalog();
        let categories = [Selector::All]
            .into_iter()
            .chain(Category::ALL.map(Selector::Only));
        for category in categories {
            let genders = [Selector::All].into_iter().chain(Gender::ALL.map(Selector::Only));
            for gender in genders {
                for query in ["", "nova", "ADIDAS", "balance", "#1", "zzz"] {
                    let state = filter(category, gender, query);
                    let visible = state.apply(&catalog);
                    assert!(is_ordered_subsequence(&visible, catalog.products()));
                    for product in &visible {
                        assert!(category.accepts(&product.category));
                        if let Selector::Only(g) = gender {
                            assert!(product.has_tag(g.tag()));
                        }
                        let q = query.to_lowercase();
                        assert!(
                            product.name.to_lowercase().contains(&q)
                                || product.brand.to_lowercase().contains(&q)
                        );
                    }
                    // Nothing that matches was left out.
                    let expected = catalog.products().iter().filter(|p| state.matches(p)).count();
                    assert_eq!(visible.len(), expected);
                }
            }
        }
    }

    #[test]
    fn test_filtering_is_idempotent_by_identity() {
        let catalog = catalog();
        let state = filter(Selector::Only(Category::Outdoor), Selector::All, "a");
        let first = state.apply(&catalog);
        let second = state.apply(&catalog);
        assert_eq!(first.len(), second.len());
        assert!(first.iter().zip(&second).all(|(a, b)| Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_query_matches_brand_case_insensitively() {
        let catalog = catalog();
        let visible = filter(Selector::All, Selector::All, "new BAL").apply(&catalog);
        assert_eq!(visible.len(), 20);
        assert!(visible.iter().all(|p| p.brand == "New Balance"));
    }

    #[test]
    fn test_query_matches_name() {
        let catalog = catalog();
        let visible = filter(Selector::All, Selector::All, "#82").apply(&catalog);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id.to_string(), "shoe-82");
    }

    #[test]
    fn test_query_does_not_match_description() {
        let catalog = catalog();
        let visible = filter(Selector::All, Selector::All, "silhouette").apply(&catalog);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_gender_filter_uses_tags() {
        let catalog = catalog();
        let visible = filter(Selector::All, Selector::Only(Gender::Men), "").apply(&catalog);
        // Indices 1, 4, 7, ... carry the "men" tag.
        assert_eq!(visible.len(), 27);
        assert!(visible.iter().all(|p| p.has_tag("men")));
    }

    #[test]
    fn test_combined_predicates() {
        let catalog = catalog();
        let visible = filter(
            Selector::Only(Category::Running),
            Selector::Only(Gender::Unisex),
            "adidas",
        )
        .apply(&catalog);
        // Adidas is indices 0..20; Running is i % 4 == 0; unisex is i % 3 == 0.
        let ids: Vec<_> = visible.iter().map(|p| p.sprite_index).collect();
        assert_eq!(ids, vec![0, 12]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let catalog = catalog();
        let visible = filter(Selector::All, Selector::All, "no such shoe").apply(&catalog);
        assert!(visible.is_empty());
    }

    #[test]
    fn test_filtering_does_not_mutate_catalog() {
        let catalog = catalog();
        let before: Vec<_> = catalog.products().iter().map(Arc::as_ptr).collect();
        let _ = filter(Selector::Only(Category::Basketball), Selector::All, "x").apply(&catalog);
        let after: Vec<_> = catalog.products().iter().map(Arc::as_ptr).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_reset() {
        let mut state = filter(Selector::Only(Category::Running), Selector::Only(Gender::Women), "x");
        assert!(state.is_active());
        state.reset();
        assert_eq!(state, FilterState::default());
    }
}
