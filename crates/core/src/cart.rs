//! The cart state machine.
//!
//! Lines are keyed by (product id, size, color). Adding an existing key bumps
//! its quantity instead of appending a duplicate row. Totals are computed on
//! every call; nothing is cached.

use std::sync::Arc;

use crate::catalog::Product;
use crate::types::{CurrencyCode, Price, ShoeSize};

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product: Arc<Product>,
    pub size: ShoeSize,
    pub color: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// `price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }

    fn has_key(&self, product: &Product, size: ShoeSize, color: &str) -> bool {
        self.product.id == product.id && self.size == size && self.color == color
    }
}

/// In-memory cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of (product, size, color).
    ///
    /// Returns the index of the line that now holds it.
    pub fn add(&mut self, product: Arc<Product>, size: ShoeSize, color: impl Into<String>) -> usize {
        let color = color.into();
        if let Some(index) = self
            .items
            .iter()
            .position(|item| item.has_key(&product, size, &color))
        {
            if let Some(item) = self.items.get_mut(index) {
                item.quantity = item.quantity.saturating_add(1);
            }
            return index;
        }

        self.items.push(CartItem {
            product,
            size,
            color,
            quantity: 1,
        });
        self.items.len() - 1
    }

    /// Add one unit using the product's first size and first color.
    ///
    /// Returns `None` without touching the cart if the product lists no sizes
    /// or no colors.
    pub fn quick_add(&mut self, product: Arc<Product>) -> Option<usize> {
        let size = product.default_size()?;
        let color = product.default_color()?.to_string();
        Some(self.add(product, size, color))
    }

    /// Remove the line at `index`. Out-of-range indices leave the cart as is.
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Take `other`'s quantities out of this cart, line by line.
    ///
    /// Lines that reach zero are dropped. Lines `other` does not hold, and
    /// any surplus over what it holds, stay.
    pub fn deduct(&mut self, other: &Self) {
        for taken in &other.items {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.has_key(&taken.product, taken.size, &taken.color))
            {
                item.quantity = item.quantity.saturating_sub(taken.quantity);
            }
        }
        self.items.retain(|item| item.quantity > 0);
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ quantity, for the badge.
    #[must_use]
    pub fn quantity_total(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Σ price × quantity.
    #[must_use]
    pub fn price_total(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::default(), |item| item.product.price.currency_code);
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(Price::zero(currency), |acc, line| acc + line)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;

    fn products() -> Vec<Arc<Product>> {
        Catalog::master().unwrap().products().to_vec()
    }

    fn expected_total(cart: &Cart) -> Decimal {
        cart.items()
            .iter()
            .map(|i| i.product.price.amount * Decimal::from(i.quantity))
            .sum()
    }

    #[test]
    fn test_same_key_merges() {
        let p = products().remove(0);
        let mut cart = Cart::new();
        cart.add(p.clone(), ShoeSize::whole(9), "Black");
        cart.add(p, ShoeSize::whole(9), "Black");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.quantity_total(), 2);
    }

    #[test]
    fn test_different_size_is_a_new_line() {
        let p = products().remove(0);
        let mut cart = Cart::new();
        cart.add(p.clone(), ShoeSize::whole(9), "Black");
        cart.add(p, ShoeSize::whole(10), "Black");
        assert_eq!(cart.items().len(), 2);
        assert!(cart.items().iter().all(|i| i.quantity == 1));
    }

    #[test]
    fn test_different_color_is_a_new_line() {
        let p = products().remove(0);
        let mut cart = Cart::new();
        cart.add(p.clone(), ShoeSize::whole(9), "Black");
        cart.add(p, ShoeSize::whole(9), "White");
        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn test_merge_keeps_line_position() {
        let all = products();
        let mut cart = Cart::new();
        cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        cart.add(all[1].clone(), ShoeSize::whole(9), "Black");
        let index = cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        assert_eq!(index, 0);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].product.id, all[1].id);
    }

    #[test]
    fn test_quick_add_uses_first_size_and_color() {
        let p = products().remove(3);
        let mut cart = Cart::new();
        cart.quick_add(p.clone()).unwrap();
        cart.quick_add(p).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].size, ShoeSize::whole(7));
        assert_eq!(cart.items()[0].color, "Original Palette");
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_quick_add_without_sizes_is_refused() {
        let mut bare = products()[0].as_ref().clone();
        bare.sizes.clear();
        let mut cart = Cart::new();
        assert!(cart.quick_add(Arc::new(bare)).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_by_index() {
        let all = products();
        let mut cart = Cart::new();
        cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        cart.add(all[1].clone(), ShoeSize::whole(9), "Black");
        let removed = cart.remove(0).unwrap();
        assert_eq!(removed.product.id, all[0].id);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id, all[1].id);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let all = products();
        let mut cart = Cart::new();
        cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        assert!(cart.remove(5).is_none());
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_totals_stay_consistent_across_mutations() {
        let all = products();
        let mut cart = Cart::new();
        assert_eq!(cart.price_total().amount, Decimal::ZERO);

        let script: [(usize, u16, &str); 6] = [
            (0, 9, "Black"),
            (5, 10, "Black"),
            (0, 9, "Black"),
            (81, 12, "Original Palette"),
            (5, 10, "Black"),
            (5, 11, "Black"),
        ];
        for (step, (product, size, color)) in script.into_iter().enumerate() {
            cart.add(all[product].clone(), ShoeSize::whole(size), color);
            if step == 3 {
                cart.remove(1);
            }
            assert_eq!(cart.price_total().amount, expected_total(&cart));
        }
        cart.remove(0);
        assert_eq!(cart.price_total().amount, expected_total(&cart));
        cart.clear();
        assert_eq!(cart.price_total().amount, Decimal::ZERO);
        assert_eq!(cart.quantity_total(), 0);
    }

    #[test]
    fn test_price_total_value() {
        let all = products();
        let mut cart = Cart::new();
        cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        cart.add(all[1].clone(), ShoeSize::half_above(8), "Black");
        // 2 × 85.00 + 87.50
        assert_eq!(cart.price_total().to_string(), "$257.50");
    }

    #[test]
    fn test_deduct_takes_only_what_was_ordered() {
        let all = products();
        let mut order = Cart::new();
        order.add(all[0].clone(), ShoeSize::whole(9), "Black");
        order.add(all[1].clone(), ShoeSize::whole(9), "Black");

        let mut cart = order.clone();
        cart.add(all[0].clone(), ShoeSize::whole(9), "Black");
        cart.add(all[2].clone(), ShoeSize::whole(9), "Black");
        cart.remove(1);

        cart.deduct(&order);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].product.id, all[0].id);
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[1].product.id, all[2].id);
    }
}
