//! Cart Aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::aggregates::product::{Product, ProductId};
use crate::domain::aggregates::order::{CreateOrderRequest, OrderItemRequest};
use crate::domain::value_objects::{Money, ShippingPolicy};

/// One product-and-quantity entry. `subtotal` is always `producto.precio * cantidad`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "producto")]
    product: Product,
    #[serde(rename = "cantidad")]
    quantity: u32,
    subtotal: Decimal,
}

impl CartLineItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        let subtotal = product.price * Decimal::from(quantity);
        Self { product, quantity, subtotal }
    }
    pub fn product(&self) -> &Product { &self.product }
    pub fn product_id(&self) -> ProductId { self.product.id }
    pub fn quantity(&self) -> u32 { self.quantity }
    pub fn subtotal(&self) -> Decimal { self.subtotal }
    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.subtotal = self.product.price * Decimal::from(quantity);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

/// Ordered line items, at most one per product id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    /// Rebuilds a cart from persisted line items, folding duplicate product ids
    /// into the first occurrence and dropping empty lines.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            match cart.items.iter_mut().find(|i| i.product_id() == item.product_id()) {
                Some(existing) => {
                    let merged = existing.quantity.saturating_add(item.quantity);
                    existing.set_quantity(merged);
                }
                None => cart.items.push(CartLineItem::new(item.product, item.quantity)),
            }
        }
        cart
    }

    pub fn items(&self) -> &[CartLineItem] { &self.items }
    pub fn into_items(self) -> Vec<CartLineItem> { self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn line_count(&self) -> usize { self.items.len() }
    pub fn item_count(&self) -> u32 { self.items.iter().map(|i| i.quantity).sum() }

    /// Merges `quantity` units of `product` into the cart. The incoming snapshot
    /// replaces the stored one and the line is clamped to its stock; a line whose
    /// product is now out of stock is dropped. Returns whether the cart changed.
    pub fn add_item(&mut self, product: Product, quantity: u32) -> bool {
        if quantity == 0 { return false; }
        let stock = product.stock;
        let Some(index) = self.items.iter().position(|i| i.product_id() == product.id) else {
            if stock == 0 { return false; }
            self.items.push(CartLineItem::new(product, quantity.min(stock)));
            return true;
        };
        if stock == 0 {
            self.items.remove(index);
            return true;
        }
        let existing = &mut self.items[index];
        let merged = existing.quantity.saturating_add(quantity).min(stock);
        let unchanged = merged == existing.quantity && existing.product == product;
        existing.product = product;
        existing.set_quantity(merged);
        !unchanged
    }

    /// `0` removes the line, `1..=stock` sets it, anything else is ignored.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        let Some(index) = self.items.iter().position(|i| i.product_id() == product_id) else { return false };
        if quantity == 0 {
            self.items.remove(index);
            return true;
        }
        let item = &mut self.items[index];
        if quantity > item.product.stock || quantity == item.quantity { return false; }
        item.set_quantity(quantity);
        true
    }

    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id() != product_id);
        self.items.len() != before
    }

    pub fn subtotal(&self) -> Decimal { self.items.iter().map(|i| i.subtotal).sum() }

    pub fn summary(&self, policy: &ShippingPolicy, currency: &str) -> CartSummary {
        let subtotal = Money::new(self.subtotal(), currency);
        let shipping = Money::new(policy.fee_for(subtotal.amount()), currency);
        let total = subtotal.add(&shipping).unwrap_or_else(|_| subtotal.clone());
        CartSummary { item_count: self.item_count(), subtotal, shipping, total }
    }

    pub fn to_order_request(&self, user_id: i64) -> CreateOrderRequest {
        CreateOrderRequest {
            user_id,
            items: self.items.iter().map(|i| OrderItemRequest { product_id: i.product_id(), quantity: i.quantity }).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: ProductId, price: i64, stock: u32) -> Product {
        Product::new(id, format!("Product {id}"), Decimal::new(price, 0), stock)
    }

    #[test]
    fn test_cart_operations() {
        let mut cart = Cart::new();
        assert!(cart.add_item(product(1, 10, 10), 2));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.subtotal(), Decimal::new(20, 0));
        assert!(cart.add_item(product(1, 10, 10), 3));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity(), 5); // Merged
        assert_eq!(cart.items()[0].subtotal(), Decimal::new(50, 0));
    }

    #[test]
    fn test_add_clamps_to_stock() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10, 4), 3);
        cart.add_item(product(1, 10, 4), 3);
        assert_eq!(cart.items()[0].quantity(), 4);
        assert_eq!(cart.items()[0].subtotal(), Decimal::new(40, 0));
        assert!(!cart.add_item(product(1, 10, 4), 1));
    }

    #[test]
    fn test_add_with_lower_stock_snapshot_shrinks_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10, 9), 5);
        assert!(cart.add_item(product(1, 10, 2), 1));
        assert_eq!(cart.items()[0].quantity(), 2);
        assert_eq!(cart.items()[0].product().stock, 2);
        assert_eq!(cart.items()[0].subtotal(), Decimal::new(20, 0));
    }

    #[test]
    fn test_add_with_sold_out_snapshot_drops_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10, 9), 5);
        cart.add_item(product(2, 10, 9), 1);
        assert!(cart.add_item(product(1, 10, 0), 1));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].product_id(), 2);
    }

    #[test]
    fn test_add_out_of_stock_or_zero_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.add_item(product(1, 10, 0), 1));
        assert!(!cart.add_item(product(2, 10, 5), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(product(3, 1, 9), 1);
        cart.add_item(product(1, 1, 9), 1);
        cart.add_item(product(3, 1, 9), 1);
        let ids: Vec<_> = cart.items().iter().map(CartLineItem::product_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_update_quantity_bounds() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10, 5), 2);
        assert!(cart.update_quantity(1, 5));
        assert_eq!(cart.items()[0].subtotal(), Decimal::new(50, 0));
        assert!(!cart.update_quantity(1, 6));
        assert_eq!(cart.items()[0].quantity(), 5);
        assert!(!cart.update_quantity(99, 1));
        assert!(cart.update_quantity(1, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10, 5), 1);
        cart.add_item(product(2, 10, 5), 1);
        assert!(!cart.remove_item(42));
        assert!(cart.remove_item(1));
        assert_eq!(cart.items()[0].product_id(), 2);
    }

    #[test]
    fn test_summary_shipping() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 1500, 10), 3);
        let summary = cart.summary(&ShippingPolicy::default(), "ARS");
        assert_eq!(summary.subtotal.amount(), Decimal::new(4500, 0));
        assert_eq!(summary.shipping.amount(), Decimal::new(500, 0));
        assert_eq!(summary.total.amount(), Decimal::new(5000, 0));

        cart.add_item(product(2, 700, 10), 1);
        let summary = cart.summary(&ShippingPolicy::default(), "ARS");
        assert_eq!(summary.subtotal.amount(), Decimal::new(5200, 0));
        assert!(summary.shipping.is_zero());
        assert_eq!(summary.item_count, 4);
    }

    #[test]
    fn test_from_items_folds_duplicates() {
        let items = vec![
            CartLineItem::new(product(1, 10, 9), 2),
            CartLineItem::new(product(2, 10, 9), 0),
            CartLineItem::new(product(1, 10, 9), 1),
        ];
        let cart = Cart::from_items(items);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items()[0].quantity(), 3);
        assert_eq!(cart.items()[0].subtotal(), Decimal::new(30, 0));
    }

    #[test]
    fn test_order_request() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10, 9), 2);
        cart.add_item(product(7, 3, 9), 1);
        let req = cart.to_order_request(5);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"userId": 5, "items": [{"productId": 1, "quantity": 2}, {"productId": 7, "quantity": 1}]}));
    }
}
