//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{Product, ProductError, ProductId};
pub use order::{CreateOrderRequest, OrderConfirmation, OrderItemRequest, OrderLine, OrderStatus};
pub use cart::{Cart, CartLineItem, CartSummary};
