//! Storefront Cart
//!
//! Client-side shopping cart for the food store front end.
//!
//! ## Features
//! - Persisted cart, one line per product, merged on add
//! - Stock-bounded quantity edits
//! - Subtotal, shipping and total with a free-shipping threshold
//! - Checkout against the remote order API
//! - Change notifications for every open view

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod session;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{HttpOrderApi, OrderApi};
pub use config::Config;
pub use domain::aggregates::{
    Cart, CartLineItem, CartSummary, CreateOrderRequest, OrderConfirmation, OrderStatus, Product, ProductId,
};
pub use domain::events::CartChanged;
pub use domain::value_objects::{Money, ShippingPolicy};
pub use error::{ApiError, CheckoutError, ConfigError, PrecheckReason, StorageError};
pub use service::{CartManager, CART_KEY};
pub use session::{Role, Session, User};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
