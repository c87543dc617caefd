//! Cart Manager
//!
//! The single entry point for reading and mutating the persisted cart. Every
//! mutation is a read-modify-write of the whole `carrito` document followed by
//! a [`CartChanged`](crate::domain::events::CartChanged) broadcast.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::api::OrderApi;
use crate::config::Config;
use crate::domain::aggregates::{Cart, CartLineItem, CartSummary, OrderConfirmation, Product, ProductId};
use crate::domain::events::{CartChanged, CartEvents};
use crate::domain::value_objects::ShippingPolicy;
use crate::error::{CheckoutError, PrecheckReason, StorageError};
use crate::session::Session;
use crate::storage::{read_json, write_json, KeyValueStore};

pub const CART_KEY: &str = "carrito";

pub struct CartManager {
    store: Arc<dyn KeyValueStore>,
    session: Session,
    orders: Arc<dyn OrderApi>,
    events: CartEvents,
    shipping: ShippingPolicy,
    currency: String,
}

impl CartManager {
    pub fn new(store: Arc<dyn KeyValueStore>, orders: Arc<dyn OrderApi>) -> Self {
        Self {
            session: Session::new(store.clone()),
            store, orders,
            events: CartEvents::default(),
            shipping: ShippingPolicy::default(),
            currency: "ARS".to_string(),
        }
    }

    pub fn from_config(config: &Config, store: Arc<dyn KeyValueStore>, orders: Arc<dyn OrderApi>) -> Self {
        Self::new(store, orders).with_shipping(config.shipping.clone(), &config.currency)
    }

    pub fn with_shipping(mut self, shipping: ShippingPolicy, currency: &str) -> Self {
        self.shipping = shipping;
        self.currency = currency.to_string();
        self
    }

    pub fn session(&self) -> &Session { &self.session }

    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> { self.events.subscribe() }

    /// The persisted cart. Missing or unreadable state reads as an empty cart.
    pub fn items(&self) -> Vec<CartLineItem> { self.load().into_items() }

    pub fn summary(&self) -> CartSummary { self.load().summary(&self.shipping, &self.currency) }

    pub fn add_item(&self, product: &Product, quantity: u32) -> Result<Vec<CartLineItem>, StorageError> {
        let mut cart = self.try_load()?;
        if cart.add_item(product.clone(), quantity) {
            tracing::debug!(product_id = product.id, quantity, "added to cart");
            self.save(&cart)?;
        } else {
            tracing::debug!(product_id = product.id, quantity, stock = product.stock, "add left cart unchanged");
        }
        Ok(cart.into_items())
    }

    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) -> Result<Vec<CartLineItem>, StorageError> {
        let mut cart = self.try_load()?;
        if cart.update_quantity(product_id, quantity) {
            tracing::debug!(product_id, quantity, "cart quantity updated");
            self.save(&cart)?;
        }
        Ok(cart.into_items())
    }

    pub fn remove_item(&self, product_id: ProductId) -> Result<Vec<CartLineItem>, StorageError> {
        let mut cart = self.try_load()?;
        if cart.remove_item(product_id) {
            tracing::debug!(product_id, "removed from cart");
            self.save(&cart)?;
        }
        Ok(cart.into_items())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CART_KEY)?;
        self.events.publish();
        Ok(())
    }

    /// Drops all cart state, as on a fresh session.
    pub fn reset(&self) -> Result<(), StorageError> { self.clear() }

    /// Signs the user out; the cart belongs to the session and goes with it.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.session.sign_out()?;
        self.clear()
    }

    /// Submits the cart as an order and clears it once the server accepts it.
    /// An accepted order is always returned, even if the local cart could not
    /// be cleared afterwards.
    pub async fn finalize_purchase(&self) -> Result<OrderConfirmation, CheckoutError> {
        let user_id = self
            .session
            .current_user_id()
            .ok_or(CheckoutError::PrecheckFailed(PrecheckReason::NotLoggedIn))?;
        let cart = self.try_load()?;
        if cart.is_empty() {
            return Err(CheckoutError::PrecheckFailed(PrecheckReason::EmptyCart));
        }

        let request = cart.to_order_request(user_id);
        let order = match self.orders.create_order(&request).await {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(user_id, error = %e, "checkout failed, cart kept");
                return Err(e.into());
            }
        };

        tracing::info!(user_id, order_id = order.id, total = %order.total, "order placed");
        if let Err(e) = self.clear() {
            tracing::warn!(order_id = order.id, error = %e, "order placed but cart could not be cleared");
        }
        Ok(order)
    }

    /// Read-only view: any storage failure reads as an empty cart.
    fn load(&self) -> Cart {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cart unavailable, showing empty");
            Cart::new()
        })
    }

    /// Corrupt data is discarded as an empty cart; I/O failures propagate so a
    /// mutation never overwrites a cart it could not read.
    fn try_load(&self) -> Result<Cart, StorageError> {
        match read_json::<Vec<CartLineItem>>(self.store.as_ref(), CART_KEY) {
            Ok(items) => Ok(Cart::from_items(items.unwrap_or_default())),
            Err(StorageError::Serialization(e)) => {
                tracing::warn!(error = %e, "discarding unreadable cart");
                Ok(Cart::new())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), CART_KEY, cart)?;
        self.events.publish();
        Ok(())
    }
}
