//! Order API client.

mod http;

pub use http::HttpOrderApi;

use async_trait::async_trait;
use crate::domain::aggregates::{CreateOrderRequest, OrderConfirmation};
use crate::error::ApiError;

#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderConfirmation, ApiError>;
    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<OrderConfirmation>, ApiError>;
    async fn cancel_order(&self, order_id: i64) -> Result<OrderConfirmation, ApiError>;
}
