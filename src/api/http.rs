use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};

use super::OrderApi;
use crate::config::Config;
use crate::domain::aggregates::{CreateOrderRequest, OrderConfirmation};
use crate::error::ApiError;

const GENERIC_REJECTION: &str = "Error al procesar la compra.";

/// Error body sent by the backend; older endpoints spell the field `mensaje`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "mensaje")]
    message: Option<String>,
}

/// `reqwest` implementation of [`OrderApi`].
#[derive(Clone, Debug)]
pub struct HttpOrderApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrderApi {
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone(), config.order_timeout)
    }

    fn orders_url(&self) -> String { format!("{}/orders", self.base_url) }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::rejection(status, response).await);
        }
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn rejection(status: StatusCode, response: Response) -> ApiError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_REJECTION.to_string());
        tracing::warn!(status = status.as_u16(), %message, "order API rejected request");
        ApiError::Rejected { status: status.as_u16(), message }
    }
}

#[async_trait]
impl OrderApi for HttpOrderApi {
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderConfirmation, ApiError> {
        tracing::debug!(user_id = request.user_id, lines = request.items.len(), "submitting order");
        let response = self.client.post(self.orders_url()).json(request).send().await?;
        Self::decode(response).await
    }

    async fn orders_for_user(&self, user_id: i64) -> Result<Vec<OrderConfirmation>, ApiError> {
        let url = format!("{}?usuarioId={user_id}", self.orders_url());
        let response = self.client.get(url).send().await?;
        Self::decode(response).await
    }

    async fn cancel_order(&self, order_id: i64) -> Result<OrderConfirmation, ApiError> {
        let url = format!("{}/{order_id}/cancelar", self.orders_url());
        let response = self.client.put(url).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_base_url_is_normalized() {
        let api = HttpOrderApi::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(api.orders_url(), "http://localhost:8080/api/orders");
    }
    #[test]
    fn test_error_body_spellings() {
        let a: ErrorBody = serde_json::from_str(r#"{"message":"sin stock"}"#).unwrap();
        let b: ErrorBody = serde_json::from_str(r#"{"mensaje":"sin stock"}"#).unwrap();
        let c: ErrorBody = serde_json::from_str(r#"{"status":500}"#).unwrap();
        assert_eq!(a.message.as_deref(), Some("sin stock"));
        assert_eq!(b.message, a.message);
        assert!(c.message.is_none());
    }
}
