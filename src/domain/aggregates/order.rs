//! Order wire types
//!
//! The cart never owns an order: it builds a [`CreateOrderRequest`] and gets back
//! whatever the server created.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use crate::domain::aggregates::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pendiente,
    Confirmado,
    Terminado,
    Cancelado,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente",
            Self::Confirmado => "Confirmado",
            Self::Terminado => "Terminado",
            Self::Cancelado => "Cancelado",
        }
    }
}

/// Created-order representation returned by the order API. Only `id` and
/// `total` are guaranteed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub id: i64,
    pub total: Decimal,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub placed_at: Option<String>,
    #[serde(rename = "estado", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(rename = "usuarioId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "usuarioNombre", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(rename = "detallePedidoDTO", default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<OrderLine>,
}

impl OrderConfirmation {
    /// `fecha` parsed as an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
    pub fn placed_on(&self) -> Option<chrono::NaiveDate> {
        let raw = self.placed_at.as_deref()?;
        chrono::DateTime::parse_from_rfc3339(raw).map(|d| d.date_naive())
            .or_else(|_| chrono::NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d"))
            .ok()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "productoId")]
    pub product_id: ProductId,
    #[serde(rename = "nombreProducto", default)]
    pub product_name: String,
    #[serde(rename = "precioUnitario")]
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}
