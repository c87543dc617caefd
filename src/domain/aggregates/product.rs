//! Product snapshot
//!
//! The catalog API is not consistent about field spelling (`categoriaId` vs
//! `categoriaid`) and omits optional text fields, so every product entering the
//! cart goes through this one type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub type ProductId = i64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "imagen", default)]
    pub image: String,
    #[serde(rename = "precio")]
    #[validate(custom = "non_negative_price")]
    pub price: Decimal,
    pub stock: u32,
    #[serde(rename = "categoriaId", alias = "categoriaid", default)]
    pub category_id: Option<i64>,
    #[serde(rename = "categoriaNombre", default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id, name: name.into(), description: String::new(), image: String::new(),
            price, stock, category_id: None, category_name: None,
        }
    }

    /// Parses a product as returned by the catalog API and checks its invariants.
    pub fn from_json(raw: &str) -> Result<Self, ProductError> {
        let product: Product = serde_json::from_str(raw).map_err(|e| ProductError::Malformed(e.to_string()))?;
        product.validate()?;
        Ok(product)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Malformed product: {0}")]
    Malformed(String),
    #[error("Invalid product: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn test_accepts_both_category_spellings() {
        let a = Product::from_json(r#"{"id":1,"nombre":"Pizza","precio":10,"stock":3,"categoriaId":7}"#).unwrap();
        let b = Product::from_json(r#"{"id":1,"nombre":"Pizza","precio":10,"stock":3,"categoriaid":7}"#).unwrap();
        assert_eq!(a.category_id, Some(7));
        assert_eq!(a, b);
        assert_eq!(a.description, "");
    }
    #[test]
    fn test_rejects_negative_price() {
        let err = Product::from_json(r#"{"id":1,"nombre":"Pizza","precio":-1,"stock":3}"#).unwrap_err();
        assert!(matches!(err, ProductError::Invalid(_)));
    }
    #[test]
    fn test_rejects_negative_stock() {
        let err = Product::from_json(r#"{"id":1,"nombre":"Pizza","precio":1,"stock":-3}"#).unwrap_err();
        assert!(matches!(err, ProductError::Malformed(_)));
    }
    #[test]
    fn test_rejects_empty_name() {
        assert!(Product::from_json(r#"{"id":1,"nombre":"","precio":1,"stock":1}"#).is_err());
    }
    #[test]
    fn test_serializes_canonical_spelling() {
        let mut p = Product::new(2, "Empanada", Decimal::new(250, 2), 4);
        p.category_id = Some(3);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["categoriaId"], 3);
        assert_eq!(json["precio"], 2.5);
    }
}
