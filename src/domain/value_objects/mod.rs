//! Value Objects for the cart

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Money value object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money { amount: Decimal, currency: String }

impl Money {
    pub fn new(amount: Decimal, currency: &str) -> Self { Self { amount, currency: currency.to_string() } }
    pub fn amount(&self) -> Decimal { self.amount }
    pub fn currency(&self) -> &str { &self.currency }
    pub fn is_zero(&self) -> bool { self.amount.is_zero() }
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency { return Err(MoneyError::CurrencyMismatch); }
        Ok(Money::new(self.amount + other.amount, &self.currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2} {}", self.amount.round_dp(2), self.currency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum MoneyError { CurrencyMismatch }
impl std::error::Error for MoneyError {}
impl fmt::Display for MoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Currency mismatch") }
}

/// Flat shipping fee, waived when the cart subtotal is strictly above the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_threshold: Decimal,
    pub flat_fee: Decimal,
}

impl ShippingPolicy {
    pub fn new(free_threshold: Decimal, flat_fee: Decimal) -> Self { Self { free_threshold, flat_fee } }

    /// Nothing ships for an empty cart, so the fee only applies to a positive subtotal.
    pub fn fee_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal.is_zero() || subtotal > self.free_threshold { Decimal::ZERO } else { self.flat_fee }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self { Self::new(Decimal::new(5000, 0), Decimal::new(500, 0)) }
}
