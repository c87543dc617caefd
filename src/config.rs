use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::value_objects::ShippingPolicy;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub order_timeout: Duration,
    pub data_dir: PathBuf,
    pub shipping: ShippingPolicy,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api".to_string(),
            order_timeout: Duration::from_secs(15),
            data_dir: PathBuf::from(".storefront"),
            shipping: ShippingPolicy::default(),
            currency: "ARS".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let secs: u64 = parse_or(&lookup, "ORDER_TIMEOUT_SECS", defaults.order_timeout.as_secs())?;
        if secs == 0 {
            return Err(ConfigError::Invalid { var: "ORDER_TIMEOUT_SECS", value: "0".to_string() });
        }
        Ok(Self {
            api_url: lookup("STOREFRONT_API_URL").unwrap_or(defaults.api_url),
            order_timeout: Duration::from_secs(secs),
            data_dir: lookup("CART_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            shipping: ShippingPolicy::new(
                parse_or(&lookup, "FREE_SHIPPING_THRESHOLD", defaults.shipping.free_threshold)?,
                parse_or(&lookup, "SHIPPING_FEE", defaults.shipping.flat_fee)?,
            ),
            currency: lookup("CURRENCY").unwrap_or(defaults.currency),
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: T) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.order_timeout, Duration::from_secs(15));
        assert_eq!(config.shipping, ShippingPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[("SHIPPING_FEE", "750.50"), ("ORDER_TIMEOUT_SECS", "3"), ("CART_DATA_DIR", "/var/cart")])).unwrap();
        assert_eq!(config.shipping.flat_fee, Decimal::new(75050, 2));
        assert_eq!(config.order_timeout, Duration::from_secs(3));
        assert_eq!(config.data_dir, PathBuf::from("/var/cart"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(Config::from_lookup(lookup(&[("ORDER_TIMEOUT_SECS", "soon")])), Err(ConfigError::Invalid { var: "ORDER_TIMEOUT_SECS", .. })));
        assert!(Config::from_lookup(lookup(&[("ORDER_TIMEOUT_SECS", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("FREE_SHIPPING_THRESHOLD", "lots")])).is_err());
    }
}
