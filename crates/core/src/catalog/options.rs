//! Canonical product option types.
//!
//! A product carries a base price plus an ordered list of named options
//! (e.g. ขนาด/size, สี/color). Each option value independently adjusts or
//! overrides the price and tracks its own stock. This module defines the
//! single normalized representation all downstream logic consumes; the
//! legacy payload shapes that feed it are handled in
//! [`normalize`](super::normalize).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name given to the synthetic option created when a payload is a bare list
/// of labels with no option structure at all ("ตัวเลือก" = "Option").
pub const DEFAULT_OPTION_NAME: &str = "ตัวเลือก";

/// How an option value's price interacts with the product's base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "price_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// The value's price is added to the accumulated price.
    #[default]
    Add,
    /// The value's price replaces the accumulated price outright.
    Replace,
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

impl std::str::FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "replace" => Ok(Self::Replace),
            _ => Err(format!("invalid price type: {s}")),
        }
    }
}

/// One concrete choice within an option (e.g. "M", "แดง").
///
/// Wire format uses the legacy camelCase key `priceType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    /// Display label, non-blank after trimming.
    pub value: String,
    /// Price adjustment in whole baht.
    #[serde(default)]
    pub price: i64,
    /// Whether `price` adds to or replaces the base price.
    #[serde(default)]
    pub price_type: PriceType,
    /// Units in stock for this specific value.
    #[serde(default)]
    pub stock: i64,
    /// Optional merchant SKU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

impl OptionValue {
    /// A value carrying only a label, with all adjustments defaulted.
    #[must_use]
    pub fn labeled(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            price: 0,
            price_type: PriceType::Add,
            stock: 0,
            sku: None,
        }
    }
}

/// A named axis of product variation with its ordered values.
///
/// Invariants (guaranteed by normalization + validation, relied on
/// everywhere else): `name` is non-blank and unique within one product,
/// and `values` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOption {
    pub name: String,
    pub values: Vec<OptionValue>,
}

/// The buyer's choices at cart/checkout time: option name → chosen value
/// label. Stored as a snapshot on cart lines and order items, never on the
/// product itself.
pub type SelectedOptions = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_type_wire_spelling() {
        let json = serde_json::to_string(&PriceType::Replace).expect("serialize");
        assert_eq!(json, "\"replace\"");
        let back: PriceType = serde_json::from_str("\"add\"").expect("deserialize");
        assert_eq!(back, PriceType::Add);
    }

    #[test]
    fn test_option_value_defaults_on_deserialize() {
        let value: OptionValue = serde_json::from_str(r#"{"value":"M"}"#).expect("deserialize");
        assert_eq!(value, OptionValue::labeled("M"));
    }

    #[test]
    fn test_option_value_uses_camel_case_price_type() {
        let value: OptionValue =
            serde_json::from_str(r#"{"value":"M","price":50,"priceType":"replace"}"#)
                .expect("deserialize");
        assert_eq!(value.price_type, PriceType::Replace);

        let json = serde_json::to_string(&value).expect("serialize");
        assert!(json.contains("\"priceType\":\"replace\""));
        assert!(!json.contains("sku"));
    }
}
