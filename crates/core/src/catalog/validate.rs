//! The strict option gate for the product create/update API.
//!
//! Runs after [`normalize_options`](super::normalize::normalize_options)
//! and [`dedupe_option_names`](super::normalize::dedupe_option_names),
//! before persistence. Unlike the lenient
//! [`coerce_options`](super::normalize::coerce_options) finisher it never
//! repairs input: the first violation aborts the whole submission with a
//! message naming the offending option and value, and the API layer maps
//! that to HTTP 400. All-or-nothing per product.

use super::normalize::OptionDraft;
use super::options::{OptionValue, PriceType, ProductOption};

/// A single option rule violation.
///
/// The `Display` output is the user-facing rejection message, so the
/// variants identify the option (and where applicable the value label)
/// that triggered them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("name of option \"{name}\" must not be blank")]
    BlankName { name: String },
    #[error("values of option \"{name}\" must not be empty")]
    EmptyValues { name: String },
    #[error("value of option \"{name}\" must not be blank")]
    BlankValue { name: String },
    #[error("price of option \"{name}: {value}\" must be zero or greater")]
    NegativePrice { name: String, value: String },
    #[error("priceType of option \"{name}: {value}\" must be either \"add\" or \"replace\"")]
    InvalidPriceType { name: String, value: String },
    #[error("stock of option \"{name}: {value}\" must be zero or greater")]
    NegativeStock { name: String, value: String },
}

/// Validate drafts and produce the canonical option list.
///
/// Checks, in order, per option: non-blank name (normalization already
/// guarantees it), non-empty values; per value:
/// non-blank label, price ≥ 0, `priceType` ∈ {add, replace}, stock ≥ 0.
///
/// # Errors
///
/// Returns the first violation found; nothing is persisted on failure.
pub fn validate_options(drafts: &[OptionDraft]) -> Result<Vec<ProductOption>, OptionError> {
    drafts.iter().map(validate_option).collect()
}

fn validate_option(draft: &OptionDraft) -> Result<ProductOption, OptionError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(OptionError::BlankName {
            name: draft.name.clone(),
        });
    }
    if draft.values.is_empty() {
        return Err(OptionError::EmptyValues {
            name: name.to_owned(),
        });
    }

    let values = draft
        .values
        .iter()
        .map(|value| {
            let label = value.value.trim();
            if label.is_empty() {
                return Err(OptionError::BlankValue {
                    name: name.to_owned(),
                });
            }
            if value.price < 0 {
                return Err(OptionError::NegativePrice {
                    name: name.to_owned(),
                    value: label.to_owned(),
                });
            }
            let price_type =
                value
                    .price_type
                    .parse::<PriceType>()
                    .map_err(|_| OptionError::InvalidPriceType {
                        name: name.to_owned(),
                        value: label.to_owned(),
                    })?;
            if value.stock < 0 {
                return Err(OptionError::NegativeStock {
                    name: name.to_owned(),
                    value: label.to_owned(),
                });
            }
            Ok(OptionValue {
                value: label.to_owned(),
                price: value.price,
                price_type,
                stock: value.stock,
                sku: value.sku.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProductOption {
        name: name.to_owned(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::normalize::{ValueDraft, dedupe_option_names, normalize_options};
    use serde_json::json;

    fn drafts_from(raw: serde_json::Value) -> Vec<OptionDraft> {
        dedupe_option_names(normalize_options(&raw))
    }

    #[test]
    fn test_valid_payload_produces_canonical_options() {
        let drafts = drafts_from(json!([
            {"name": "ขนาด", "values": [
                {"value": "S"},
                {"value": "M", "price": 50, "priceType": "add", "stock": 10},
            ]},
        ]));
        let options = validate_options(&drafts).expect("valid options");
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].values[1].price_type, PriceType::Add);
        assert_eq!(options[0].values[1].price, 50);
    }

    #[test]
    fn test_rejects_negative_price_with_identifying_message() {
        let drafts = drafts_from(json!([
            {"name": "ขนาด", "values": [{"value": "M", "price": -50}]},
        ]));
        let err = validate_options(&drafts).expect_err("must reject");
        assert_eq!(
            err.to_string(),
            "price of option \"ขนาด: M\" must be zero or greater"
        );
    }

    #[test]
    fn test_rejects_unknown_price_type() {
        let drafts = drafts_from(json!([
            {"name": "สี", "values": [{"value": "แดง", "priceType": "minus"}]},
        ]));
        let err = validate_options(&drafts).expect_err("must reject");
        assert_eq!(
            err.to_string(),
            "priceType of option \"สี: แดง\" must be either \"add\" or \"replace\""
        );
    }

    #[test]
    fn test_rejects_negative_stock() {
        let drafts = drafts_from(json!([
            {"name": "ขนาด", "values": [{"value": "M", "stock": -1}]},
        ]));
        let err = validate_options(&drafts).expect_err("must reject");
        assert_eq!(
            err.to_string(),
            "stock of option \"ขนาด: M\" must be zero or greater"
        );
    }

    #[test]
    fn test_rejects_empty_values_list() {
        // Normalization drops empty options, so an empty values list can
        // only reach the gate through a hand-built draft. Still rejected.
        let drafts = vec![OptionDraft {
            name: "ขนาด".to_owned(),
            values: Vec::new(),
        }];
        let err = validate_options(&drafts).expect_err("must reject");
        assert_eq!(err.to_string(), "values of option \"ขนาด\" must not be empty");
    }

    #[test]
    fn test_rejects_blank_labels_on_hand_built_drafts() {
        let drafts = vec![OptionDraft {
            name: "  ".to_owned(),
            values: vec![ValueDraft {
                value: "M".to_owned(),
                price: 0,
                price_type: "add".to_owned(),
                stock: 0,
                sku: None,
            }],
        }];
        assert!(matches!(
            validate_options(&drafts),
            Err(OptionError::BlankName { .. })
        ));

        let drafts = vec![OptionDraft {
            name: "ขนาด".to_owned(),
            values: vec![ValueDraft {
                value: "   ".to_owned(),
                price: 0,
                price_type: "add".to_owned(),
                stock: 0,
                sku: None,
            }],
        }];
        let err = validate_options(&drafts).expect_err("must reject");
        assert_eq!(err.to_string(), "value of option \"ขนาด\" must not be blank");
    }

    #[test]
    fn test_first_violation_wins() {
        let drafts = drafts_from(json!([
            {"name": "ขนาด", "values": [{"value": "M", "price": -1, "stock": -1}]},
        ]));
        // price is checked before stock
        assert!(matches!(
            validate_options(&drafts),
            Err(OptionError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_all_or_nothing_across_options() {
        let drafts = drafts_from(json!([
            {"name": "ขนาด", "values": [{"value": "M"}]},
            {"name": "สี", "values": [{"value": "แดง", "price": -1}]},
        ]));
        assert!(validate_options(&drafts).is_err());
    }
}
