//! Final price resolution.
//!
//! A product's displayed price is its base price folded through the
//! buyer's option selections, then discounted. Resolution is total: stale
//! or partial selections (e.g. options added after a cart line was
//! created) are silently ignored, never an error.
//!
//! Determinism depends on option list order, which is preserved end to end
//! from persistence (`position` columns) through to this fold. Do not hand
//! this function options from an unordered map.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::options::{PriceType, ProductOption, SelectedOptions};

/// Resolve the final unit price in whole baht.
///
/// Folds `options` in list order: a selected value with
/// [`PriceType::Replace`] overwrites the accumulator (last `replace` wins,
/// by iteration order), [`PriceType::Add`] accumulates, and options with no
/// selection or no matching value contribute nothing. A positive
/// `discount_percent` then applies [`apply_discount`].
///
/// No floor is applied afterwards: a `replace` to 0 followed by nothing, or
/// pathological negative inputs, surface as-is rather than being silently
/// corrected.
#[must_use]
pub fn resolve_price(
    base_price: i64,
    selected: &SelectedOptions,
    options: &[ProductOption],
    discount_percent: i64,
) -> i64 {
    let mut price = base_price;

    for option in options {
        let Some(chosen) = selected.get(&option.name) else {
            continue;
        };
        let Some(value) = option.values.iter().find(|v| v.value == *chosen) else {
            continue;
        };
        match value.price_type {
            PriceType::Replace => price = value.price,
            PriceType::Add => price += value.price,
        }
    }

    if discount_percent > 0 {
        price = apply_discount(price, discount_percent);
    }

    price
}

/// Apply a percentage discount, rounding to the nearest whole baht.
///
/// `percent` is clamped to 0..=100. Rounding is half away from zero
/// (`RoundingStrategy::MidpointAwayFromZero`) - the one rounding rule used
/// for money anywhere in the system.
#[must_use]
pub fn apply_discount(price: i64, percent: i64) -> i64 {
    let percent = percent.clamp(0, 100);
    if percent == 0 {
        return price;
    }

    let discounted = Decimal::from(price) * Decimal::from(100 - percent) / Decimal::from(100);
    discounted
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::options::OptionValue;

    fn size_option() -> ProductOption {
        ProductOption {
            name: "ขนาด".to_owned(),
            values: vec![
                OptionValue::labeled("S"),
                OptionValue {
                    value: "M".to_owned(),
                    price: 50,
                    price_type: PriceType::Add,
                    stock: 10,
                    sku: None,
                },
            ],
        }
    }

    fn selected(pairs: &[(&str, &str)]) -> SelectedOptions {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_no_options_yields_base_price() {
        assert_eq!(resolve_price(299, &SelectedOptions::new(), &[], 0), 299);
    }

    #[test]
    fn test_add_accumulates() {
        let options = vec![size_option()];
        assert_eq!(
            resolve_price(299, &selected(&[("ขนาด", "M")]), &options, 0),
            349
        );
    }

    #[test]
    fn test_replace_overrides_base() {
        let options = vec![ProductOption {
            name: "ขนาด".to_owned(),
            values: vec![OptionValue {
                value: "M".to_owned(),
                price: 350,
                price_type: PriceType::Replace,
                stock: 0,
                sku: None,
            }],
        }];
        assert_eq!(
            resolve_price(299, &selected(&[("ขนาด", "M")]), &options, 0),
            350
        );
    }

    #[test]
    fn test_last_replace_wins_then_later_adds_accumulate() {
        let options = vec![
            ProductOption {
                name: "รุ่น".to_owned(),
                values: vec![OptionValue {
                    value: "พรีเมียม".to_owned(),
                    price: 500,
                    price_type: PriceType::Replace,
                    stock: 0,
                    sku: None,
                }],
            },
            ProductOption {
                name: "ขนาด".to_owned(),
                values: vec![OptionValue {
                    value: "ใหญ่".to_owned(),
                    price: 900,
                    price_type: PriceType::Replace,
                    stock: 0,
                    sku: None,
                }],
            },
            ProductOption {
                name: "สลักชื่อ".to_owned(),
                values: vec![OptionValue {
                    value: "ใช่".to_owned(),
                    price: 30,
                    price_type: PriceType::Add,
                    stock: 0,
                    sku: None,
                }],
            },
        ];
        let chosen = selected(&[("รุ่น", "พรีเมียม"), ("ขนาด", "ใหญ่"), ("สลักชื่อ", "ใช่")]);
        // 299 -> replace 500 -> replace 900 -> +30
        assert_eq!(resolve_price(299, &chosen, &options, 0), 930);
    }

    #[test]
    fn test_unmatched_selections_contribute_nothing() {
        let options = vec![size_option()];
        // option not selected
        assert_eq!(resolve_price(299, &SelectedOptions::new(), &options, 0), 299);
        // selected label no longer exists on the product
        assert_eq!(
            resolve_price(299, &selected(&[("ขนาด", "XL")]), &options, 0),
            299
        );
        // selection for an option the product never had
        assert_eq!(
            resolve_price(299, &selected(&[("สี", "แดง")]), &options, 0),
            299
        );
    }

    #[test]
    fn test_discount_rounds_half_away_from_zero() {
        assert_eq!(resolve_price(299, &SelectedOptions::new(), &[], 10), 269); // 269.1
        let options = vec![size_option()];
        assert_eq!(
            resolve_price(299, &selected(&[("ขนาด", "M")]), &options, 10),
            314
        ); // 314.1
        assert_eq!(apply_discount(15, 50), 8); // 7.5 rounds up, not to even
        assert_eq!(apply_discount(25, 50), 13); // 12.5
        assert_eq!(apply_discount(-15, 50), -8); // away from zero on negatives too
    }

    #[test]
    fn test_discount_bounds() {
        assert_eq!(apply_discount(299, 0), 299);
        assert_eq!(apply_discount(299, 100), 0);
        // out-of-range percentages clamp rather than explode
        assert_eq!(apply_discount(299, 250), 0);
        assert_eq!(apply_discount(299, -10), 299);
    }

    #[test]
    fn test_no_negative_floor_is_applied() {
        // Canonical options from the validated API path never carry negative
        // prices, but resolution is total over whatever it is handed and
        // deliberately does not floor the result.
        let options = vec![ProductOption {
            name: "ส่วนลดพิเศษ".to_owned(),
            values: vec![OptionValue {
                value: "มี".to_owned(),
                price: -400,
                price_type: PriceType::Add,
                stock: 0,
                sku: None,
            }],
        }];
        assert_eq!(
            resolve_price(299, &selected(&[("ส่วนลดพิเศษ", "มี")]), &options, 0),
            -101
        );
    }

    #[test]
    fn test_replace_to_zero_stays_zero() {
        let options = vec![ProductOption {
            name: "โปรโมชัน".to_owned(),
            values: vec![OptionValue {
                value: "แจกฟรี".to_owned(),
                price: 0,
                price_type: PriceType::Replace,
                stock: 0,
                sku: None,
            }],
        }];
        assert_eq!(
            resolve_price(299, &selected(&[("โปรโมชัน", "แจกฟรี")]), &options, 0),
            0
        );
    }
}
