//! Option payload normalization.
//!
//! Product option data has accumulated several historical shapes: a
//! JSON-encoded string, the structured list of option objects, a flat list
//! of bare labels, and a mapping from option name to label list. This
//! module collapses all of them into one draft representation without ever
//! failing - malformed input degrades to "no options" so a product can
//! always be saved.
//!
//! Drafts preserve what strict checking needs to see: a negative price or
//! an unrecognized `priceType` string survives normalization so the
//! create/update API can reject it with a precise message ([`validate_options`](super::validate::validate_options)).
//! Paths without a client to bounce back to (seeding, bulk import) finish
//! with [`coerce_options`], which clamps instead.

use serde_json::Value;

use super::options::{DEFAULT_OPTION_NAME, OptionValue, PriceType, ProductOption};

/// Default wire spelling for a missing `priceType`.
const PRICE_TYPE_ADD: &str = "add";

/// An option as normalization sees it, before strict or lenient finishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDraft {
    pub name: String,
    pub values: Vec<ValueDraft>,
}

/// A single option value draft.
///
/// `price_type` stays a raw string here: "add"/"replace" are the only
/// accepted spellings, but anything else must reach the validation gate
/// intact to be rejected rather than silently repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDraft {
    pub value: String,
    pub price: i64,
    pub price_type: String,
    pub stock: i64,
    pub sku: Option<String>,
}

/// Coerce a raw option payload of any accepted shape into draft options.
///
/// Accepted shapes, tried in order:
/// 1. a JSON-encoded string (parsed first; parse failure yields no options)
/// 2. a list of option objects `[{name, values}, ...]`
/// 3. a flat list of bare labels, promoted to a single option named
///    [`DEFAULT_OPTION_NAME`]
/// 4. a mapping `{optionName: [labels...]}`, one option per key
///
/// Options with a blank name and values with a blank label are dropped;
/// an option left with no values is dropped entirely. This function never
/// fails - any unrecognized shape produces an empty list.
#[must_use]
pub fn normalize_options(raw: &Value) -> Vec<OptionDraft> {
    match raw {
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed) => normalize_parsed(&parsed),
            Err(_) => Vec::new(),
        },
        other => normalize_parsed(other),
    }
}

fn normalize_parsed(raw: &Value) -> Vec<OptionDraft> {
    match raw {
        Value::Array(items) => normalize_list(items),
        Value::Object(map) => {
            // A single bare option object is treated as a one-element list
            // rather than as a name→labels mapping.
            if map.contains_key("name") && map.contains_key("values") {
                normalize_option_object(raw).into_iter().collect()
            } else {
                normalize_map(map)
            }
        }
        _ => Vec::new(),
    }
}

/// Normalize a top-level list: either option objects or bare labels.
fn normalize_list(items: &[Value]) -> Vec<OptionDraft> {
    if items.iter().any(Value::is_object) {
        items.iter().filter_map(normalize_option_object).collect()
    } else {
        // No option objects at all: promote the labels to one synthetic
        // option.
        let values: Vec<ValueDraft> = items.iter().filter_map(normalize_value).collect();
        if values.is_empty() {
            Vec::new()
        } else {
            vec![OptionDraft {
                name: DEFAULT_OPTION_NAME.to_owned(),
                values,
            }]
        }
    }
}

/// Normalize the legacy `{optionName: [labels...]}` mapping.
///
/// `serde_json` maps iterate in key order, so options produced from this
/// shape are emitted sorted by name; list-shaped payloads keep their
/// submitted order.
fn normalize_map(map: &serde_json::Map<String, Value>) -> Vec<OptionDraft> {
    map.iter()
        .filter_map(|(name, labels)| {
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let Value::Array(labels) = labels else {
                return None;
            };
            let values: Vec<ValueDraft> = labels.iter().filter_map(normalize_value).collect();
            if values.is_empty() {
                return None;
            }
            Some(OptionDraft {
                name: name.to_owned(),
                values,
            })
        })
        .collect()
}

/// Normalize one `{name, values}` option object. Anything else is dropped.
fn normalize_option_object(raw: &Value) -> Option<OptionDraft> {
    let obj = raw.as_object()?;
    let name = label_of(obj.get("name")?)?;
    let values: Vec<ValueDraft> = obj
        .get("values")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(normalize_value).collect())
        .unwrap_or_default();
    if values.is_empty() {
        return None;
    }
    Some(OptionDraft { name, values })
}

/// Normalize one value: a bare label (string/number) or a value object.
fn normalize_value(raw: &Value) -> Option<ValueDraft> {
    match raw {
        Value::String(_) | Value::Number(_) => Some(ValueDraft {
            value: label_of(raw)?,
            price: 0,
            price_type: PRICE_TYPE_ADD.to_owned(),
            stock: 0,
            sku: None,
        }),
        Value::Object(obj) => {
            let value = label_of(obj.get("value")?)?;
            let price_type = match obj.get("priceType").or_else(|| obj.get("price_type")) {
                None | Some(Value::Null) => PRICE_TYPE_ADD.to_owned(),
                Some(Value::String(s)) => s.trim().to_owned(),
                Some(other) => other.to_string(),
            };
            Some(ValueDraft {
                value,
                price: amount_of(obj.get("price")),
                price_type,
                stock: amount_of(obj.get("stock")),
                sku: obj
                    .get("sku")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
            })
        }
        _ => None,
    }
}

/// Extract a trimmed, non-blank label from a string or number.
fn label_of(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce a numeric field to whole baht, preserving sign.
///
/// Accepts integers, floats (rounded half away from zero), and numeric
/// strings left over from form-encoded submissions. Anything else defaults
/// to 0.
fn amount_of(raw: Option<&Value>) -> i64 {
    match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(round_half_away))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(round_half_away))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation)] // catalog amounts are far below 2^52
fn round_half_away(x: f64) -> i64 {
    // f64::round already rounds half away from zero
    x.round() as i64
}

/// Rename later duplicates of an option name by appending " (2)", " (3)", …
/// until unique. Comparison is case-sensitive and exact; the first
/// occurrence always keeps its name and list order is preserved.
#[must_use]
pub fn dedupe_option_names(mut options: Vec<OptionDraft>) -> Vec<OptionDraft> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    for option in &mut options {
        if seen.insert(option.name.clone()) {
            continue;
        }
        let mut suffix = 2u32;
        loop {
            let candidate = format!("{} ({suffix})", option.name);
            if seen.insert(candidate.clone()) {
                option.name = candidate;
                break;
            }
            suffix += 1;
        }
    }
    options
}

/// Lenient finisher: clamp negative amounts to zero and fall back to
/// [`PriceType::Add`] for unrecognized price types.
///
/// This is the fallback for callers with no client to bounce input back to
/// (seeding, bulk import). The create/update API finishes with
/// [`validate_options`](super::validate::validate_options) instead, which
/// rejects rather than repairs.
#[must_use]
pub fn coerce_options(drafts: Vec<OptionDraft>) -> Vec<ProductOption> {
    drafts
        .into_iter()
        .map(|draft| ProductOption {
            name: draft.name,
            values: draft
                .values
                .into_iter()
                .map(|value| OptionValue {
                    value: value.value,
                    price: value.price.max(0),
                    price_type: value.price_type.parse::<PriceType>().unwrap_or_default(),
                    stock: value.stock.max(0),
                    sku: value.sku,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(option: &OptionDraft) -> Vec<&str> {
        option.values.iter().map(|v| v.value.as_str()).collect()
    }

    #[test]
    fn test_structured_list_passes_through() {
        let raw = json!([
            {"name": "ขนาด", "values": [
                {"value": "S"},
                {"value": "M", "price": 50, "priceType": "add", "stock": 10, "sku": "TS-M"},
            ]},
            {"name": "สี", "values": ["แดง", "ดำ"]},
        ]);
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "ขนาด");
        assert_eq!(labels(&options[0]), ["S", "M"]);
        assert_eq!(options[0].values[1].price, 50);
        assert_eq!(options[0].values[1].sku.as_deref(), Some("TS-M"));
        assert_eq!(options[1].name, "สี");
        assert_eq!(labels(&options[1]), ["แดง", "ดำ"]);
    }

    #[test]
    fn test_json_string_is_parsed_first() {
        let raw = json!(r#"[{"name":"ขนาด","values":["S","M"]}]"#);
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(labels(&options[0]), ["S", "M"]);
    }

    #[test]
    fn test_unparseable_string_yields_no_options() {
        assert!(normalize_options(&json!("not json {")).is_empty());
    }

    #[test]
    fn test_flat_label_list_promotes_to_default_option() {
        let raw = json!(["S", "M", "L", 42]);
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, DEFAULT_OPTION_NAME);
        assert_eq!(labels(&options[0]), ["S", "M", "L", "42"]);
        assert!(options[0].values.iter().all(|v| v.price == 0));
    }

    #[test]
    fn test_name_to_labels_map_promotes_one_option_per_key() {
        let raw = json!({"ขนาด": ["S", "M"], "สี": ["แดง"]});
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 2);
        // serde_json maps iterate in key order
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert!(names.contains(&"ขนาด"));
        assert!(names.contains(&"สี"));
    }

    #[test]
    fn test_blank_name_drops_option() {
        let raw = json!([
            {"name": "   ", "values": ["S"]},
            {"name": "สี", "values": ["แดง"]},
        ]);
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "สี");
    }

    #[test]
    fn test_blank_value_drops_value_not_option() {
        let raw = json!([{"name": "ขนาด", "values": ["  ", "M", {"value": ""}]}]);
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(labels(&options[0]), ["M"]);
    }

    #[test]
    fn test_option_with_no_surviving_values_is_dropped() {
        let raw = json!([{"name": "ขนาด", "values": ["  ", {"value": "   "}]}]);
        assert!(normalize_options(&raw).is_empty());

        let raw = json!([{"name": "ขนาด"}]);
        assert!(normalize_options(&raw).is_empty());
    }

    #[test]
    fn test_unrecognized_shapes_degrade_to_empty() {
        assert!(normalize_options(&json!(null)).is_empty());
        assert!(normalize_options(&json!(42)).is_empty());
        assert!(normalize_options(&json!(true)).is_empty());
        assert!(normalize_options(&json!({"ขนาด": "not-a-list"})).is_empty());
    }

    #[test]
    fn test_single_option_object_is_wrapped() {
        let raw = json!({"name": "ขนาด", "values": ["S", "M"]});
        let options = normalize_options(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "ขนาด");
    }

    #[test]
    fn test_negative_amounts_and_bad_price_type_survive_drafting() {
        let raw = json!([{"name": "ขนาด", "values": [
            {"value": "M", "price": -50, "priceType": "minus", "stock": -3},
        ]}]);
        let options = normalize_options(&raw);
        assert_eq!(options[0].values[0].price, -50);
        assert_eq!(options[0].values[0].price_type, "minus");
        assert_eq!(options[0].values[0].stock, -3);
    }

    #[test]
    fn test_numeric_strings_and_floats_coerce_to_whole_baht() {
        let raw = json!([{"name": "ขนาด", "values": [
            {"value": "M", "price": "50", "stock": "7"},
            {"value": "L", "price": 49.5, "stock": 2.4},
        ]}]);
        let options = normalize_options(&raw);
        assert_eq!(options[0].values[0].price, 50);
        assert_eq!(options[0].values[0].stock, 7);
        assert_eq!(options[0].values[1].price, 50);
        assert_eq!(options[0].values[1].stock, 2);
    }

    #[test]
    fn test_renormalizing_coerced_output_is_idempotent() {
        let raw = json!(["S", "M", "L"]);
        let first = coerce_options(dedupe_option_names(normalize_options(&raw)));
        let reencoded = serde_json::to_value(&first).expect("serialize");
        let second = coerce_options(dedupe_option_names(normalize_options(&reencoded)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_dedupe_renames_later_collisions_only() {
        let options = vec![
            OptionDraft {
                name: "ขนาด".to_owned(),
                values: vec![bare("S")],
            },
            OptionDraft {
                name: "ขนาด".to_owned(),
                values: vec![bare("M")],
            },
            OptionDraft {
                name: "ขนาด".to_owned(),
                values: vec![bare("L")],
            },
        ];
        let deduped = dedupe_option_names(options);
        let names: Vec<&str> = deduped.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["ขนาด", "ขนาด (2)", "ขนาด (3)"]);
    }

    #[test]
    fn test_dedupe_skips_past_existing_suffixed_name() {
        let options = vec![
            OptionDraft {
                name: "สี".to_owned(),
                values: vec![bare("แดง")],
            },
            OptionDraft {
                name: "สี (2)".to_owned(),
                values: vec![bare("ดำ")],
            },
            OptionDraft {
                name: "สี".to_owned(),
                values: vec![bare("ขาว")],
            },
        ];
        let deduped = dedupe_option_names(options);
        let names: Vec<&str> = deduped.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["สี", "สี (2)", "สี (3)"]);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let options = vec![
            OptionDraft {
                name: "Size".to_owned(),
                values: vec![bare("S")],
            },
            OptionDraft {
                name: "size".to_owned(),
                values: vec![bare("M")],
            },
        ];
        let deduped = dedupe_option_names(options);
        let names: Vec<&str> = deduped.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Size", "size"]);
    }

    #[test]
    fn test_coerce_clamps_and_defaults() {
        let drafts = vec![OptionDraft {
            name: "ขนาด".to_owned(),
            values: vec![ValueDraft {
                value: "M".to_owned(),
                price: -50,
                price_type: "minus".to_owned(),
                stock: -3,
                sku: None,
            }],
        }];
        let options = coerce_options(drafts);
        assert_eq!(options[0].values[0].price, 0);
        assert_eq!(options[0].values[0].price_type, PriceType::Add);
        assert_eq!(options[0].values[0].stock, 0);
    }

    fn bare(label: &str) -> ValueDraft {
        ValueDraft {
            value: label.to_owned(),
            price: 0,
            price_type: PRICE_TYPE_ADD.to_owned(),
            stock: 0,
            sku: None,
        }
    }
}
