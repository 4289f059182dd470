//! Product catalog logic.
//!
//! Everything about a product's option tree and its pricing lives here:
//!
//! - [`options`] - The canonical option types all downstream code consumes
//! - [`normalize`] - Coercion of legacy option payloads into drafts, plus
//!   option-name deduplication
//! - [`validate`] - The strict gate run on the product create/update path
//! - [`pricing`] - Final price resolution from a base price and selections
//!
//! The pipeline on every product submission is
//! `normalize_options` → `dedupe_option_names` → `validate_options`
//! (API path, rejects bad input) or `coerce_options` (seed/import path,
//! clamps bad input). All functions are pure and synchronous.

pub mod normalize;
pub mod options;
pub mod pricing;
pub mod validate;

pub use normalize::{OptionDraft, ValueDraft, coerce_options, dedupe_option_names, normalize_options};
pub use options::{DEFAULT_OPTION_NAME, OptionValue, PriceType, ProductOption, SelectedOptions};
pub use pricing::{apply_discount, resolve_price};
pub use validate::{OptionError, validate_options};
