//! Product management route handlers.
//!
//! Create and update both run the same pipeline on the submitted `options`
//! payload: normalize (any accepted legacy shape) → dedupe option names →
//! validate. Validation is authoritative here - a negative price or an
//! unknown `priceType` in the submission is rejected with a 400 naming the
//! offending option and value, never silently repaired.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use talad_core::{
    CategoryId, ProductId, ProductOption, ProductStatus, SellerId, dedupe_option_names,
    normalize_options, validate_options,
};

use crate::db::{AdminProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::product::{AdminProduct, AdminProductSummary, NewProduct};
use crate::state::AppState;

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<ProductStatus>,
    /// Name search.
    pub q: Option<String>,
}

/// Paginated listing payload.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub data: Vec<AdminProductSummary>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

/// A product submission.
///
/// `options` arrives in whatever shape the client (or its history) uses: a
/// JSON string, the structured option list, a flat label list, or a
/// name→labels map. The full tree is always re-submitted; there is no
/// partial option edit.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub seller_id: SellerId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub discount_percent: i64,
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub status: ProductStatus,
    pub options: Option<serde_json::Value>,
}

impl ProductPayload {
    /// Validate the submission and produce the persistable form.
    fn into_new_product(self) -> Result<NewProduct> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be blank".to_owned()));
        }
        if self.price < 0 {
            return Err(AppError::Validation(
                "price must be zero or greater".to_owned(),
            ));
        }
        if !(0..=100).contains(&self.discount_percent) {
            return Err(AppError::Validation(
                "discountPercent must be between 0 and 100".to_owned(),
            ));
        }
        if self.stock < 0 {
            return Err(AppError::Validation(
                "stock must be zero or greater".to_owned(),
            ));
        }

        let options = canonical_options(self.options.as_ref())?;

        Ok(NewProduct {
            seller_id: self.seller_id,
            category_id: self.category_id,
            name: name.to_owned(),
            description: self.description,
            price: self.price,
            discount_percent: self.discount_percent,
            image: self.image,
            images: self.images,
            options,
            stock: self.stock,
            status: self.status,
        })
    }
}

/// Run the option pipeline on a raw submission payload.
///
/// Normalization never fails (garbage degrades to "no options"), so the
/// only rejection path is the validation gate, surfaced as a 400 with its
/// option/value-identifying message.
fn canonical_options(raw: Option<&serde_json::Value>) -> Result<Vec<ProductOption>> {
    let drafts = match raw {
        Some(value) => dedupe_option_names(normalize_options(value)),
        None => Vec::new(),
    };
    validate_options(&drafts).map_err(|e| AppError::Validation(e.to_string()))
}

/// Product listing across all statuses.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let filter = AdminProductFilter {
        status: query.status,
        search: query.q,
        page,
        per_page,
    };

    let (data, total) = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(ProductListResponse {
        data,
        total,
        page,
        per_page,
    }))
}

/// Product detail, any status.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<AdminProduct>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))
}

/// Create a product.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<AdminProduct>)> {
    let data = payload.into_new_product()?;
    let product = ProductRepository::new(state.pool()).create(&data).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product, replacing its option tree wholesale.
#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<AdminProduct>> {
    let data = payload.into_new_product()?;
    ProductRepository::new(state.pool())
        .update(id, &data)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))
}

/// Archive a product.
#[instrument(skip(state))]
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    if ProductRepository::new(state.pool()).archive(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("product {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use talad_core::PriceType;

    fn payload(options: serde_json::Value) -> ProductPayload {
        ProductPayload {
            seller_id: SellerId::new(1),
            category_id: None,
            name: "เสื้อยืดลายช้าง".to_owned(),
            description: None,
            price: 299,
            discount_percent: 0,
            image: None,
            images: Vec::new(),
            stock: 10,
            status: ProductStatus::Active,
            options: Some(options),
        }
    }

    #[test]
    fn test_structured_options_become_canonical() {
        let data = payload(json!([
            {"name": "ขนาด", "values": [{"value": "M", "price": 50, "priceType": "add"}]},
        ]))
        .into_new_product()
        .expect("valid payload");

        assert_eq!(data.options.len(), 1);
        assert_eq!(data.options[0].values[0].price_type, PriceType::Add);
    }

    #[test]
    fn test_legacy_flat_labels_are_accepted() {
        let data = payload(json!(["S", "M", "L"]))
            .into_new_product()
            .expect("valid payload");

        assert_eq!(data.options.len(), 1);
        assert_eq!(data.options[0].name, talad_core::DEFAULT_OPTION_NAME);
        assert_eq!(data.options[0].values.len(), 3);
    }

    #[test]
    fn test_duplicate_option_names_are_suffixed() {
        let data = payload(json!([
            {"name": "ขนาด", "values": ["S"]},
            {"name": "ขนาด", "values": ["M"]},
        ]))
        .into_new_product()
        .expect("valid payload");

        let names: Vec<&str> = data.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["ขนาด", "ขนาด (2)"]);
    }

    #[test]
    fn test_invalid_option_value_rejects_submission() {
        let err = payload(json!([
            {"name": "ขนาด", "values": [{"value": "M", "price": -50}]},
        ]))
        .into_new_product()
        .expect_err("must reject");

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation error: price of option \"ขนาด: M\" must be zero or greater"
        );
    }

    #[test]
    fn test_garbage_options_degrade_to_none() {
        let data = payload(json!("definitely not json {"))
            .into_new_product()
            .expect("valid payload");
        assert!(data.options.is_empty());
    }

    #[test]
    fn test_product_level_validation() {
        let mut bad = payload(json!([]));
        bad.name = "   ".to_owned();
        assert!(matches!(
            bad.into_new_product(),
            Err(AppError::Validation(_))
        ));

        let mut bad = payload(json!([]));
        bad.price = -1;
        assert!(matches!(
            bad.into_new_product(),
            Err(AppError::Validation(_))
        ));

        let mut bad = payload(json!([]));
        bad.discount_percent = 150;
        assert!(matches!(
            bad.into_new_product(),
            Err(AppError::Validation(_))
        ));
    }
}
