//! Category management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use talad_core::CategoryId;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::catalog::Category;
use crate::state::AppState;

/// Category submission.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    /// URL slug; derived from the name when omitted.
    pub slug: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl CategoryPayload {
    fn validated(&self) -> Result<(String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name must not be blank".to_owned()));
        }
        let slug = self
            .slug
            .as_deref()
            .map_or_else(|| slugify(name), str::to_owned);
        if slug.is_empty() {
            return Err(AppError::Validation("slug must not be blank".to_owned()));
        }
        Ok((name.to_owned(), slug))
    }
}

/// Derive a URL slug from a display name.
fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(char::is_whitespace, "-")
}

/// Category list.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(db::categories::list(state.pool()).await?))
}

/// Create a category.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>)> {
    let (name, slug) = payload.validated()?;
    let category = db::categories::create(state.pool(), &name, &slug, payload.position).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    let (name, slug) = payload.validated()?;
    let category =
        db::categories::update(state.pool(), id, &name, &slug, payload.position).await?;
    Ok(Json(category))
}

/// Delete a category.
pub async fn delete(State(state): State<AppState>, Path(id): Path<CategoryId>) -> Result<StatusCode> {
    if db::categories::delete(state.pool(), id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("category {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Mobile Phones"), "mobile-phones");
        assert_eq!(slugify("  เสื้อผ้า แฟชั่น  "), "เสื้อผ้า-แฟชั่น");
    }

    #[test]
    fn test_payload_derives_slug_when_omitted() {
        let payload = CategoryPayload {
            name: "Home Decor".to_owned(),
            slug: None,
            position: 0,
        };
        let (name, slug) = payload.validated().expect("valid");
        assert_eq!(name, "Home Decor");
        assert_eq!(slug, "home-decor");
    }

    #[test]
    fn test_payload_rejects_blank_name() {
        let payload = CategoryPayload {
            name: "  ".to_owned(),
            slug: None,
            position: 0,
        };
        assert!(matches!(
            payload.validated(),
            Err(AppError::Validation(_))
        ));
    }
}
