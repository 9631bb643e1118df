//! Routes for property records, including property-code generation.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::property::{CreateProperty, Property, UpdateProperty};
use serde::{Deserialize, Serialize};
use services::services::property_code::{self, CodeMode, PropertyCodeGenerator};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, TS)]
pub struct GenerateCodeQuery {
    #[serde(default)]
    pub mode: CodeMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct GeneratedCode {
    pub code: String,
}

pub async fn list_properties(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Property>>>, ApiError> {
    let properties = Property::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(properties)))
}

/// Generate a fresh, non-colliding property code from a snapshot of the
/// currently assigned codes.
pub async fn generate_code(
    State(state): State<AppState>,
    Query(query): Query<GenerateCodeQuery>,
) -> Result<ResponseJson<ApiResponse<GeneratedCode>>, ApiError> {
    let existing = Property::find_all_codes(&state.db().pool).await?;
    let mut generator = PropertyCodeGenerator::new();
    let code = generator.generate(&existing, query.mode);
    Ok(ResponseJson(ApiResponse::success(GeneratedCode { code })))
}

pub async fn create_property(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateProperty>,
) -> Result<ResponseJson<ApiResponse<Property>>, ApiError> {
    if !property_code::is_valid_code(&payload.code) {
        return Err(ApiError::Validation(format!(
            "invalid property code: {:?}",
            payload.code
        )));
    }
    let config = state.config();
    validate_image_count(
        payload.images.len(),
        config.property_min_images,
        config.property_max_images,
    )?;

    // Duplicate codes surface as a unique violation (409)
    let property = Property::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(property)))
}

pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateProperty>,
) -> Result<ResponseJson<ApiResponse<Property>>, ApiError> {
    if let Some(code) = &payload.code {
        if !property_code::is_valid_code(code) {
            return Err(ApiError::Validation(format!(
                "invalid property code: {code:?}"
            )));
        }
    }
    if let Some(images) = &payload.images {
        let config = state.config();
        validate_image_count(
            images.len(),
            config.property_min_images,
            config.property_max_images,
        )?;
    }

    let property = Property::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(property)))
}

pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Property::delete(&state.db().pool, id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("property"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

fn validate_image_count(count: usize, min: usize, max: usize) -> Result<(), ApiError> {
    if count < min || count > max {
        return Err(ApiError::Validation(format!(
            "property must have between {min} and {max} images, got {count}"
        )));
    }
    Ok(())
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/properties",
        Router::new()
            .route("/", get(list_properties).post(create_property))
            .route("/generate-code", get(generate_code))
            .route("/{id}", put(update_property).delete(delete_property)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_count_within_configured_bounds_is_accepted() {
        assert!(validate_image_count(0, 0, 20).is_ok());
        assert!(validate_image_count(20, 0, 20).is_ok());
        assert!(validate_image_count(2, 2, 5).is_ok());
    }

    #[test]
    fn image_count_outside_configured_bounds_is_rejected() {
        assert!(matches!(
            validate_image_count(21, 0, 20),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_image_count(1, 2, 5),
            Err(ApiError::Validation(_))
        ));
    }
}
