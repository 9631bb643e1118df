use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::banner::{Banner, CreateBanner, UpdateBanner};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Banners carry at most this many desktop images (plus one mobile image,
/// held in its own column).
const MAX_DESKTOP_IMAGES: usize = 10;

pub async fn list_banners(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Banner>>>, ApiError> {
    let banners = Banner::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(banners)))
}

pub async fn create_banner(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateBanner>,
) -> Result<ResponseJson<ApiResponse<Banner>>, ApiError> {
    validate_desktop_images(&payload.desktop_images)?;
    let banner = Banner::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(banner)))
}

pub async fn update_banner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateBanner>,
) -> Result<ResponseJson<ApiResponse<Banner>>, ApiError> {
    if let Some(images) = &payload.desktop_images {
        validate_desktop_images(images)?;
    }
    let banner = Banner::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(banner)))
}

pub async fn delete_banner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Banner::delete(&state.db().pool, id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("banner"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

fn validate_desktop_images(images: &[String]) -> Result<(), ApiError> {
    if images.is_empty() || images.len() > MAX_DESKTOP_IMAGES {
        return Err(ApiError::Validation(format!(
            "banner must have between 1 and {MAX_DESKTOP_IMAGES} desktop images, got {}",
            images.len()
        )));
    }
    Ok(())
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/banners",
        Router::new()
            .route("/", get(list_banners).post(create_banner))
            .route("/{id}", put(update_banner).delete(delete_banner)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("https://cdn.selectx.com.br/banners/{i}.jpg"))
            .collect()
    }

    #[test]
    fn banner_needs_at_least_one_desktop_image() {
        let err = validate_desktop_images(&[]).expect_err("empty must fail");
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn desktop_image_counts_up_to_the_limit_are_accepted() {
        assert!(validate_desktop_images(&urls(1)).is_ok());
        assert!(validate_desktop_images(&urls(MAX_DESKTOP_IMAGES)).is_ok());
    }

    #[test]
    fn desktop_image_count_over_the_limit_is_rejected() {
        let err =
            validate_desktop_images(&urls(MAX_DESKTOP_IMAGES + 1)).expect_err("over the limit");
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
