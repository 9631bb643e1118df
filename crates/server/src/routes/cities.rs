use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::city::{City, CreateCity, UpdateCity};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_cities(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<City>>>, ApiError> {
    let cities = City::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(cities)))
}

pub async fn create_city(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateCity>,
) -> Result<ResponseJson<ApiResponse<City>>, ApiError> {
    let city = City::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(city)))
}

pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateCity>,
) -> Result<ResponseJson<ApiResponse<City>>, ApiError> {
    let city = City::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(city)))
}

pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = City::delete(&state.db().pool, id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("city"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/cities",
        Router::new()
            .route("/", get(list_cities).post(create_city))
            .route("/{id}", put(update_city).delete(delete_city)),
    )
}
