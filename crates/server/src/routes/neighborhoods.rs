use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::neighborhood::{CreateNeighborhood, Neighborhood, UpdateNeighborhood};
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub async fn list_neighborhoods(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Neighborhood>>>, ApiError> {
    let neighborhoods = Neighborhood::find_all(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(neighborhoods)))
}

pub async fn create_neighborhood(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateNeighborhood>,
) -> Result<ResponseJson<ApiResponse<Neighborhood>>, ApiError> {
    let neighborhood = Neighborhood::create(&state.db().pool, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(neighborhood)))
}

pub async fn update_neighborhood(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateNeighborhood>,
) -> Result<ResponseJson<ApiResponse<Neighborhood>>, ApiError> {
    let neighborhood = Neighborhood::update(&state.db().pool, id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(neighborhood)))
}

pub async fn delete_neighborhood(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Neighborhood::delete(&state.db().pool, id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("neighborhood"));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/neighborhoods",
        Router::new()
            .route("/", get(list_neighborhoods).post(create_neighborhood))
            .route("/{id}", put(update_neighborhood).delete(delete_neighborhood)),
    )
}
