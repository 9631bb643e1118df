use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::dashboard::DashboardStats;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

pub async fn stats(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<DashboardStats>>, ApiError> {
    let stats = DashboardStats::load(&state.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(stats)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(stats))
}
