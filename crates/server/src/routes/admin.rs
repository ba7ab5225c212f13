use axum::extract::State;
use axum::Json;
use service::DashboardStats;

use crate::errors::ApiError;
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/admin/stats", tag = "admin", security(("bearer" = [])), responses((status = 200, description = "Platform counts", body = crate::openapi::StatsResponse), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden")))]
pub async fn stats(State(state): State<ServerState>) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(state.admin.stats().await?))
}
