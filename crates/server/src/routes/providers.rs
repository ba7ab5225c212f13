use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use models::provider::ProviderStatus;
use serde::Deserialize;
use serde_json::{json, Value};
use service::auth::SessionClaims;
use service::provider_service::{CreateProviderInput, ProviderFilter, UpdateProviderInput};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct ApprovalBody {
    pub status: ProviderStatus,
}

pub async fn list(State(state): State<ServerState>, AppQuery(filter): AppQuery<ProviderFilter>) -> Result<Json<Value>, ApiError> {
    let providers = state.providers.list(filter).await?;
    Ok(Json(json!({"providers": providers})))
}

#[utoipa::path(get, path = "/api/providers/{id}", tag = "providers", params(("id" = Uuid, Path, description = "Provider id")), responses((status = 200, description = "Provider"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, AppPath(id): AppPath<Uuid>) -> Result<Json<Value>, ApiError> {
    let provider = state.providers.get(id).await?;
    Ok(Json(json!({"provider": provider})))
}

/// Non-admins may only register a listing for themselves.
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppJson(input): AppJson<CreateProviderInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if input.user_id != claims.user_id && !claims.is_admin() {
        return Err(ApiError::forbidden("Providers can only be created for your own account"));
    }
    let provider = state.providers.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({"provider": provider}))))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<UpdateProviderInput>,
) -> Result<Json<Value>, ApiError> {
    let existing = state.providers.get(id).await?;
    if existing.user_id != claims.user_id && !claims.is_admin() {
        return Err(ApiError::forbidden("Only the owner can update this provider"));
    }
    let provider = state.providers.update(id, input).await?;
    Ok(Json(json!({"provider": provider})))
}

#[utoipa::path(put, path = "/api/providers/{id}/approve", tag = "providers", security(("bearer" = [])), params(("id" = Uuid, Path, description = "Provider id")), request_body = crate::openapi::ApprovalRequest, responses((status = 200, description = "Decision applied"), (status = 400, description = "Bad Request"), (status = 404, description = "Not Found"), (status = 409, description = "Illegal transition")))]
pub async fn approve(
    State(state): State<ServerState>,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<ApprovalBody>,
) -> Result<Json<Value>, ApiError> {
    let provider = state.providers.set_approval(id, body.status).await?;
    Ok(Json(json!({
        "message": format!("Provider {} successfully", provider.status),
        "provider": provider,
    })))
}
