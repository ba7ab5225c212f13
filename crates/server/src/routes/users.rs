use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use models::user::UserStatus;
use serde_json::{json, Value};
use service::auth::SessionClaims;
use service::user_service::{CreateUserInput, UpdateUserInput, UserFilter};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::ServerState;

fn ensure_self_or_admin(claims: &SessionClaims, id: Uuid) -> Result<(), ApiError> {
    if claims.user_id == id || claims.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden("Not allowed to access this user"))
    }
}

pub async fn list(State(state): State<ServerState>, AppQuery(filter): AppQuery<UserFilter>) -> Result<Json<Value>, ApiError> {
    let users = state.users.list(filter).await?;
    Ok(Json(json!({"users": users})))
}

pub async fn create(
    State(state): State<ServerState>,
    AppJson(input): AppJson<CreateUserInput>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({"user": user}))))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "users", security(("bearer" = [])), params(("id" = Uuid, Path, description = "User id")), responses((status = 200, description = "User"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn get(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Value>, ApiError> {
    ensure_self_or_admin(&claims, id)?;
    let user = state.users.get(id).await?;
    Ok(Json(json!({"user": user})))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<SessionClaims>,
    AppPath(id): AppPath<Uuid>,
    AppJson(input): AppJson<UpdateUserInput>,
) -> Result<Json<Value>, ApiError> {
    ensure_self_or_admin(&claims, id)?;
    let user = state.users.update(id, input).await?;
    Ok(Json(json!({"user": user})))
}

pub async fn toggle_block(State(state): State<ServerState>, AppPath(id): AppPath<Uuid>) -> Result<Json<Value>, ApiError> {
    let user = state.users.toggle_block(id).await?;
    let message = match user.status {
        UserStatus::Blocked => "User blocked successfully",
        _ => "User unblocked successfully",
    };
    Ok(Json(json!({"message": message, "user": user})))
}
