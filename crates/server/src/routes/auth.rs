use axum::extract::State;
use axum::{Extension, Json};
use serde_json::{json, Value};
use service::auth::domain::LoginInput;
use service::auth::SessionClaims;

use crate::errors::ApiError;
use crate::extract::AppJson;
use crate::state::ServerState;

/// Exchanges an identity-provider credential for `{success, token, user}`.
#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 400, description = "Bad Request"), (status = 401, description = "Unauthorized"), (status = 403, description = "Forbidden")))]
pub async fn login(State(state): State<ServerState>, AppJson(input): AppJson<LoginInput>) -> Result<Json<Value>, ApiError> {
    match state.auth.login(input).await {
        Ok(session) => {
            common::metrics::record_login("success");
            Ok(Json(json!({"success": true, "token": session.token, "user": session.user})))
        }
        Err(e) => {
            common::metrics::record_login("failure");
            Err(e.into())
        }
    }
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", security(("bearer" = [])), responses((status = 200, description = "Current user"), (status = 401, description = "Unauthorized")))]
pub async fn me(State(state): State<ServerState>, Extension(claims): Extension<SessionClaims>) -> Result<Json<Value>, ApiError> {
    let user = state.auth.current_user(&claims).await?;
    Ok(Json(json!({"user": user})))
}
