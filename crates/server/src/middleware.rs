use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use service::auth::errors::AuthError;
use service::auth::SessionClaims;

use crate::errors::ApiError;
use crate::state::ServerState;

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MissingToken),
    }
}

/// 校验 Authorization: Bearer <token>，并将 SessionClaims 注入请求扩展
/// 缺失或非法、过期均返回 401
pub async fn require_auth(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = {
        let token = bearer_token(req.headers())?;
        state.tokens().verify(token)?
    };
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Must run after `require_auth`; non-admin sessions get 403.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = req.extensions().get::<SessionClaims>().ok_or(AuthError::MissingToken)?;
    if !claims.is_admin() {
        return Err(ApiError::forbidden("Admin access required"));
    }
    Ok(next.run(req).await)
}

/// Counts every response by method and status.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let res = next.run(req).await;
    common::metrics::record_http_request(&method, res.status().as_u16());
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_parsing() {
        let mut h = HeaderMap::new();
        assert!(matches!(bearer_token(&h), Err(AuthError::MissingToken)));

        h.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(bearer_token(&h), Err(AuthError::MissingToken)));

        h.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(bearer_token(&h), Err(AuthError::MissingToken)));

        h.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&h).unwrap(), "abc.def.ghi");
    }
}
