//! Reviews are not persisted yet; provider rating and totalReviews are never
//! recomputed from here.

use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::extract::AppPath;

pub async fn create() -> Json<Value> {
    Json(json!({"message": "Review created"}))
}

pub async fn list_for_provider(AppPath(_provider_id): AppPath<Uuid>) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({"reviews": []})))
}
