//! Payment gateway placeholders; no state is read or written.

use axum::Json;
use serde_json::{json, Value};

pub async fn create_intent() -> Json<Value> {
    Json(json!({
        "message": "Payment endpoint ready - integrate payment gateway",
        "clientSecret": "placeholder_secret_key",
    }))
}

pub async fn confirm() -> Json<Value> {
    Json(json!({"message": "Payment confirmation ready", "status": "success"}))
}
