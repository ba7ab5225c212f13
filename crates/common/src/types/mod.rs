use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload returned by `GET /health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

impl Health {
    pub fn healthy(version: &str) -> Self {
        Self {
            status: "healthy".into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: version.to_string(),
        }
    }
}
