use models::user::{self, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity asserted by the external provider for a valid credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-side subject id; stored as the user's external identity id.
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Login input
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub firebase_token: String,
    /// Role for a first-time user; ignored for existing accounts.
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Public part of a user returned at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub photo_url: Option<String>,
}

impl From<user::Model> for UserProfile {
    fn from(m: user::Model) -> Self {
        Self { id: m.id, email: m.email, name: m.name, role: m.role, photo_url: m.photo_url }
    }
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}
