use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::VerifiedIdentity;
use super::errors::AuthError;

/// Checks a credential issued by the external identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, AuthError>;
}

/// Verifies Firebase ID tokens through the Identity Toolkit `accounts:lookup` endpoint.
#[derive(Clone)]
pub struct FirebaseIdentityVerifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl FirebaseIdentityVerifier {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Verifier(e.to_string()))?;
        Ok(Self { client, endpoint: endpoint.into(), api_key: api_key.into() })
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, AuthError> {
        if credential.trim().is_empty() {
            return Err(AuthError::InvalidCredential);
        }
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token: credential })
            .send()
            .await
            .map_err(|e| AuthError::Verifier(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            debug!(%status, "identity provider rejected credential");
            return Err(AuthError::InvalidCredential);
        }
        if !status.is_success() {
            warn!(%status, "identity provider lookup failed");
            return Err(AuthError::Verifier(format!("lookup returned {status}")));
        }

        let body = response
            .json::<LookupResponse>()
            .await
            .map_err(|e| AuthError::Verifier(e.to_string()))?;
        let user = body.users.into_iter().next().ok_or(AuthError::InvalidCredential)?;
        Ok(VerifiedIdentity {
            uid: user.local_id,
            email: user.email,
            name: user.display_name,
            picture: user.photo_url,
        })
    }
}

/// Fixed credential table; used in tests and when no provider key is configured.
#[derive(Clone, Default)]
pub struct StaticIdentityVerifier {
    identities: HashMap<String, VerifiedIdentity>,
}

impl StaticIdentityVerifier {
    pub fn new() -> Self { Self::default() }

    pub fn with_identity(mut self, credential: impl Into<String>, identity: VerifiedIdentity) -> Self {
        self.identities.insert(credential.into(), identity);
        self
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn verify(&self, credential: &str) -> Result<VerifiedIdentity, AuthError> {
        self.identities.get(credential).cloned().ok_or(AuthError::InvalidCredential)
    }
}
