//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Login trades a credential issued by the external identity provider for a
//! locally signed session token. `identity` verifies the credential, `token`
//! signs and checks session tokens, `service` ties both to the user store.

pub mod domain;
pub mod errors;
pub mod identity;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;

pub use identity::{FirebaseIdentityVerifier, IdentityVerifier, StaticIdentityVerifier};
pub use service::{AuthConfig, AuthService};
pub use token::{SessionClaims, SessionTokens};
