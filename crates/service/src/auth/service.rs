use std::sync::Arc;

use models::user::{self, NewUser, UserRole, UserStatus};
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, LoginInput};
use super::errors::AuthError;
use super::identity::IdentityVerifier;
use super::repository::AuthRepository;
use super::token::{SessionClaims, SessionTokens};

/// Auth service configuration
#[derive(Clone, Debug, Default)]
pub struct AuthConfig {
    /// Lowercased emails that receive the admin role when first seen.
    pub admin_emails: Vec<String>,
}

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    verifier: Arc<dyn IdentityVerifier>,
    tokens: SessionTokens,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, verifier: Arc<dyn IdentityVerifier>, tokens: SessionTokens, cfg: AuthConfig) -> Self {
        Self { repo, verifier, tokens, cfg }
    }

    pub fn tokens(&self) -> &SessionTokens { &self.tokens }

    /// Verify an external credential, find or create the matching user and
    /// issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService, SessionTokens, StaticIdentityVerifier};
    /// use service::auth::domain::{LoginInput, VerifiedIdentity};
    /// use service::auth::repository::mock::MockAuthRepository;
    /// use std::{sync::Arc, time::Duration};
    /// let verifier = StaticIdentityVerifier::new().with_identity("cred", VerifiedIdentity {
    ///     uid: "uid-1".into(), email: Some("u@e.com".into()), name: None, picture: None,
    /// });
    /// let svc = AuthService::new(
    ///     Arc::new(MockAuthRepository::default()),
    ///     Arc::new(verifier),
    ///     SessionTokens::new("secret", Duration::from_secs(60)),
    ///     AuthConfig::default(),
    /// );
    /// let session = tokio_test::block_on(svc.login(LoginInput { firebase_token: "cred".into(), role: None })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert_eq!(session.user.name, "u");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.firebase_token.trim().is_empty() {
            return Err(AuthError::Validation("firebaseToken is required".into()));
        }
        if input.role == Some(UserRole::Admin) {
            return Err(AuthError::Forbidden("admin role cannot be self-assigned".into()));
        }

        let identity = self.verifier.verify(&input.firebase_token).await?;
        let user = match self.repo.find_by_external_id(&identity.uid).await? {
            Some(existing) => {
                debug!(user_id = %existing.id, "existing user signed in");
                existing
            }
            None => {
                let email = identity
                    .email
                    .clone()
                    .ok_or_else(|| AuthError::Validation("verified identity has no email".into()))?;
                let role = if self.is_admin_email(&email) {
                    UserRole::Admin
                } else {
                    input.role.unwrap_or_default()
                };
                let created = self
                    .repo
                    .create_user(NewUser {
                        external_identity_id: identity.uid.clone(),
                        email,
                        name: identity.name.clone(),
                        phone: None,
                        role,
                        photo_url: identity.picture.clone(),
                    })
                    .await;
                match created {
                    Ok(created) => {
                        info!(user_id = %created.id, role = %created.role, "user_registered");
                        created
                    }
                    // a concurrent first login for the same identity won the insert
                    Err(AuthError::Conflict(reason)) => {
                        match self.repo.find_by_external_id(&identity.uid).await? {
                            Some(existing) => {
                                debug!(user_id = %existing.id, "registration raced; reusing stored user");
                                existing
                            }
                            None => return Err(AuthError::Conflict(reason)),
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        if user.status == UserStatus::Blocked {
            warn!(user_id = %user.id, "blocked user attempted login");
            return Err(AuthError::Forbidden("account is blocked".into()));
        }

        let token = self.tokens.issue(user.id, user.role)?;
        info!(user_id = %user.id, role = %user.role, "user_logged_in");
        Ok(AuthSession { token, user: user.into() })
    }

    /// Record behind a verified session. A user deleted after the token was
    /// issued is treated as unauthenticated.
    pub async fn current_user(&self, claims: &SessionClaims) -> Result<user::Model, AuthError> {
        self.repo.find_by_id(claims.user_id).await?.ok_or(AuthError::Unauthorized)
    }

    fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.cfg.admin_emails.iter().any(|a| a.trim().eq_ignore_ascii_case(&email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use crate::auth::domain::VerifiedIdentity;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::auth::StaticIdentityVerifier;
    use std::time::Duration;

    fn identity(uid: &str, email: &str) -> VerifiedIdentity {
        VerifiedIdentity { uid: uid.into(), email: Some(email.into()), name: Some("Ana Silva".into()), picture: None }
    }

    fn service(admins: &[&str]) -> (Arc<MockAuthRepository>, AuthService<MockAuthRepository>) {
        let repo = Arc::new(MockAuthRepository::default());
        let verifier = StaticIdentityVerifier::new()
            .with_identity("ana", identity("uid-ana", "ana@example.com"))
            .with_identity("boss", identity("uid-boss", "Boss@Example.com"))
            .with_identity("anon", VerifiedIdentity { uid: "uid-anon".into(), email: None, name: None, picture: None });
        let svc = AuthService::new(
            repo.clone(),
            Arc::new(verifier),
            SessionTokens::new("test-secret", Duration::from_secs(600)),
            AuthConfig { admin_emails: admins.iter().map(|s| s.to_string()).collect() },
        );
        (repo, svc)
    }

    fn login(token: &str, role: Option<UserRole>) -> LoginInput {
        LoginInput { firebase_token: token.into(), role }
    }

    #[tokio::test]
    async fn first_login_creates_user_and_second_reuses_it() {
        let (repo, svc) = service(&[]);
        let first = svc.login(login("ana", Some(UserRole::Provider))).await.unwrap();
        assert_eq!(first.user.role, UserRole::Provider);
        assert_eq!(first.user.name, "Ana Silva");

        let second = svc.login(login("ana", Some(UserRole::Customer))).await.unwrap();
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(second.user.role, UserRole::Provider);
        assert_eq!(repo.len(), 1);

        let claims = svc.tokens().verify(&second.token).unwrap();
        assert_eq!(claims.user_id, first.user.id);
        assert_eq!(claims.role, UserRole::Provider);
    }

    #[tokio::test]
    async fn unknown_credential_is_rejected() {
        let (repo, svc) = service(&[]);
        assert!(matches!(svc.login(login("forged", None)).await, Err(AuthError::InvalidCredential)));
        assert!(matches!(svc.login(login("", None)).await, Err(AuthError::Validation(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn admin_role_comes_only_from_configuration() {
        let (_, svc) = service(&["boss@example.com"]);
        assert!(matches!(svc.login(login("ana", Some(UserRole::Admin))).await, Err(AuthError::Forbidden(_))));
        let boss = svc.login(login("boss", None)).await.unwrap();
        assert_eq!(boss.user.role, UserRole::Admin);
        let ana = svc.login(login("ana", None)).await.unwrap();
        assert_eq!(ana.user.role, UserRole::Customer);
    }

    #[tokio::test]
    async fn identity_without_email_cannot_register() {
        let (_, svc) = service(&[]);
        assert!(matches!(svc.login(login("anon", None)).await, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn deleted_user_is_unauthorized() {
        let (repo, svc) = service(&[]);
        let session = svc.login(login("ana", None)).await.unwrap();
        let claims = svc.tokens().verify(&session.token).unwrap();
        assert_eq!(svc.current_user(&claims).await.unwrap().id, session.user.id);

        repo.remove(session.user.id);
        assert!(matches!(svc.current_user(&claims).await, Err(AuthError::Unauthorized)));
    }

    /// Hides the stored user from the first lookup, the way a concurrent
    /// login that has not committed yet would.
    struct LateCommitRepository {
        inner: crate::auth::repo::SeaOrmAuthRepository,
        missed: std::sync::atomic::AtomicBool,
    }

    #[async_trait::async_trait]
    impl AuthRepository for LateCommitRepository {
        async fn find_by_external_id(&self, external_id: &str) -> Result<Option<user::Model>, AuthError> {
            if !self.missed.swap(true, std::sync::atomic::Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_external_id(external_id).await
        }

        async fn find_by_id(&self, id: uuid::Uuid) -> Result<Option<user::Model>, AuthError> {
            self.inner.find_by_id(id).await
        }

        async fn create_user(&self, input: NewUser) -> Result<user::Model, AuthError> {
            self.inner.create_user(input).await
        }
    }

    fn seaorm_service<R: AuthRepository>(repo: Arc<R>) -> AuthService<R> {
        let verifier = StaticIdentityVerifier::new().with_identity("ana", identity("uid-ana", "ana@example.com"));
        AuthService::new(
            repo,
            Arc::new(verifier),
            SessionTokens::new("test-secret", Duration::from_secs(600)),
            AuthConfig::default(),
        )
    }

    #[tokio::test]
    async fn concurrent_first_logins_share_one_user() -> Result<(), anyhow::Error> {
        let db = crate::test_support::get_db().await?;
        let svc = seaorm_service(Arc::new(crate::auth::repo::SeaOrmAuthRepository::new(db.clone())));

        let (a, b) = tokio::join!(svc.login(login("ana", None)), svc.login(login("ana", None)));
        let (a, b) = (a?, b?);
        assert_eq!(a.user.id, b.user.id);
        assert_eq!(user::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn losing_the_insert_race_reuses_the_stored_user() -> Result<(), anyhow::Error> {
        let db = crate::test_support::get_db().await?;
        let first = seaorm_service(Arc::new(crate::auth::repo::SeaOrmAuthRepository::new(db.clone())))
            .login(login("ana", None))
            .await?;

        let late = Arc::new(LateCommitRepository {
            inner: crate::auth::repo::SeaOrmAuthRepository::new(db.clone()),
            missed: std::sync::atomic::AtomicBool::new(false),
        });
        let second = seaorm_service(late).login(login("ana", Some(UserRole::Provider))).await?;
        assert_eq!(second.user.id, first.user.id);
        assert_eq!(second.user.role, UserRole::Customer);
        Ok(())
    }
}
