use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService, IdentityVerifier, SessionTokens};
use service::{AdminService, BookingService, ProviderService, UserService};

/// Shared handler state; every service is cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub users: UserService,
    pub providers: ProviderService,
    pub bookings: BookingService,
    pub admin: AdminService,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        verifier: Arc<dyn IdentityVerifier>,
        tokens: SessionTokens,
        auth_cfg: AuthConfig,
    ) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository::new(db.clone()));
        Self {
            auth: Arc::new(AuthService::new(repo, verifier, tokens, auth_cfg)),
            users: UserService::new(db.clone()),
            providers: ProviderService::new(db.clone()),
            bookings: BookingService::new(db.clone()),
            admin: AdminService::new(db),
        }
    }

    pub fn tokens(&self) -> &SessionTokens { self.auth.tokens() }
}
