use async_trait::async_trait;
use models::user::{self, NewUser};
use uuid::Uuid;

use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<user::Model>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError>;
    async fn create_user(&self, input: NewUser) -> Result<user::Model, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use models::user::{display_name, UserStatus};
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<Uuid, user::Model>>, // key: user id
    }

    impl MockAuthRepository {
        pub fn len(&self) -> usize { self.users.lock().unwrap().len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        pub fn remove(&self, id: Uuid) -> Option<user::Model> { self.users.lock().unwrap().remove(&id) }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_external_id(&self, external_id: &str) -> Result<Option<user::Model>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.external_identity_id == external_id).cloned())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn create_user(&self, input: NewUser) -> Result<user::Model, AuthError> {
            user::validate_email(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == input.email || u.external_identity_id == input.external_identity_id) {
                return Err(AuthError::Conflict("user already exists".into()));
            }
            let now = Utc::now().into();
            let model = user::Model {
                id: Uuid::new_v4(),
                name: display_name(input.name.as_deref(), &input.email),
                external_identity_id: input.external_identity_id,
                email: input.email,
                phone: input.phone,
                role: input.role,
                photo_url: input.photo_url,
                status: UserStatus::Active,
                total_bookings: 0,
                total_spent: Decimal::ZERO,
                created_at: now,
                updated_at: now,
            };
            users.insert(model.id, model.clone());
            Ok(model)
        }
    }
}
