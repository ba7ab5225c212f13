use models::errors::ModelError;
use models::user::{self, NewUser};
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn map_model_err(e: ModelError) -> AuthError {
    match e {
        ModelError::Validation(m) => AuthError::Validation(m),
        ModelError::Conflict(m) => AuthError::Conflict(m),
        ModelError::Db(m) => AuthError::Repository(m),
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<user::Model>, AuthError> {
        user::find_by_external_id(&self.db, external_id).await.map_err(map_model_err)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, AuthError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }

    async fn create_user(&self, input: NewUser) -> Result<user::Model, AuthError> {
        user::create(&self.db, input).await.map_err(map_model_err)
    }
}
