use chrono::Utc;
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::user::{self, NewUser, UserRole, UserStatus};
use crate::errors::ServiceError;

/// Optional equality filters for listing users. Unknown values match nothing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub status: Option<String>,
    pub role: Option<String>,
}

/// Admin-side user creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub external_identity_id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub photo_url: Option<String>,
}

/// Profile fields a user may change on their own record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    /// `null` clears the stored phone.
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub photo_url: Option<Option<String>>,
}

#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub async fn list(&self, filter: UserFilter) -> Result<Vec<user::Model>, ServiceError> {
        let mut query = user::Entity::find();
        if let Some(raw) = filter.status {
            match UserStatus::try_from_value(&raw) {
                Ok(status) => query = query.filter(user::Column::Status.eq(status)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        if let Some(raw) = filter.role {
            match UserRole::try_from_value(&raw) {
                Ok(role) => query = query.filter(user::Column::Role.eq(role)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        Ok(query.order_by_asc(user::Column::CreatedAt).all(&self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn create(&self, input: CreateUserInput) -> Result<user::Model, ServiceError> {
        let created = user::create(
            &self.db,
            NewUser {
                external_identity_id: input.external_identity_id,
                email: input.email,
                name: input.name,
                phone: input.phone,
                role: input.role.unwrap_or_default(),
                photo_url: input.photo_url,
            },
        )
        .await?;
        info!(user_id = %created.id, role = %created.role, "user_created");
        Ok(created)
    }

    /// Applies only the supplied profile fields.
    pub async fn update(&self, id: Uuid, input: UpdateUserInput) -> Result<user::Model, ServiceError> {
        let mut am: user::ActiveModel = self.get(id).await?.into();
        if let Some(name) = input.name {
            user::validate_name(&name)?;
            am.name = Set(name.trim().to_string());
        }
        if let Some(phone) = input.phone {
            am.phone = Set(phone);
        }
        if let Some(photo_url) = input.photo_url {
            am.photo_url = Set(photo_url);
        }
        am.updated_at = Set(Utc::now().into());
        Ok(am.update(&self.db).await?)
    }

    /// Flips `active` and `blocked`; any other status is rejected.
    pub async fn toggle_block(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        let current = self.get(id).await?;
        let from = current.status;
        let next = from
            .toggled()
            .ok_or_else(|| ServiceError::illegal_transition("user", from, "blocked/active"))?;
        let mut am: user::ActiveModel = current.into();
        am.status = Set(next);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        info!(user_id = %updated.id, from = %from, to = %next, "user_block_toggled");
        Ok(updated)
    }
}
