use std::fmt;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{booking, provider};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "provider")]
    Provider,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Provider => "provider",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "blocked")]
    Blocked,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
            UserStatus::Inactive => "inactive",
        }
    }

    /// Block/unblock toggle. Only defined between `active` and `blocked`.
    pub fn toggled(self) -> Option<UserStatus> {
        match self {
            UserStatus::Active => Some(UserStatus::Blocked),
            UserStatus::Blocked => Some(UserStatus::Active),
            UserStatus::Inactive => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub external_identity_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub photo_url: Option<String>,
    pub status: UserStatus,
    pub total_bookings: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_spent: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Providers,
    Bookings,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Providers => Entity::has_many(provider::Entity).into(),
            Relation::Bookings => Entity::has_many(booking::Entity).into(),
        }
    }
}

impl Related<provider::Entity> for Entity {
    fn to() -> RelationDef { Relation::Providers.def() }
}

impl Related<booking::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bookings.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when a user record is first created.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub external_identity_id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub photo_url: Option<String>,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    Ok(())
}

/// Name to store: the supplied one, else the email's local part.
pub fn display_name(name: Option<&str>, email: &str) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => n.to_string(),
        None => email.split('@').next().unwrap_or(email).to_string(),
    }
}

pub async fn create(db: &DatabaseConnection, input: NewUser) -> Result<Model, ModelError> {
    if input.external_identity_id.trim().is_empty() {
        return Err(ModelError::Validation("external identity id required".into()));
    }
    validate_email(&input.email)?;
    let name = display_name(input.name.as_deref(), &input.email);
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        external_identity_id: Set(input.external_identity_id),
        email: Set(input.email.trim().to_string()),
        name: Set(name),
        phone: Set(input.phone),
        role: Set(input.role),
        photo_url: Set(input.photo_url),
        status: Set(UserStatus::Active),
        total_bookings: Set(0),
        total_spent: Set(Decimal::ZERO),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_external_id(db: &DatabaseConnection, external_id: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ExternalIdentityId.eq(external_id))
        .one(db)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution_on_active_and_blocked() {
        for start in [UserStatus::Active, UserStatus::Blocked] {
            let once = start.toggled().unwrap();
            assert_ne!(once, start);
            assert_eq!(once.toggled(), Some(start));
        }
        assert_eq!(UserStatus::Inactive.toggled(), None);
    }

    #[test]
    fn display_name_falls_back_to_local_part() {
        assert_eq!(display_name(None, "jane.doe@example.com"), "jane.doe");
        assert_eq!(display_name(Some("  "), "jane@example.com"), "jane");
        assert_eq!(display_name(Some("Jane"), "jane@example.com"), "Jane");
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("nope").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@").is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let r: UserRole = serde_json::from_str("\"provider\"").unwrap();
        assert_eq!(r, UserRole::Provider);
        assert_eq!(UserRole::default(), UserRole::Customer);
    }
}
