#![cfg(test)]
use migration::MigratorTrait;
use models::db::connect_in_memory;
use models::{provider, user};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::provider_service::{CreateProviderInput, ProviderService};
use crate::user_service::{CreateUserInput, UserService};

/// Fresh migrated in-memory database; every test gets its own.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_user(db: &DatabaseConnection, role: user::UserRole) -> Result<user::Model, anyhow::Error> {
    let tag = Uuid::new_v4().simple().to_string();
    let created = UserService::new(db.clone())
        .create(CreateUserInput {
            external_identity_id: format!("ext-{tag}"),
            email: format!("{tag}@example.com"),
            name: None,
            phone: None,
            role: Some(role),
            photo_url: None,
        })
        .await?;
    Ok(created)
}

pub fn provider_input(user_id: Uuid, city: &str, kind: provider::ProviderType) -> CreateProviderInput {
    CreateProviderInput {
        user_id,
        business_name: format!("{city} {kind:?}"),
        provider_type: kind,
        address: "12 Rua Augusta".into(),
        city: city.into(),
        latitude: None,
        longitude: None,
        services: Some(vec!["haircut".into(), "beard trim".into()]),
        specialties: None,
        opening_time: Some("09:00".into()),
        closing_time: Some("19:00".into()),
        has_home_service: None,
        delivery_fee: None,
    }
}

pub async fn seed_provider(db: &DatabaseConnection, owner: Uuid, city: &str) -> Result<provider::Model, anyhow::Error> {
    let created = ProviderService::new(db.clone())
        .create(provider_input(owner, city, provider::ProviderType::Barber))
        .await?;
    Ok(created)
}
