use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::provider::{self, ProviderStatus, ProviderType, StringList};
use models::user;
use crate::errors::{required, ServiceError};

/// Optional equality filters for the public provider listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderFilter {
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProviderInput {
    pub user_id: Uuid,
    pub business_name: String,
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    pub address: String,
    pub city: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub services: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub has_home_service: Option<bool>,
    pub delivery_fee: Option<Decimal>,
}

/// Listing fields an owner may edit. Moderation status, rating and
/// counters are not part of it. Nullable columns accept `null` to clear.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProviderInput {
    pub business_name: Option<String>,
    #[serde(rename = "type")]
    pub provider_type: Option<ProviderType>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub latitude: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub longitude: Option<Option<Decimal>>,
    pub services: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub opening_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::nullable")]
    pub closing_time: Option<Option<String>>,
    pub has_home_service: Option<bool>,
    pub delivery_fee: Option<Decimal>,
}

#[derive(Clone)]
pub struct ProviderService {
    db: DatabaseConnection,
}

impl ProviderService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Matching providers, best rated first.
    pub async fn list(&self, filter: ProviderFilter) -> Result<Vec<provider::Model>, ServiceError> {
        let mut query = provider::Entity::find();
        if let Some(city) = filter.city {
            query = query.filter(provider::Column::City.eq(city));
        }
        if let Some(raw) = filter.provider_type {
            match ProviderType::try_from_value(&raw) {
                Ok(t) => query = query.filter(provider::Column::ProviderType.eq(t)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        if let Some(raw) = filter.status {
            match ProviderStatus::try_from_value(&raw) {
                Ok(s) => query = query.filter(provider::Column::Status.eq(s)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        Ok(query
            .order_by_desc(provider::Column::Rating)
            .order_by_asc(provider::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<provider::Model, ServiceError> {
        provider::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("provider"))
    }

    /// New listings start `pending` with zero rating and the default commission.
    pub async fn create(&self, input: CreateProviderInput) -> Result<provider::Model, ServiceError> {
        let business_name = required("businessName", &input.business_name)?;
        let address = required("address", &input.address)?;
        let city = required("city", &input.city)?;
        let delivery_fee = input.delivery_fee.unwrap_or(Decimal::ZERO);
        if delivery_fee.is_sign_negative() {
            return Err(ServiceError::Validation("deliveryFee must not be negative".into()));
        }
        if user::Entity::find_by_id(input.user_id).one(&self.db).await?.is_none() {
            return Err(ServiceError::Validation(format!("user {} does not exist", input.user_id)));
        }

        let now = Utc::now().into();
        let am = provider::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            business_name: Set(business_name),
            provider_type: Set(input.provider_type),
            address: Set(address),
            city: Set(city),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            services: Set(StringList(input.services.unwrap_or_default())),
            specialties: Set(StringList(input.specialties.unwrap_or_default())),
            rating: Set(Decimal::ZERO),
            total_reviews: Set(0),
            status: Set(ProviderStatus::Pending),
            verified: Set(false),
            opening_time: Set(input.opening_time),
            closing_time: Set(input.closing_time),
            has_home_service: Set(input.has_home_service.unwrap_or(false)),
            delivery_fee: Set(delivery_fee),
            commission: Set(provider::default_commission()),
            total_bookings: Set(0),
            total_revenue: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await?;
        info!(provider_id = %created.id, user_id = %created.user_id, city = %created.city, "provider_created");
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: UpdateProviderInput) -> Result<provider::Model, ServiceError> {
        let mut am: provider::ActiveModel = self.get(id).await?.into();
        if let Some(v) = input.business_name {
            am.business_name = Set(required("businessName", &v)?);
        }
        if let Some(v) = input.provider_type {
            am.provider_type = Set(v);
        }
        if let Some(v) = input.address {
            am.address = Set(required("address", &v)?);
        }
        if let Some(v) = input.city {
            am.city = Set(required("city", &v)?);
        }
        if let Some(v) = input.latitude {
            am.latitude = Set(v);
        }
        if let Some(v) = input.longitude {
            am.longitude = Set(v);
        }
        if let Some(v) = input.services {
            am.services = Set(StringList(v));
        }
        if let Some(v) = input.specialties {
            am.specialties = Set(StringList(v));
        }
        if let Some(v) = input.opening_time {
            am.opening_time = Set(v);
        }
        if let Some(v) = input.closing_time {
            am.closing_time = Set(v);
        }
        if let Some(v) = input.has_home_service {
            am.has_home_service = Set(v);
        }
        if let Some(v) = input.delivery_fee {
            if v.is_sign_negative() {
                return Err(ServiceError::Validation("deliveryFee must not be negative".into()));
            }
            am.delivery_fee = Set(v);
        }
        am.updated_at = Set(Utc::now().into());
        Ok(am.update(&self.db).await?)
    }

    /// Moderation decision: only `approved` or `rejected` may be set here.
    pub async fn set_approval(&self, id: Uuid, status: ProviderStatus) -> Result<provider::Model, ServiceError> {
        if !status.is_decision() {
            return Err(ServiceError::Validation(format!(
                "status must be approved or rejected, got {status}"
            )));
        }
        let current = self.get(id).await?;
        let from = current.status;
        if !from.can_transition_to(status) {
            return Err(ServiceError::illegal_transition("provider", from, status));
        }
        let mut am: provider::ActiveModel = current.into();
        am.status = Set(status);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        info!(provider_id = %updated.id, from = %from, to = %status, "provider_moderated");
        Ok(updated)
    }
}
