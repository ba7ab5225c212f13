use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use models::booking::{self, generate_booking_number, BookingStatus, PaymentStatus};
use models::{provider, user};
use crate::errors::{required, ServiceError};

/// Optional equality filters for listing bookings. Values that cannot
/// match any row (unknown status, malformed ids) yield an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    pub user_id: Option<String>,
    pub provider_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingInput {
    pub user_id: Uuid,
    pub provider_id: Uuid,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub amount: Decimal,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub ai_style_used: Option<bool>,
    pub ai_style_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingInput {
    pub reason: Option<String>,
    pub cancelled_by: Option<String>,
}

#[derive(Clone)]
pub struct BookingService {
    db: DatabaseConnection,
}

impl BookingService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub async fn create(&self, input: CreateBookingInput) -> Result<booking::Model, ServiceError> {
        let service = required("service", &input.service)?;
        let time = required("time", &input.time)?;
        if input.amount < Decimal::ZERO {
            return Err(ServiceError::Validation("amount must not be negative".into()));
        }
        if user::Entity::find_by_id(input.user_id).one(&self.db).await?.is_none() {
            return Err(ServiceError::Validation(format!("user {} does not exist", input.user_id)));
        }
        if provider::Entity::find_by_id(input.provider_id).one(&self.db).await?.is_none() {
            return Err(ServiceError::Validation(format!("provider {} does not exist", input.provider_id)));
        }

        let now = Utc::now().into();
        let am = booking::ActiveModel {
            id: Set(Uuid::new_v4()),
            booking_number: Set(generate_booking_number()),
            user_id: Set(input.user_id),
            provider_id: Set(input.provider_id),
            service: Set(service),
            date: Set(input.date),
            time: Set(time),
            status: Set(BookingStatus::Pending),
            amount: Set(input.amount),
            commission: Set(Decimal::ZERO),
            payment_status: Set(PaymentStatus::Pending),
            payment_method: Set(input.payment_method),
            notes: Set(input.notes),
            ai_style_used: Set(input.ai_style_used.unwrap_or(false)),
            ai_style_image: Set(input.ai_style_image),
            cancelled_by: Set(None),
            cancel_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&self.db).await?;
        info!(
            booking_id = %created.id,
            booking_number = %created.booking_number,
            user_id = %created.user_id,
            provider_id = %created.provider_id,
            "booking_created"
        );
        Ok(created)
    }

    /// Matching bookings, newest first.
    pub async fn list(&self, filter: BookingFilter) -> Result<Vec<booking::Model>, ServiceError> {
        let mut query = booking::Entity::find();
        if let Some(raw) = filter.user_id {
            match Uuid::parse_str(raw.trim()) {
                Ok(id) => query = query.filter(booking::Column::UserId.eq(id)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        if let Some(raw) = filter.provider_id {
            match Uuid::parse_str(raw.trim()) {
                Ok(id) => query = query.filter(booking::Column::ProviderId.eq(id)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        if let Some(raw) = filter.status {
            match BookingStatus::try_from_value(&raw) {
                Ok(s) => query = query.filter(booking::Column::Status.eq(s)),
                Err(_) => return Ok(Vec::new()),
            }
        }
        Ok(query.order_by_desc(booking::Column::CreatedAt).all(&self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<booking::Model, ServiceError> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("booking"))
    }

    pub async fn set_status(&self, id: Uuid, status: BookingStatus) -> Result<booking::Model, ServiceError> {
        let current = self.get(id).await?;
        let from = current.status;
        if !from.can_transition_to(status) {
            warn!(booking_id = %id, from = %from, to = %status, "booking_transition_rejected");
            return Err(ServiceError::illegal_transition("booking", from, status));
        }
        let mut am: booking::ActiveModel = current.into();
        am.status = Set(status);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        info!(booking_id = %updated.id, from = %from, to = %status, "booking_status_changed");
        Ok(updated)
    }

    /// Cancels a booking and records who cancelled it and why. Cancelling an
    /// already cancelled booking overwrites the reason and actor.
    pub async fn cancel(&self, id: Uuid, input: CancelBookingInput) -> Result<booking::Model, ServiceError> {
        let current = self.get(id).await?;
        let from = current.status;
        if !from.can_transition_to(BookingStatus::Cancelled) {
            return Err(ServiceError::illegal_transition("booking", from, BookingStatus::Cancelled));
        }
        let mut am: booking::ActiveModel = current.into();
        am.status = Set(BookingStatus::Cancelled);
        am.cancel_reason = Set(input.reason);
        am.cancelled_by = Set(input.cancelled_by);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        info!(booking_id = %updated.id, from = %from, "booking_cancelled");
        Ok(updated)
    }
}
