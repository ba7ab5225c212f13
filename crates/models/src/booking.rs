use std::fmt;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{provider, user};

pub const BOOKING_NUMBER_PREFIX: &str = "BK";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Booking lifecycle:
    /// pending -> confirmed -> in-progress -> completed, with cancellation
    /// possible until the appointment has started. Rewriting the current
    /// status is accepted.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Confirmed)
                    | (Pending, Cancelled)
                    | (Confirmed, InProgress)
                    | (Confirmed, Cancelled)
                    | (InProgress, Completed)
            )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "refunded")]
    Refunded,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub booking_number: String,
    pub user_id: Uuid,
    pub provider_id: Uuid,
    pub service: String,
    pub date: Date,
    pub time: String,
    pub status: BookingStatus,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub commission: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_method: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub ai_style_used: bool,
    pub ai_style_image: Option<String>,
    pub cancelled_by: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cancel_reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Provider,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Provider => Entity::belongs_to(provider::Entity)
                .from(Column::ProviderId)
                .to(provider::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<provider::Entity> for Entity {
    fn to() -> RelationDef { Relation::Provider.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// New booking reference: `BK` + UTC date (`YYMMDD`) + 12 random hex digits.
///
/// The random part comes from a v4 UUID, so two bookings created in the same
/// millisecond still get distinct numbers.
pub fn generate_booking_number() -> String {
    let random = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("{}{}{}", BOOKING_NUMBER_PREFIX, Utc::now().format("%y%m%d"), &random[..12])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn booking_numbers_are_prefixed_and_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..1_000 {
            let n = generate_booking_number();
            assert!(n.starts_with(BOOKING_NUMBER_PREFIX));
            assert_eq!(n.len(), 2 + 6 + 12);
            assert!(seen.insert(n), "duplicate booking number generated");
        }
    }

    #[test]
    fn lifecycle_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(Cancelled.can_transition_to(Cancelled));

        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
        assert!(!InProgress.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        use sea_orm::Iterable;
        for from in BookingStatus::iter().filter(|s| s.is_terminal()) {
            for to in BookingStatus::iter().filter(|t| *t != from) {
                assert!(!from.can_transition_to(to), "{from} -> {to} should be illegal");
            }
        }
    }

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        assert_eq!(serde_json::to_string(&BookingStatus::InProgress).unwrap(), "\"in-progress\"");
        let s: BookingStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(s, BookingStatus::Cancelled);
    }
}
