use std::fmt;

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{booking, user};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[sea_orm(string_value = "salon")]
    Salon,
    #[sea_orm(string_value = "barber")]
    Barber,
    #[sea_orm(string_value = "spa")]
    Spa,
    #[sea_orm(string_value = "clinic")]
    Clinic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl ProviderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Pending => "pending",
            ProviderStatus::Approved => "approved",
            ProviderStatus::Rejected => "rejected",
            ProviderStatus::Suspended => "suspended",
        }
    }

    /// Admin moderation transitions. Re-applying the current status is allowed.
    pub fn can_transition_to(self, next: ProviderStatus) -> bool {
        use ProviderStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Approved)
                    | (Pending, Rejected)
                    | (Rejected, Approved)
                    | (Approved, Suspended)
                    | (Suspended, Approved)
            )
    }

    /// Targets an approval decision may set.
    pub fn is_decision(self) -> bool {
        matches!(self, ProviderStatus::Approved | ProviderStatus::Rejected)
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Ordered list of free-form strings stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(v: Vec<String>) -> Self { Self(v) }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "providers")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_name: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub city: String,
    #[sea_orm(column_type = "Decimal(Some((10, 8)))", nullable)]
    pub latitude: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((11, 8)))", nullable)]
    pub longitude: Option<Decimal>,
    #[sea_orm(column_type = "Json")]
    pub services: StringList,
    #[sea_orm(column_type = "Json")]
    pub specialties: StringList,
    #[sea_orm(column_type = "Decimal(Some((3, 2)))")]
    pub rating: Decimal,
    pub total_reviews: i32,
    pub status: ProviderStatus,
    pub verified: bool,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub has_home_service: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub delivery_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub commission: Decimal,
    pub total_bookings: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_revenue: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    User,
    Bookings,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
            Relation::Bookings => Entity::has_many(booking::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<booking::Entity> for Entity {
    fn to() -> RelationDef { Relation::Bookings.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Platform commission applied to new providers, in percent.
pub fn default_commission() -> Decimal {
    Decimal::new(1500, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderation_transitions() {
        use ProviderStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Rejected.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Suspended));
        assert!(Suspended.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Approved));

        assert!(!Approved.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Suspended.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Suspended));
    }

    #[test]
    fn only_approve_or_reject_are_decisions() {
        assert!(ProviderStatus::Approved.is_decision());
        assert!(ProviderStatus::Rejected.is_decision());
        assert!(!ProviderStatus::Pending.is_decision());
        assert!(!ProviderStatus::Suspended.is_decision());
    }

    #[test]
    fn string_list_is_a_plain_json_array() {
        let l = StringList(vec!["haircut".into(), "shave".into()]);
        assert_eq!(serde_json::to_string(&l).unwrap(), r#"["haircut","shave"]"#);
    }

    #[test]
    fn default_commission_is_fifteen_percent() {
        assert_eq!(default_commission().to_string(), "15.00");
    }
}
