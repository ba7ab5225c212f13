use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;

use models::provider::{self, ProviderStatus};
use models::{booking, user};
use crate::errors::ServiceError;

/// Platform-wide counts for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_providers: u64,
    pub total_bookings: u64,
    pub pending_approvals: u64,
}

#[derive(Clone)]
pub struct AdminService {
    db: DatabaseConnection,
}

impl AdminService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let (total_users, total_providers, total_bookings, pending_approvals) = tokio::try_join!(
            user::Entity::find().count(&self.db),
            provider::Entity::find().count(&self.db),
            booking::Entity::find().count(&self.db),
            provider::Entity::find()
                .filter(provider::Column::Status.eq(ProviderStatus::Pending))
                .count(&self.db),
        )?;
        Ok(DashboardStats { total_users, total_providers, total_bookings, pending_approvals })
    }
}
