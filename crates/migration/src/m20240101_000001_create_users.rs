//! Create `users` table.
//!
//! Root entity: providers and bookings reference it. `external_identity_id`
//! and `email` are each unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).primary_key())
                    .col(string_len(Users::ExternalIdentityId, 128).unique_key().not_null())
                    .col(string_len(Users::Email, 255).unique_key().not_null())
                    .col(string_len(Users::Name, 255).not_null())
                    .col(string_len_null(Users::Phone, 32))
                    .col(string_len(Users::Role, 16).not_null().default("customer"))
                    .col(string_len_null(Users::PhotoUrl, 1024))
                    .col(string_len(Users::Status, 16).not_null().default("active"))
                    .col(integer(Users::TotalBookings).not_null().default(0))
                    .col(decimal_len(Users::TotalSpent, 10, 2).not_null().default(0))
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    ExternalIdentityId,
    Email,
    Name,
    Phone,
    Role,
    PhotoUrl,
    Status,
    TotalBookings,
    TotalSpent,
    CreatedAt,
    UpdatedAt,
}
