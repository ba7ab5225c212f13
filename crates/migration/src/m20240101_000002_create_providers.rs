//! Create `providers` table with FK to `users`.
//!
//! A provider is the business profile owned by a user with the provider role.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Providers::Table)
                    .if_not_exists()
                    .col(uuid(Providers::Id).primary_key())
                    .col(uuid(Providers::UserId).not_null())
                    .col(string_len(Providers::BusinessName, 255).not_null())
                    .col(string_len(Providers::Type, 16).not_null())
                    .col(text(Providers::Address).not_null())
                    .col(string_len(Providers::City, 128).not_null())
                    .col(decimal_len_null(Providers::Latitude, 10, 8))
                    .col(decimal_len_null(Providers::Longitude, 11, 8))
                    .col(json(Providers::Services).not_null())
                    .col(json(Providers::Specialties).not_null())
                    .col(decimal_len(Providers::Rating, 3, 2).not_null().default(0))
                    .col(integer(Providers::TotalReviews).not_null().default(0))
                    .col(string_len(Providers::Status, 16).not_null().default("pending"))
                    .col(boolean(Providers::Verified).not_null().default(false))
                    .col(string_len_null(Providers::OpeningTime, 16))
                    .col(string_len_null(Providers::ClosingTime, 16))
                    .col(boolean(Providers::HasHomeService).not_null().default(false))
                    .col(decimal_len(Providers::DeliveryFee, 10, 2).not_null().default(0))
                    .col(decimal_len(Providers::Commission, 5, 2).not_null().default(15))
                    .col(integer(Providers::TotalBookings).not_null().default(0))
                    .col(decimal_len(Providers::TotalRevenue, 10, 2).not_null().default(0))
                    .col(timestamp_with_time_zone(Providers::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Providers::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_providers_user")
                            .from(Providers::Table, Providers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Providers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Providers {
    Table,
    Id,
    UserId,
    BusinessName,
    Type,
    Address,
    City,
    Latitude,
    Longitude,
    Services,
    Specialties,
    Rating,
    TotalReviews,
    Status,
    Verified,
    OpeningTime,
    ClosingTime,
    HasHomeService,
    DeliveryFee,
    Commission,
    TotalBookings,
    TotalRevenue,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
