//! Create `bookings` table with FKs to `users` and `providers`.
//!
//! `booking_number` is the human-facing reference and is unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(uuid(Bookings::Id).primary_key())
                    .col(string_len(Bookings::BookingNumber, 32).unique_key().not_null())
                    .col(uuid(Bookings::UserId).not_null())
                    .col(uuid(Bookings::ProviderId).not_null())
                    .col(string_len(Bookings::Service, 255).not_null())
                    .col(date(Bookings::Date).not_null())
                    .col(string_len(Bookings::Time, 16).not_null())
                    .col(string_len(Bookings::Status, 16).not_null().default("pending"))
                    .col(decimal_len(Bookings::Amount, 10, 2).not_null())
                    .col(decimal_len(Bookings::Commission, 10, 2).not_null().default(0))
                    .col(string_len(Bookings::PaymentStatus, 16).not_null().default("pending"))
                    .col(string_len_null(Bookings::PaymentMethod, 64))
                    .col(text_null(Bookings::Notes))
                    .col(boolean(Bookings::AiStyleUsed).not_null().default(false))
                    .col(string_len_null(Bookings::AiStyleImage, 1024))
                    .col(string_len_null(Bookings::CancelledBy, 64))
                    .col(text_null(Bookings::CancelReason))
                    .col(timestamp_with_time_zone(Bookings::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Bookings::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_user")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookings_provider")
                            .from(Bookings::Table, Bookings::ProviderId)
                            .to(Providers::Table, Providers::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    BookingNumber,
    UserId,
    ProviderId,
    Service,
    Date,
    Time,
    Status,
    Amount,
    Commission,
    PaymentStatus,
    PaymentMethod,
    Notes,
    AiStyleUsed,
    AiStyleImage,
    CancelledBy,
    CancelReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users { Table, Id }

#[derive(DeriveIden)]
enum Providers { Table, Id }
