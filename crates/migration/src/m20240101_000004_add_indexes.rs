use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Providers: owner lookup and the (city, type, status) listing filters
        manager
            .create_index(
                Index::create()
                    .name("idx_providers_user")
                    .table(Providers::Table)
                    .col(Providers::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_providers_city_type_status")
                    .table(Providers::Table)
                    .col(Providers::City)
                    .col(Providers::Type)
                    .col(Providers::Status)
                    .to_owned(),
            )
            .await?;

        // Bookings: per-customer and per-provider listings
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_user")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_provider")
                    .table(Bookings::Table)
                    .col(Bookings::ProviderId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_created_at")
                    .table(Bookings::Table)
                    .col(Bookings::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_providers_user").table(Providers::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_providers_city_type_status").table(Providers::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_user").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_provider").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_created_at").table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Providers { Table, UserId, City, Type, Status }

#[derive(DeriveIden)]
enum Bookings { Table, UserId, ProviderId, CreatedAt }
