//! Create price_rules table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceRules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceRules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PriceRules::CityCode).string().not_null())
                    .col(ColumnDef::new(PriceRules::VehicleType).string().not_null())
                    .col(ColumnDef::new(PriceRules::FareType).string().not_null())
                    .col(ColumnDef::new(PriceRules::FareVersion).integer().not_null())
                    .col(
                        ColumnDef::new(PriceRules::StartFare)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(PriceRules::StartMile)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(PriceRules::UnitPricePerMile)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(PriceRules::UnitPricePerMinute)
                            .string()
                            .not_null()
                            .default("0"),
                    )
                    .col(
                        ColumnDef::new(PriceRules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per (fare_type, version); concurrent publishers race on this
        manager
            .create_index(
                Index::create()
                    .name("idx_price_rules_fare_type_version")
                    .table(PriceRules::Table)
                    .col(PriceRules::FareType)
                    .col(PriceRules::FareVersion)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceRules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PriceRules {
    Table,
    Id,
    CityCode,
    VehicleType,
    FareType,
    FareVersion,
    StartFare,
    StartMile,
    UnitPricePerMile,
    UnitPricePerMinute,
    CreatedAt,
}
