use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FarmPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FarmPlans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FarmPlans::Location).string().not_null())
                    .col(ColumnDef::new(FarmPlans::AreaSize).double().not_null())
                    .col(ColumnDef::new(FarmPlans::Budget).double().not_null())
                    .col(
                        ColumnDef::new(FarmPlans::WaterAvailability)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FarmPlans::LightAccess).string().not_null())
                    .col(ColumnDef::new(FarmPlans::RecommendedCrops).text())
                    .col(ColumnDef::new(FarmPlans::CostAnalysis).text())
                    .col(ColumnDef::new(FarmPlans::LayoutSuggestions).text())
                    .col(ColumnDef::new(FarmPlans::WeatherData).text())
                    .col(ColumnDef::new(FarmPlans::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // History queries sort by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_farm_plans_created_at")
                    .table(FarmPlans::Table)
                    .col(FarmPlans::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FarmPlans::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum FarmPlans {
    Table,
    Id,
    Location,
    AreaSize,
    Budget,
    WaterAvailability,
    LightAccess,
    RecommendedCrops,
    CostAnalysis,
    LayoutSuggestions,
    WeatherData,
    CreatedAt,
}
