use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `updated_at` is `timestamptz`; the entity decodes it as UTC.
fn facilities_table() -> TableCreateStatement {
    Table::create()
        .table(StationFacilities::Table)
        .if_not_exists()
        .col(ColumnDef::new(StationFacilities::LineNm).string().not_null())
        .col(ColumnDef::new(StationFacilities::StnNm).string().not_null())
        .col(ColumnDef::new(StationFacilities::FcltKind).string().not_null())
        .col(ColumnDef::new(StationFacilities::DtlPstn).string().not_null())
        .col(ColumnDef::new(StationFacilities::OprtngSitu).string().not_null())
        .col(
            ColumnDef::new(StationFacilities::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(facilities_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_station_facilities_stn_nm")
                    .table(StationFacilities::Table)
                    .col(StationFacilities::StnNm)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Recent-change reads scan by update time
        manager
            .create_index(
                Index::create()
                    .name("idx_station_facilities_updated_at")
                    .table(StationFacilities::Table)
                    .col(StationFacilities::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StationFacilities::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StationFacilities {
    Table,
    LineNm,
    StnNm,
    FcltKind,
    DtlPstn,
    OprtngSitu,
    UpdatedAt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updated_at_is_timezone_aware_on_postgres() {
        let sql = facilities_table().to_string(PostgresQueryBuilder);
        assert!(
            sql.contains(r#""updated_at" timestamp with time zone NOT NULL"#),
            "{sql}"
        );
    }
}
