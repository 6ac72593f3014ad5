use sea_orm::entity::prelude::*;

/// One facility row as published by the ingestion job.
///
/// The table has no surrogate key; the facility identity is the tuple of
/// line, station, kind and detail position.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "station_facilities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub line_nm: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub stn_nm: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub fclt_kind: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub dtl_pstn: String,
    pub oprtng_situ: String,
    /// Decoded as UTC, so on Postgres the column must be `timestamptz`.
    /// A plain `timestamp` column fails to decode and every read surfaces as
    /// a query error.
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
