use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;

use crate::db::query;
use crate::models::{FacilityRecord, FilterCriteria};

/// Read-only access to `station_facilities`.
pub struct FacilityRepository {
    conn: Arc<DatabaseConnection>,
}

impl FacilityRepository {
    #[must_use]
    pub const fn new(conn: Arc<DatabaseConnection>) -> Self {
        Self { conn }
    }

    pub async fn find(&self, criteria: &FilterCriteria) -> Result<Vec<FacilityRecord>, DbErr> {
        let rows = query::lookup(criteria).all(&*self.conn).await?;
        Ok(rows.into_iter().map(FacilityRecord::from).collect())
    }

    pub async fn updated_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<FacilityRecord>, DbErr> {
        let rows = query::updated_since(since).all(&*self.conn).await?;
        Ok(rows.into_iter().map(FacilityRecord::from).collect())
    }

    pub async fn station_names(&self) -> Result<Vec<String>, DbErr> {
        query::station_names()
            .into_tuple::<String>()
            .all(&*self.conn)
            .await
    }
}
