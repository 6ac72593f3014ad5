//! Domain service for facility lookups.
//!
//! This is the boundary the HTTP API and CLI call into: plain filter
//! criteria in, plain records out.

use sea_orm::DbErr;
use thiserror::Error;

use crate::db::ConnectError;
use crate::models::{FacilityRecord, FilterCriteria, OperationalState};

/// Errors surfaced by facility lookups.
///
/// "No matching rows" is never an error; it is an empty `Ok` result.
#[derive(Debug, Clone, Error)]
pub enum FacilityError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Facility database is unreachable: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    QueryExecution(String),
}

impl FacilityError {
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<ConnectError> for FacilityError {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::Configuration(msg) => Self::Configuration(msg),
            ConnectError::Connection(e) => Self::Connection(e.to_string()),
            err @ ConnectError::Timeout(_) => Self::Connection(err.to_string()),
        }
    }
}

impl From<DbErr> for FacilityError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Self::Connection(err.to_string()),
            _ => Self::QueryExecution(err.to_string()),
        }
    }
}

/// Domain service trait for facility lookups.
#[async_trait::async_trait]
pub trait FacilityService: Send + Sync {
    /// Facilities matching `criteria`, ordered by station name.
    ///
    /// Results are cached per criteria for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`FacilityError::Configuration`] when connection settings are
    /// missing, [`FacilityError::Connection`] when the database cannot be
    /// reached and [`FacilityError::QueryExecution`] when the query fails.
    async fn lookup(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<FacilityRecord>, FacilityError>;

    /// Facilities updated in the last 24 hours, newest first. Never cached.
    async fn recent_changes(&self) -> Result<Vec<FacilityRecord>, FacilityError>;

    /// Distinct station names, ascending.
    async fn station_names(&self) -> Result<Vec<String>, FacilityError>;

    fn normalize_status(&self, raw: &str) -> OperationalState;
}
