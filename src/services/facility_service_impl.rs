//! `SeaORM` implementation of the `FacilityService` trait.

use async_trait::async_trait;
use chrono::Utc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::constants;
use crate::db::{ConnectionManager, FacilityRepository};
use crate::models::{FacilityRecord, FilterCriteria, OperationalState};
use crate::services::cache::ResultCache;
use crate::services::facility_service::{FacilityError, FacilityService};
use crate::services::status::StatusNormalizer;

pub struct SeaOrmFacilityService {
    connections: ConnectionManager,
    lookups: ResultCache<FilterCriteria, Vec<FacilityRecord>>,
    stations: ResultCache<(), Vec<String>>,
    normalizer: StatusNormalizer,
}

impl SeaOrmFacilityService {
    #[must_use]
    pub fn new(
        connections: ConnectionManager,
        cache_ttl: Duration,
        normalizer: StatusNormalizer,
    ) -> Self {
        Self {
            connections,
            lookups: ResultCache::new("lookup", cache_ttl),
            stations: ResultCache::new("stations", cache_ttl),
            normalizer,
        }
    }

    #[must_use]
    pub fn from_config(connections: ConnectionManager, config: &Config) -> Self {
        Self::new(
            connections,
            config.cache.ttl(),
            StatusNormalizer::from_config(&config.status),
        )
    }

    async fn repo(&self) -> Result<FacilityRepository, FacilityError> {
        Ok(self.connections.facilities().await?)
    }
}

fn record_outcome<T>(
    kind: &'static str,
    started: Instant,
    result: &Result<Vec<T>, FacilityError>,
) {
    metrics::counter!("facility_queries_total", "kind" => kind).increment(1);

    match result {
        Ok(rows) => debug!(
            query = kind,
            rows = rows.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Facility query finished"
        ),
        Err(e) => {
            metrics::counter!("facility_query_errors_total", "kind" => kind).increment(1);
            warn!(query = kind, error = %e, "Facility query failed");
        }
    }
}

#[async_trait]
impl FacilityService for SeaOrmFacilityService {
    async fn lookup(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<FacilityRecord>, FacilityError> {
        let rows = self
            .lookups
            .get_or_try_fetch(criteria, || async {
                let started = Instant::now();
                let result = match self.repo().await {
                    Ok(repo) => repo.find(criteria).await.map_err(FacilityError::from),
                    Err(e) => Err(e),
                };
                record_outcome("lookup", started, &result);
                result
            })
            .await?;

        info!(
            station = criteria.station_name().unwrap_or("*"),
            line = criteria.line_name().unwrap_or("*"),
            kind = criteria.facility_kind().unwrap_or("*"),
            results = rows.len(),
            "Facility lookup"
        );

        Ok(rows)
    }

    async fn recent_changes(&self) -> Result<Vec<FacilityRecord>, FacilityError> {
        let since = Utc::now() - chrono::Duration::hours(constants::recent::WINDOW_HOURS);

        let started = Instant::now();
        let result = match self.repo().await {
            Ok(repo) => repo.updated_since(since).await.map_err(FacilityError::from),
            Err(e) => Err(e),
        };
        record_outcome("recent_changes", started, &result);

        result
    }

    async fn station_names(&self) -> Result<Vec<String>, FacilityError> {
        self.stations
            .get_or_try_fetch(&(), || async {
                let started = Instant::now();
                let result = match self.repo().await {
                    Ok(repo) => repo.station_names().await.map_err(FacilityError::from),
                    Err(e) => Err(e),
                };
                record_outcome("station_names", started, &result);
                result
            })
            .await
    }

    fn normalize_status(&self, raw: &str) -> OperationalState {
        self.normalizer.normalize(raw)
    }
}
