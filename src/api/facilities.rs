use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::{
    ApiError, ApiResponse, AppState, FacilityDto, FacilityListResponse, KindsResponse,
    LookupOutcome, NormalizedStatusResponse,
};
use crate::constants::{ALL_KINDS, FACILITY_KINDS};
use crate::models::{FacilityRecord, FilterCriteria, LineMatch};
use crate::services::FacilityService;

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub station: String,
    #[serde(default)]
    pub line: String,
    #[serde(default)]
    pub line_match: LineMatch,
    #[serde(default)]
    pub kind: String,
}

const MAX_FILTER_CHARS: usize = 100;

impl LookupQuery {
    fn validate(&self) -> Result<(), ApiError> {
        for (name, value) in [
            ("station", &self.station),
            ("line", &self.line),
            ("kind", &self.kind),
        ] {
            if value.chars().count() > MAX_FILTER_CHARS {
                return Err(ApiError::validation(format!(
                    "{name} must be at most {MAX_FILTER_CHARS} characters"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct NormalizeQuery {
    #[serde(default)]
    pub raw: String,
}

fn to_response(service: &dyn FacilityService, rows: Vec<FacilityRecord>) -> FacilityListResponse {
    let facilities: Vec<FacilityDto> = rows
        .into_iter()
        .map(|record| {
            let state = service.normalize_status(&record.operating_status);
            FacilityDto::from_record(record, state)
        })
        .collect();

    FacilityListResponse {
        count: facilities.len(),
        facilities,
    }
}

/// `GET /api/facilities`
///
/// An empty match is a successful response with `count: 0`.
pub async fn lookup_facilities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<
    (Extension<LookupOutcome>, Json<ApiResponse<FacilityListResponse>>),
    ApiError,
> {
    query.validate()?;

    let criteria =
        FilterCriteria::from_raw(&query.station, &query.line, query.line_match, &query.kind);

    let rows = state.facilities().lookup(&criteria).await?;
    let outcome = LookupOutcome {
        filters: criteria.shape(),
        results: rows.len(),
    };

    Ok((
        Extension(outcome),
        Json(ApiResponse::success(to_response(
            state.facilities().as_ref(),
            rows,
        ))),
    ))
}

/// `GET /api/facilities/recent`
pub async fn recent_facilities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<FacilityListResponse>>, ApiError> {
    let rows = state.facilities().recent_changes().await?;

    Ok(Json(ApiResponse::success(to_response(
        state.facilities().as_ref(),
        rows,
    ))))
}

/// `GET /api/stations`
pub async fn list_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let names = state.facilities().station_names().await?;
    Ok(Json(ApiResponse::success(names)))
}

/// `GET /api/kinds`
pub async fn list_kinds() -> Json<ApiResponse<KindsResponse>> {
    Json(ApiResponse::success(KindsResponse {
        all: ALL_KINDS,
        kinds: FACILITY_KINDS.to_vec(),
    }))
}

/// `GET /api/status/normalize`
pub async fn normalize_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NormalizeQuery>,
) -> Json<ApiResponse<NormalizedStatusResponse>> {
    let normalized = state.facilities().normalize_status(&query.raw);

    Json(ApiResponse::success(NormalizedStatusResponse {
        raw: query.raw,
        state: normalized,
    }))
}
