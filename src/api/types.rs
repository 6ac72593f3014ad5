use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{FacilityRecord, OperationalState};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FacilityDto {
    pub line_name: String,
    pub station_name: String,
    pub facility_kind: String,
    pub detail_position: String,
    pub operating_status: String,
    pub state: OperationalState,
    pub updated_at: DateTime<Utc>,
}

impl FacilityDto {
    pub fn from_record(record: FacilityRecord, state: OperationalState) -> Self {
        Self {
            line_name: record.line_name,
            station_name: record.station_name,
            facility_kind: record.facility_kind,
            detail_position: record.detail_position,
            operating_status: record.operating_status,
            state,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FacilityListResponse {
    pub count: usize,
    pub facilities: Vec<FacilityDto>,
}

#[derive(Debug, Serialize)]
pub struct KindsResponse {
    pub all: &'static str,
    pub kinds: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct NormalizedStatusResponse {
    pub raw: String,
    pub state: OperationalState,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
