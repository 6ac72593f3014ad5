use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::station_facilities;

/// A single facility as read from `station_facilities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacilityRecord {
    pub line_name: String,
    pub station_name: String,
    pub facility_kind: String,
    pub detail_position: String,
    /// Raw status text from the source feed, not normalized.
    pub operating_status: String,
    pub updated_at: DateTime<Utc>,
}

impl From<station_facilities::Model> for FacilityRecord {
    fn from(model: station_facilities::Model) -> Self {
        Self {
            line_name: model.line_nm,
            station_name: model.stn_nm,
            facility_kind: model.fclt_kind,
            detail_position: model.dtl_pstn,
            operating_status: model.oprtng_situ,
            updated_at: model.updated_at,
        }
    }
}

/// Presentation state derived from a raw status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalState {
    Operational,
    Down,
}

impl OperationalState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Operational => "정상",
            Self::Down => "점검/중지",
        }
    }

    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Operational => "🟢",
            Self::Down => "🔴",
        }
    }
}

impl std::fmt::Display for OperationalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operational => write!(f, "OPERATIONAL"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}
