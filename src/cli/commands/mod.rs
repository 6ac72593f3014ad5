mod lookup;
mod recent;
mod schema;
mod serve;
mod stations;

pub use lookup::cmd_lookup;
pub use recent::cmd_recent;
pub use schema::cmd_init_schema;
pub use serve::cmd_serve;
pub use stations::cmd_stations;

use crate::config::Config;
use crate::db::ConnectionManager;
use crate::models::{FacilityRecord, OperationalState};
use crate::services::SeaOrmFacilityService;

fn facility_service(config: &Config) -> SeaOrmFacilityService {
    SeaOrmFacilityService::from_config(ConnectionManager::new(config.database.clone()), config)
}

fn format_updated_at(record: &FacilityRecord) -> String {
    record
        .updated_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn format_facility(record: &FacilityRecord, state: OperationalState) -> String {
    format!(
        "{} {} [{}] {} ({})",
        state.indicator(),
        record.facility_kind,
        record.line_name,
        record.station_name,
        state.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn facility_line_shows_state() {
        let record = FacilityRecord {
            line_name: "2호선".to_string(),
            station_name: "시청".to_string(),
            facility_kind: "엘리베이터".to_string(),
            detail_position: "B1 출구".to_string(),
            operating_status: "점검중".to_string(),
            updated_at: Utc::now(),
        };

        let line = format_facility(&record, OperationalState::Down);
        assert_eq!(line, "🔴 엘리베이터 [2호선] 시청 (점검/중지)");
    }
}
