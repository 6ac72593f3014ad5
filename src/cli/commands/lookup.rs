//! Facility lookup command handler

use super::{facility_service, format_facility, format_updated_at};
use crate::config::Config;
use crate::models::{FilterCriteria, LineMatch};
use crate::services::{FacilityError, FacilityService};

pub async fn cmd_lookup(
    config: &Config,
    station: &str,
    line: &str,
    line_match: LineMatch,
    kind: &str,
) -> anyhow::Result<()> {
    let service = facility_service(config);
    let criteria = FilterCriteria::from_raw(station, line, line_match, kind);

    let results = match service.lookup(&criteria).await {
        Ok(results) => results,
        Err(e @ FacilityError::Connection(_)) => {
            println!("⚠️  Could not reach the facility database. Please try again shortly.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if results.is_empty() {
        println!("No facilities match the given filters.");
        return Ok(());
    }

    println!("Found {} facilities", results.len());
    println!("{:-<70}", "");

    for record in &results {
        let state = service.normalize_status(&record.operating_status);
        println!("{}", format_facility(record, state));
        println!("  상세위치: {}", record.detail_position);
        println!("  최종 업데이트: {}", format_updated_at(record));
    }

    Ok(())
}
