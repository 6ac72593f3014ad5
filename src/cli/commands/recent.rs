//! Recent changes command handler

use super::{facility_service, format_facility, format_updated_at};
use crate::config::Config;
use crate::services::FacilityService;

pub async fn cmd_recent(config: &Config) -> anyhow::Result<()> {
    let service = facility_service(config);
    let changes = service.recent_changes().await?;

    if changes.is_empty() {
        println!("No facilities changed in the last 24 hours.");
        return Ok(());
    }

    println!("Changed in the last 24 hours ({} total)", changes.len());
    println!("{:-<70}", "");

    for record in &changes {
        let state = service.normalize_status(&record.operating_status);
        println!(
            "{}  {} [{}]",
            format_updated_at(record),
            format_facility(record, state),
            record.operating_status
        );
    }

    Ok(())
}
