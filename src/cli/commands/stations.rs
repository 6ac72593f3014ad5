//! Station list command handler

use super::facility_service;
use crate::config::Config;
use crate::services::FacilityService;

pub async fn cmd_stations(config: &Config) -> anyhow::Result<()> {
    let names = facility_service(config).station_names().await?;

    if names.is_empty() {
        println!("No stations found.");
        return Ok(());
    }

    for name in &names {
        println!("{name}");
    }
    println!();
    println!("{} stations", names.len());

    Ok(())
}
