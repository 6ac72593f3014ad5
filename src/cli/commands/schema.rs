//! Development schema bootstrap

use crate::config::Config;
use crate::db::ConnectionManager;

pub async fn cmd_init_schema(config: &Config) -> anyhow::Result<()> {
    ConnectionManager::new(config.database.clone())
        .init_schema()
        .await?;
    println!("station_facilities table is ready on {}", config.database.describe());
    Ok(())
}
