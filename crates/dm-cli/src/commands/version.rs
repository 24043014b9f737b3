//! Version command implementation

use anyhow::Result;
use dm_core::{Registry, VersionState};
use dm_migrate::Migrator;

use crate::cli::GlobalArgs;
use crate::commands::common::Settings;

/// Execute the version command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    // Status should still work while a descriptor is half written
    let registry = settings.load_registry().unwrap_or_else(|e| {
        log::warn!("{:#}", e);
        Registry::default()
    });
    let db = settings.open_database()?;

    let status = Migrator::new(&db, &registry).status().await?;

    println!("Data migration version: {}", describe(status.data));
    println!("Schema migration version: {}", describe(status.schema));
    match status.latest {
        Some(latest) => println!("Latest data migration: {}", latest),
        None => println!("Latest data migration: none"),
    }
    Ok(())
}

fn describe(state: Option<VersionState>) -> String {
    state.map_or_else(|| "none".to_string(), |s| s.to_string())
}
