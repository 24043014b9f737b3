//! Force command implementation

use anyhow::{Context, Result};
use dm_core::{parse_version, Registry};
use dm_migrate::Migrator;

use crate::cli::{ForceArgs, GlobalArgs};
use crate::commands::common::Settings;

/// Execute the force command
pub async fn execute(args: &ForceArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let version = parse_version(&args.version)?;
    let db = settings.open_database()?;

    // Forcing never reads descriptors
    let registry = Registry::default();
    Migrator::new(&db, &registry)
        .force(version)
        .await
        .with_context(|| format!("Failed to force data migration version {}", version))?;

    println!("Data migration version: {}", version);
    Ok(())
}
