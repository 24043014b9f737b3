//! Create command implementation

use anyhow::{Context, Result};
use dm_migrate::create_descriptor;
use dm_sql::SqlParser;

use crate::cli::{CreateArgs, GlobalArgs};
use crate::commands::common::Settings;

/// Execute the create command
pub async fn execute(args: &CreateArgs, global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let parser = SqlParser::new(settings.config.dialect);
    log::debug!("Parsing schema migrations as {}", parser.dialect().as_str());

    let scaffold = create_descriptor(
        &settings.migrations_dir,
        &settings.data_migrations_dir,
        &args.migration_version,
        &parser,
        args.force,
    )
    .with_context(|| {
        format!(
            "Failed to create data migration for version {}",
            args.migration_version
        )
    })?;

    print!("{}", scaffold.schema);
    println!("Created {}", scaffold.path.display());
    println!("Set csv_path in the descriptor before running `datamigrate up`.");
    Ok(())
}
