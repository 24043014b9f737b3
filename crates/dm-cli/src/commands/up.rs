//! Up command implementation

use anyhow::{Context, Result};
use dm_migrate::Migrator;

use crate::cli::GlobalArgs;
use crate::commands::common::{print_report, step_progress, Settings};

/// Execute the up command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let settings = Settings::load(global)?;
    let registry = settings.load_registry()?;
    settings.check_catalog(&registry)?;
    let db = settings.open_database()?;

    let (pb, progress) = step_progress(global.verbose);
    let result = Migrator::new(&db, &registry)
        .with_progress(progress)
        .up()
        .await;
    pb.finish_and_clear();

    let report = result.context("Data migration up failed")?;
    print_report(&report);
    Ok(())
}
