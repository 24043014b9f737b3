//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// datamigrate - load versioned CSV data in step with schema migrations
#[derive(Parser, Debug)]
#[command(name = "datamigrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Database to migrate (DuckDB file or :memory:)
    #[arg(short = 'd', long, global = true, env = "DB_URL")]
    pub db_url: Option<String>,

    /// Directory holding the schema migrations
    #[arg(short, long, global = true)]
    pub migrations_dir: Option<String>,

    /// Directory holding the data migration descriptors
    #[arg(long, global = true)]
    pub datamigrations_dir: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load every data migration above the current version
    Up,

    /// Truncate the tables of every data migration and reset the version to 0
    Down,

    /// Scaffold a data migration descriptor from a schema migration
    Create(CreateArgs),

    /// Show the data and schema migration versions
    Version,

    /// Set the data migration version without loading anything
    Force(ForceArgs),
}

/// Arguments for the create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Schema migration version to scaffold from (padded to six digits)
    #[arg(long = "version", value_name = "VERSION")]
    pub migration_version: String,

    /// Overwrite an existing descriptor
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the force command
#[derive(Args, Debug)]
pub struct ForceArgs {
    /// Version to record
    pub version: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
