use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_parse_create() {
    let cli = Cli::try_parse_from(["datamigrate", "create", "--version", "3", "--force"]).unwrap();
    match cli.command {
        Commands::Create(args) => {
            assert_eq!(args.migration_version, "3");
            assert!(args.force);
        }
        other => panic!("expected create, got {:?}", other),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "datamigrate",
        "up",
        "--db-url",
        "data.duckdb",
        "--migrations-dir",
        "db/migrations",
        "--datamigrations-dir",
        "db/data",
        "-v",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Up));
    assert!(cli.global.verbose);
    assert_eq!(cli.global.db_url.as_deref(), Some("data.duckdb"));
    assert_eq!(cli.global.migrations_dir.as_deref(), Some("db/migrations"));
    assert_eq!(cli.global.datamigrations_dir.as_deref(), Some("db/data"));
    assert_eq!(cli.global.project_dir, ".");
}

#[test]
fn test_force_requires_version() {
    assert!(Cli::try_parse_from(["datamigrate", "force"]).is_err());
    let cli = Cli::try_parse_from(["datamigrate", "force", "2"]).unwrap();
    assert!(matches!(cli.command, Commands::Force(ForceArgs { ref version }) if version == "2"));
}

#[test]
fn test_create_requires_version() {
    assert!(Cli::try_parse_from(["datamigrate", "create"]).is_err());
}

#[test]
fn test_short_d_is_db_url() {
    let cli = Cli::try_parse_from(["datamigrate", "version", "-d", "state.duckdb"]).unwrap();
    assert_eq!(cli.global.db_url.as_deref(), Some("state.duckdb"));
    assert_eq!(cli.global.datamigrations_dir, None);
}
