use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn parse_migrate_with_database() {
    let cli = Cli::try_parse_from(["ds", "migrate", "--database", "store.duckdb"]).unwrap();
    assert!(matches!(cli.command, Commands::Migrate));
    assert_eq!(cli.global.database.as_deref(), Some("store.duckdb"));
    assert!(!cli.global.verbose);
}

#[test]
fn parse_status_json_verbose() {
    let cli = Cli::try_parse_from(["ds", "-v", "status", "--json"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert!(args.json),
        other => panic!("unexpected command {other:?}"),
    }
    assert!(cli.global.verbose);
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["ds"]).is_err());
}
