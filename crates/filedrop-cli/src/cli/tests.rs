//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_serve_defaults() {
    match parse(&["filedrop", "serve"]) {
        CliCommand::Serve { port, storage_root } => {
            assert!(port.is_none());
            assert!(storage_root.is_none());
        }
        _ => panic!("expected Serve"),
    }
}

#[test]
fn cli_parse_serve_overrides() {
    match parse(&[
        "filedrop",
        "serve",
        "--port",
        "8080",
        "--storage-root",
        "/srv/uploads",
    ]) {
        CliCommand::Serve { port, storage_root } => {
            assert_eq!(port, Some(8080));
            assert_eq!(storage_root, Some(PathBuf::from("/srv/uploads")));
        }
        _ => panic!("expected Serve with overrides"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["filedrop", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["filedrop", "bogus"]).is_err());
}

#[test]
fn cli_rejects_bad_port() {
    assert!(Cli::try_parse_from(["filedrop", "serve", "--port", "notaport"]).is_err());
}
