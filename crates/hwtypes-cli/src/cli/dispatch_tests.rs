//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, dump_command};
use crate::commands::dump::DumpArgs;

#[test]
fn check_takes_schema_path() {
    let m = check_command()
        .try_get_matches_from(["check", "types.json"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.schema_path, Some(PathBuf::from("types.json")));
    assert_eq!(params.schema_text, None);
}

#[test]
fn check_takes_inline_text() {
    let m = check_command()
        .try_get_matches_from(["check", "-t", r#"{"types": []}"#])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.schema_path, None);
    assert_eq!(params.schema_text.as_deref(), Some(r#"{"types": []}"#));
}

#[test]
fn path_and_text_conflict() {
    let result = check_command().try_get_matches_from(["check", "types.json", "--text", "{}"]);

    assert!(result.is_err());
}

#[test]
fn dump_flags_reach_config() {
    let m = dump_command()
        .try_get_matches_from(["dump", "types.json", "--json", "--ancestors"])
        .unwrap();
    let args: DumpArgs = DumpParams::from_matches(&m).into();

    assert_eq!(args.schema_path, Some(PathBuf::from("types.json")));
    assert!(args.config.json);
    assert!(args.config.ancestors);
}

#[test]
fn dump_defaults_to_text() {
    let m = dump_command().try_get_matches_from(["dump", "-"]).unwrap();
    let args: DumpArgs = DumpParams::from_matches(&m).into();

    assert_eq!(args.schema_path, Some(PathBuf::from("-")));
    assert!(!args.config.json);
    assert!(!args.config.ancestors);
}

#[test]
fn check_rejects_dump_flags() {
    let result = check_command().try_get_matches_from(["check", "types.json", "--json"]);

    assert!(result.is_err());
}

#[test]
fn subcommand_required() {
    let result = build_cli().try_get_matches_from(["hwtypes"]);

    assert!(result.is_err());
}

#[test]
fn help_lists_commands() {
    let help = build_cli().render_help().to_string();

    assert!(help.contains("check"));
    assert!(help.contains("dump"));
}
