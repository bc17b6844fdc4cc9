//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("hwtypes")
        .about("Check and inspect hardware type schemas")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Declare every type of a schema and report the first failure.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a type schema")
        .override_usage(
            "\
  hwtypes check <SCHEMA>
  hwtypes check -t <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  hwtypes check types.json
  hwtypes check - < types.json
  hwtypes check -t '{"types": [{"name": "W", "kind": "bitvector", "width": 8}]}'"#,
        )
        .arg(schema_path_arg())
        .arg(schema_text_arg())
}

/// Print the resolved types of a schema.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the resolved types of a schema")
        .override_usage(
            "\
  hwtypes dump <SCHEMA> [--json] [--ancestors]
  hwtypes dump -t <TEXT> [--json] [--ancestors]",
        )
        .after_help(
            r#"EXAMPLES:
  hwtypes dump types.json
  hwtypes dump types.json --json
  hwtypes dump types.json --ancestors"#,
        )
        .arg(schema_path_arg())
        .arg(schema_text_arg())
        .arg(json_arg())
        .arg(ancestors_arg())
}
