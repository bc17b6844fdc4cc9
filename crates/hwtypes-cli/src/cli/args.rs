//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Schema file (positional); `-` reads stdin.
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .value_parser(value_parser!(PathBuf))
        .help("Schema file (JSON), or - for stdin")
}

/// Inline schema text (-t/--text).
pub fn schema_text_arg() -> Arg {
    Arg::new("schema_text")
        .short('t')
        .long("text")
        .value_name("TEXT")
        .conflicts_with("schema_path")
        .help("Inline schema text")
}

/// Output JSON instead of text (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output JSON")
}

/// Include the full ancestor list (--ancestors).
pub fn ancestors_arg() -> Arg {
    Arg::new("ancestors")
        .long("ancestors")
        .action(ArgAction::SetTrue)
        .help("List every ancestor, not just direct bases")
}
