//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::check::CheckArgs;
use crate::commands::dump::{DumpArgs, DumpConfig};

pub struct CheckParams {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: m.get_one::<PathBuf>("schema_path").cloned(),
            schema_text: m.get_one::<String>("schema_text").cloned(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            schema_path: p.schema_path,
            schema_text: p.schema_text,
        }
    }
}

pub struct DumpParams {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub json: bool,
    pub ancestors: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema_path: m.get_one::<PathBuf>("schema_path").cloned(),
            schema_text: m.get_one::<String>("schema_text").cloned(),
            json: m.get_flag("json"),
            ancestors: m.get_flag("ancestors"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            schema_path: p.schema_path,
            schema_text: p.schema_text,
            config: DumpConfig::new().json(p.json).ancestors(p.ancestors),
        }
    }
}
