use std::path::PathBuf;

use super::schema::{Declared, Schema, SchemaError};
use super::schema_loader::load_schema_text;

pub struct CheckArgs {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
}

pub fn run(args: CheckArgs) {
    if let Err(e) = check(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

fn check(args: &CheckArgs) -> Result<(), SchemaError> {
    let text = load_schema_text(args.schema_path.as_deref(), args.schema_text.as_deref())?;
    let schema = Schema::parse(&text)?;
    Declared::declare(&schema)?;
    Ok(())
}
