use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use hwtypes_core::{Type, get_modifier, get_unmodified, is_adt_type, is_modified};

use super::schema::{Declared, Schema, SchemaError};
use super::schema_loader::load_schema_text;

/// Configuration for dump output.
#[derive(Clone, Debug, Default)]
pub struct DumpConfig {
    /// Emit a JSON array instead of text blocks
    pub(crate) json: bool,
    /// List every ancestor instead of the direct bases only
    pub(crate) ancestors: bool,
}

impl DumpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, value: bool) -> Self {
        self.json = value;
        self
    }

    pub fn ancestors(mut self, value: bool) -> Self {
        self.ancestors = value;
        self
    }
}

pub struct DumpArgs {
    pub schema_path: Option<PathBuf>,
    pub schema_text: Option<String>,
    pub config: DumpConfig,
}

pub fn run(args: DumpArgs) {
    match dump(&args) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn dump(args: &DumpArgs) -> Result<String, SchemaError> {
    let text = load_schema_text(args.schema_path.as_deref(), args.schema_text.as_deref())?;
    let declared = Declared::declare(&Schema::parse(&text)?)?;
    render(&declared, &args.config)
}

/// What `dump` reports for one declaration.
#[derive(Debug, Serialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub kind: &'static str,
    pub adt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub bases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmodified: Option<String>,
}

impl TypeInfo {
    pub fn new(name: &str, ty: &Type, config: &DumpConfig) -> Self {
        let names = |types: &[Type]| -> Vec<String> {
            types.iter().map(|t| t.name().to_owned()).collect()
        };
        let (modifier, unmodified) = if is_modified(ty) {
            (
                get_modifier(ty).ok().map(|m| m.name().to_owned()),
                get_unmodified(ty).ok().map(|u| u.name().to_owned()),
            )
        } else {
            (None, None)
        };
        Self {
            name: name.to_owned(),
            type_name: ty.name().to_owned(),
            kind: ty.kind().name(),
            adt: is_adt_type(ty),
            param: ty.param().map(ToString::to_string),
            bases: names(ty.bases()),
            ancestors: config.ancestors.then(|| names(&ty.ancestors()[1..])),
            modifier,
            unmodified,
        }
    }
}

pub fn render(declared: &Declared, config: &DumpConfig) -> Result<String, SchemaError> {
    let infos: Vec<_> = declared
        .iter()
        .map(|(name, ty)| TypeInfo::new(name, ty, config))
        .collect();

    if config.json {
        let mut out = serde_json::to_string_pretty(&infos)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for info in &infos {
        render_text(&mut out, info);
    }
    Ok(out)
}

fn render_text(out: &mut String, info: &TypeInfo) {
    let adt = if info.adt { ", adt" } else { "" };
    writeln!(out, "{} ({}{adt})", info.name, info.kind).unwrap();
    if info.type_name != info.name {
        writeln!(out, "  type: {}", info.type_name).unwrap();
    }
    if let Some(param) = &info.param {
        writeln!(out, "  param: {param}").unwrap();
    }
    writeln!(out, "  bases: {}", info.bases.join(", ")).unwrap();
    if let Some(ancestors) = &info.ancestors {
        writeln!(out, "  ancestors: {}", ancestors.join(", ")).unwrap();
    }
    if let (Some(modifier), Some(unmodified)) = (&info.modifier, &info.unmodified) {
        writeln!(out, "  modifier: {modifier} of {unmodified}").unwrap();
    }
}
