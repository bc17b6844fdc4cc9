mod cli;
mod commands;

use tracing_subscriber::EnvFilter;

use cli::{CheckParams, DumpParams, build_cli};

fn main() {
    // HWTYPES_LOG takes an EnvFilter directive, e.g. `hwtypes_core=debug`.
    if let Ok(filter) = EnvFilter::try_from_env("HWTYPES_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
        tracing::debug!("tracing initialized");
    }

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
