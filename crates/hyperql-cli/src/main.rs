mod cli;
mod commands;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{CheckParams, CompileParams, InfoParams, LangsParams, build_cli, verbosity};

fn main() {
    let matches = build_cli().get_matches();
    init_logging(verbosity(&matches));

    match matches.subcommand() {
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("info", m)) => {
            let params = InfoParams::from_matches(m);
            commands::info::run(params.into());
        }
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("langs", m)) => {
            let _params = LangsParams::from_matches(m);
            commands::langs::run();
        }
        Some(("abi", _)) => commands::abi::run(),
        _ => unreachable!("clap should have caught this"),
    }
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose > 0 {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
