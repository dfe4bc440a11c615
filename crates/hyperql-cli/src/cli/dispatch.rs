//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::info::InfoArgs;

pub struct CheckParams {
    pub path: PathBuf,
    pub symbol: Option<String>,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: m
                .get_one::<PathBuf>("path")
                .cloned()
                .expect("clap enforces a required path"),
            symbol: m.get_one::<String>("symbol").cloned(),
            min: m.get_one::<u32>("min").copied(),
            max: m.get_one::<u32>("max").copied(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            path: p.path,
            symbol: p.symbol,
            min: p.min,
            max: p.max,
        }
    }
}

pub struct InfoParams {
    pub path: Option<PathBuf>,
    pub symbol: Option<String>,
    pub lang: Option<String>,
    pub json: bool,
}

impl InfoParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            path: m.get_one::<PathBuf>("path").cloned(),
            symbol: m.get_one::<String>("symbol").cloned(),
            lang: m.get_one::<String>("lang").cloned(),
            json: m.get_flag("json"),
        }
    }
}

impl From<InfoParams> for InfoArgs {
    fn from(p: InfoParams) -> Self {
        Self {
            path: p.path,
            symbol: p.symbol,
            lang: p.lang,
            json: p.json,
        }
    }
}

pub struct CompileParams {
    pub node_types: PathBuf,
    pub name: String,
    pub abi: Option<u32>,
    pub output: PathBuf,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            node_types: m
                .get_one::<PathBuf>("node_types")
                .cloned()
                .expect("clap enforces a required node-types path"),
            name: m
                .get_one::<String>("name")
                .cloned()
                .expect("clap enforces a required name"),
            abi: m.get_one::<u32>("abi").copied(),
            output: m
                .get_one::<PathBuf>("output")
                .cloned()
                .expect("clap enforces a required output"),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            node_types: p.node_types,
            name: p.name,
            abi: p.abi,
            output: p.output,
        }
    }
}

pub struct LangsParams;

impl LangsParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

/// Number of `-v` flags, given before or after the subcommand.
pub fn verbosity(m: &ArgMatches) -> u8 {
    let sub = m
        .subcommand()
        .map_or(0, |(_, sub)| sub.get_count("verbose"));
    m.get_count("verbose").max(sub)
}
