//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Descriptor file or grammar library (positional).
pub fn grammar_path_arg() -> Arg {
    Arg::new("path")
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help("Descriptor file (.hqlg) or grammar shared library")
}

/// Exported grammar name (--symbol).
pub fn symbol_arg() -> Arg {
    Arg::new("symbol")
        .long("symbol")
        .value_name("NAME")
        .help("Grammar name exported as tree_sitter_<NAME> (default: from file name)")
}

/// Lowest accepted ABI version (--min).
pub fn min_abi_arg() -> Arg {
    Arg::new("min")
        .long("min")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Lowest accepted ABI version (default: runtime minimum)")
}

/// Highest accepted ABI version (--max).
pub fn max_abi_arg() -> Arg {
    Arg::new("max")
        .long("max")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Highest accepted ABI version (default: runtime maximum)")
}

/// Built-in language (-l/--lang).
pub fn lang_arg() -> Arg {
    Arg::new("lang")
        .short('l')
        .long("lang")
        .value_name("LANG")
        .help("Built-in language name or alias")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output JSON")
}

/// tree-sitter node-types.json (positional).
pub fn node_types_arg() -> Arg {
    Arg::new("node_types")
        .value_name("NODE_TYPES_JSON")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("tree-sitter node-types.json")
}

/// Language name recorded in the descriptor (--name).
pub fn name_arg() -> Arg {
    Arg::new("name")
        .long("name")
        .value_name("NAME")
        .required(true)
        .help("Language name recorded in the descriptor")
}

/// ABI version to emit (--abi).
pub fn abi_arg() -> Arg {
    Arg::new("abi")
        .long("abi")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("ABI version to emit (default: 14)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Write the descriptor to FILE")
}

/// Verbosity (-v), available on every subcommand.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log debug events to stderr (RUST_LOG overrides)")
}
