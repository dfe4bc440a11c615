//! Command builders for the CLI.

use clap::{ArgGroup, Command};

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("hyperql")
        .about("Check, inspect and compile HyperQL grammar descriptors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(check_command())
        .subcommand(info_command())
        .subcommand(compile_command())
        .subcommand(langs_command())
        .subcommand(abi_command())
}

/// Check a compiled grammar against the supported ABI range.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check that a compiled grammar loads")
        .override_usage(
            "\
  hyperql check <PATH>
  hyperql check <PATH> --symbol <NAME>
  hyperql check <PATH> --min <N> --max <N>",
        )
        .after_help(
            r#"EXAMPLES:
  hyperql check hyperql.hqlg                     # descriptor file
  hyperql check libtree-sitter-hyperql.so        # shared library
  hyperql check grammar.so --symbol hyperql      # explicit export name
  hyperql check hyperql.hqlg --min 14 --max 14   # narrower range"#,
        )
        .arg(grammar_path_arg().required(true))
        .arg(symbol_arg())
        .arg(min_abi_arg())
        .arg(max_abi_arg())
}

/// Describe a compiled or built-in grammar.
pub fn info_command() -> Command {
    Command::new("info")
        .about("Show what a grammar declares")
        .override_usage(
            "\
  hyperql info <PATH> [--json]
  hyperql info -l <LANG> [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  hyperql info hyperql.hqlg        # descriptor file
  hyperql info -l hql              # built-in grammar
  hyperql info -l hyperql --json   # machine-readable"#,
        )
        .arg(grammar_path_arg())
        .arg(symbol_arg())
        .arg(lang_arg())
        .arg(json_arg())
        .group(
            ArgGroup::new("grammar")
                .args(["path", "lang"])
                .required(true),
        )
}

/// Compile node-types.json into a descriptor.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a tree-sitter node-types.json into a grammar descriptor")
        .override_usage("  hyperql compile <NODE_TYPES_JSON> --name <NAME> [--abi <N>] -o <FILE>")
        .after_help(
            r#"EXAMPLES:
  hyperql compile src/node-types.json --name hyperql -o hyperql.hqlg
  hyperql compile node-types.json --name hyperql --abi 15 -o hyperql.hqlg"#,
        )
        .arg(node_types_arg())
        .arg(name_arg())
        .arg(abi_arg())
        .arg(output_file_arg())
}

/// List built-in languages.
pub fn langs_command() -> Command {
    Command::new("langs").about("List built-in languages")
}

/// Print the supported ABI range.
pub fn abi_command() -> Command {
    Command::new("abi").about("Print the supported grammar ABI range")
}
