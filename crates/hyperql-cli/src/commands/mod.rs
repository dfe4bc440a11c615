use std::path::PathBuf;

use hyperql_core::BuildError;
use hyperql_langs::LoadError;
use hyperql_langs::dynamic::DynamicError;

pub mod abi;
pub mod check;
pub mod compile;
pub mod grammar_source;
pub mod info;
pub mod lang_resolver;
pub mod langs;

#[cfg(test)]
mod compile_tests;

/// Everything a command can fail with.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Dynamic(#[from] DynamicError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("invalid ABI range: min {min} is greater than max {max}")]
    InvalidRange { min: u32, max: u32 },
    #[error("a grammar path or -l <LANG> is required")]
    MissingGrammar,
    #[error("unknown language: '{0}'")]
    UnknownLanguage(String),
    #[error("cannot derive a grammar name from {}; pass --symbol", .0.display())]
    NoGrammarName(PathBuf),
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print `error: <message>` and exit with status 1.
pub fn fail(err: CliError) -> ! {
    tracing::debug!(error = ?err, "command failed");
    eprintln!("error: {err}");
    if let CliError::UnknownLanguage(name) = &err {
        if let Some(suggestion) = lang_resolver::suggest_language(name) {
            eprintln!();
            eprintln!("Did you mean '{suggestion}'?");
        }
        eprintln!();
        eprintln!("Run 'hyperql langs' for the full list.");
    }
    std::process::exit(1);
}
