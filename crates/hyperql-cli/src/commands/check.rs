use std::path::PathBuf;

use hyperql_langs::{AbiRange, Loader, MAX_SUPPORTED_ABI, MIN_SUPPORTED_ABI};

use super::CliError;
use super::grammar_source::GrammarSource;

pub struct CheckArgs {
    pub path: PathBuf,
    pub symbol: Option<String>,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

pub fn run(args: CheckArgs) {
    match check(&args) {
        Ok(report) => println!("{report}"),
        Err(e) => super::fail(e),
    }
}

/// Load the grammar and describe the outcome.
pub fn check(args: &CheckArgs) -> Result<String, CliError> {
    let range = range(args.min, args.max)?;
    let source = GrammarSource::open(&args.path, args.symbol.as_deref())?;
    let lang = source.language_with(&Loader::new(range))?;

    tracing::debug!(name = lang.name(), abi = lang.abi_version(), %range, "grammar accepted");
    Ok(format!(
        "{}: ABI {} is compatible (supported {range})",
        lang.name(),
        lang.abi_version()
    ))
}

fn range(min: Option<u32>, max: Option<u32>) -> Result<AbiRange, CliError> {
    let min = min.unwrap_or(MIN_SUPPORTED_ABI);
    let max = max.unwrap_or(MAX_SUPPORTED_ABI);
    AbiRange::new(min, max).ok_or(CliError::InvalidRange { min, max })
}
