use std::path::{Path, PathBuf};

use hyperql_langs::dynamic::{self, GrammarFile, GrammarLibrary};
use hyperql_langs::{Language, LoadError, Loader};

use super::CliError;

/// A grammar opened from the command line.
pub enum GrammarSource {
    File(GrammarFile),
    Library(GrammarLibrary),
}

impl GrammarSource {
    /// Open a descriptor file or shared library.
    ///
    /// A bare name that is not an existing file (`hyperql`) is looked up in
    /// the grammar search paths.
    pub fn open(path: &Path, symbol: Option<&str>) -> Result<Self, CliError> {
        let path = resolve_path(path)?;

        if !dynamic::is_library_path(&path) {
            return Ok(Self::File(GrammarFile::open(&path)?));
        }

        let name = match symbol {
            Some(symbol) => symbol.to_owned(),
            None => dynamic::grammar_name_from_path(&path)
                .ok_or_else(|| CliError::NoGrammarName(path.clone()))?,
        };
        // SAFETY: the user asked for this library to be loaded; its export
        // is trusted to follow the grammar module convention.
        let library = unsafe { GrammarLibrary::open(&path, &name) }?;
        Ok(Self::Library(library))
    }

    pub fn language_with(&self, loader: &Loader) -> Result<Language<'_>, LoadError> {
        match self {
            Self::File(file) => file.language_with(loader),
            Self::Library(library) => library.language_with(loader),
        }
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf, CliError> {
    if path.exists() {
        return Ok(path.to_owned());
    }
    let is_bare_name = path.components().count() == 1 && path.extension().is_none();
    match path.to_str() {
        Some(name) if is_bare_name => Ok(dynamic::find_grammar(name)?),
        _ => Err(CliError::Io {
            path: path.to_owned(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }),
    }
}
