//! Dynamic grammar loading (runtime).
//!
//! Grammars that are not built in come from:
//! - descriptor files (`<name>.hqlg`) written by `hyperql compile`
//! - shared libraries exporting `tree_sitter_<name>()`
//!
//! Both keep the descriptor bytes alive; the [`Language`] they hand out
//! borrows them, so a handle cannot outlive its source.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use hyperql_core::descriptor::{RawGrammar, RawGrammarFn};
use libloading::Library;
use tracing::debug;

use crate::error::LoadError;
use crate::language::Language;
use crate::loader::Loader;

/// Environment variable listing extra grammar directories.
pub const GRAMMAR_PATH_ENV: &str = "HYPERQL_GRAMMAR_PATH";

/// File extension of compiled descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = "hqlg";

#[derive(Debug, thiserror::Error)]
pub enum DynamicError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot open grammar library: {0}")]
    Library(#[from] libloading::Error),
    #[error("grammar library does not export `{0}`")]
    MissingSymbol(String),
    #[error("grammar `{0}` not found in any search path")]
    NotFound(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Descriptor bytes read from disk or handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFile {
    path: Option<PathBuf>,
    bytes: Vec<u8>,
}

impl GrammarFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DynamicError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading grammar descriptor");
        let bytes = std::fs::read(path).map_err(|source| DynamicError::Io {
            path: path.to_owned(),
            source,
        })?;
        debug!(path = %path.display(), size = bytes.len(), "grammar descriptor read");
        Ok(Self {
            path: Some(path.to_owned()),
            bytes,
        })
    }

    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { path: None, bytes }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn language(&self) -> Result<Language<'_>, LoadError> {
        self.language_with(&Loader::default())
    }

    pub fn language_with(&self, loader: &Loader) -> Result<Language<'_>, LoadError> {
        loader.load(&self.bytes)
    }
}

/// A shared library exporting a compiled grammar.
///
/// The library stays loaded for as long as this value lives.
#[derive(Debug)]
pub struct GrammarLibrary {
    path: PathBuf,
    symbol: String,
    entry: RawGrammarFn,
    // Declared last: dropped after everything that may point into it.
    _library: Library,
}

impl GrammarLibrary {
    /// Load `path` and resolve `tree_sitter_<name>`.
    ///
    /// # Safety
    /// Loading a library runs its initialisers. The exported symbol must
    /// have the [`RawGrammarFn`] signature and return either null or a
    /// descriptor reference that stays valid while the library is loaded.
    pub unsafe fn open(path: impl AsRef<Path>, name: &str) -> Result<Self, DynamicError> {
        let path = path.as_ref();
        let symbol = format!("tree_sitter_{name}");
        debug!(path = %path.display(), %symbol, "opening grammar library");

        // SAFETY: forwarded from the caller.
        let library = unsafe { Library::new(path) }?;
        // SAFETY: the caller guarantees the symbol's signature.
        let entry: RawGrammarFn = unsafe {
            *library
                .get::<RawGrammarFn>(symbol.as_bytes())
                .map_err(|_| DynamicError::MissingSymbol(symbol.clone()))?
        };

        debug!(path = %path.display(), %symbol, "grammar library loaded");
        Ok(Self::from_parts(path.to_owned(), library, symbol, entry))
    }

    /// Pair an already-loaded library with its resolved entry point.
    ///
    /// `entry` must stay callable while `library` is loaded.
    pub(crate) fn from_parts(
        path: PathBuf,
        library: Library,
        symbol: String,
        entry: RawGrammarFn,
    ) -> Self {
        Self {
            path,
            symbol,
            entry,
            _library: library,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn language(&self) -> Result<Language<'_>, LoadError> {
        self.language_with(&Loader::default())
    }

    pub fn language_with(&self, loader: &Loader) -> Result<Language<'_>, LoadError> {
        // SAFETY: `open` established the signature and that the returned
        // reference lives as long as the library, which `self` keeps loaded.
        unsafe {
            let raw: *const RawGrammar = (self.entry)();
            loader.load_raw(raw)
        }
    }
}

/// Directories searched by [`find_grammar`], in order.
///
/// `HYPERQL_GRAMMAR_PATH` entries come first, then `grammars/` next to the
/// executable and `../share/hyperql/grammars` for installed layouts.
pub fn search_paths() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(paths) = env::var_os(GRAMMAR_PATH_ENV) {
        dirs.extend(env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
    }

    if let Ok(exe_path) = env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        dirs.push(exe_dir.join("grammars"));
        dirs.push(exe_dir.join("..").join("share").join("hyperql").join("grammars"));
    }

    dirs
}

/// Candidate file names for grammar `name`, preferred first.
pub fn grammar_file_names(name: &str) -> [String; 2] {
    [
        format!("{name}.{DESCRIPTOR_EXTENSION}"),
        library_file_name(name),
    ]
}

/// Platform file name of a grammar library, e.g. `libtree-sitter-hyperql.so`.
pub fn library_file_name(name: &str) -> String {
    format!(
        "{}tree-sitter-{name}{}",
        env::consts::DLL_PREFIX,
        env::consts::DLL_SUFFIX
    )
}

/// Locate grammar `name` in [`search_paths`].
pub fn find_grammar(name: &str) -> Result<PathBuf, DynamicError> {
    find_grammar_in(name, &search_paths())
}

/// Locate grammar `name` in the given directories.
pub fn find_grammar_in(name: &str, dirs: &[PathBuf]) -> Result<PathBuf, DynamicError> {
    let candidates = grammar_file_names(name);
    for dir in dirs {
        for file_name in &candidates {
            let path = dir.join(file_name);
            if path.is_file() {
                debug!(path = %path.display(), "found grammar");
                return Ok(path);
            }
        }
    }
    Err(DynamicError::NotFound(name.to_owned()))
}

/// Whether `path` looks like a shared library rather than a descriptor file.
pub fn is_library_path(path: &Path) -> bool {
    path.extension() == Some(OsStr::new(env::consts::DLL_EXTENSION))
}

/// Grammar name implied by a file name.
///
/// Strips the library prefix, a `tree-sitter-` prefix and the extension:
/// `libtree-sitter-hyperql.so` and `hyperql.hqlg` both name `hyperql`.
/// Dashes become underscores to match C symbol names.
pub fn grammar_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let stem = if is_library_path(path) {
        stem.strip_prefix(env::consts::DLL_PREFIX).unwrap_or(stem)
    } else {
        stem
    };
    let stem = stem.strip_prefix("tree-sitter-").unwrap_or(stem);
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace('-', "_"))
}
