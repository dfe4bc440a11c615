#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! ABI-checked grammar loading for HyperQL.
//!
//! A compiled grammar descriptor becomes a [`Language`] only after its ABI
//! version falls inside the runtime's supported range
//! ([`MIN_SUPPORTED_ABI`]..=[`MAX_SUPPORTED_ABI`]) and its structure checks
//! out. Everything else is a [`LoadError`].
//!
//! ```
//! let lang = hyperql_langs::hyperql();
//! assert_eq!(lang.name(), "hyperql");
//! assert!(hyperql_langs::AbiRange::RUNTIME.contains(lang.abi_version()));
//! ```

pub mod abi;
pub mod builtin;
pub mod dynamic;
mod error;
mod language;
mod loader;

#[cfg(test)]
mod builtin_tests;

pub use abi::{AbiRange, MAX_SUPPORTED_ABI, MIN_SUPPORTED_ABI};
pub use builtin::*;
pub use error::LoadError;
pub use language::Language;
pub use loader::{Loader, load, load_raw};

pub use hyperql_core::descriptor::{DescriptorError, RawGrammar};
