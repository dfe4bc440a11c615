//! ABI gate between compiled grammar descriptors and [`Language`] handles.
//!
//! Loading reads the fixed header, checks the ABI tag against the accepted
//! range and only then validates the rest of the structure. A descriptor of
//! a foreign ABI is never interpreted past its header. Loading performs no
//! I/O, takes no locks and does not log.

use hyperql_core::descriptor::{Descriptor, Header, RawGrammar};

use crate::abi::AbiRange;
use crate::error::LoadError;
use crate::language::Language;

/// Validates descriptors against an ABI range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Loader {
    range: AbiRange,
}

impl Loader {
    pub const fn new(range: AbiRange) -> Self {
        Self { range }
    }

    pub const fn range(&self) -> AbiRange {
        self.range
    }

    /// Turn descriptor bytes into a language handle borrowing them.
    pub fn load<'a>(&self, bytes: &'a [u8]) -> Result<Language<'a>, LoadError> {
        let header = Header::read(bytes)?;

        let observed = header.abi_version;
        if !self.range.contains(observed) {
            return Err(LoadError::AbiMismatch {
                observed,
                expected_min: self.range.min(),
                expected_max: self.range.max(),
            });
        }

        let descriptor = Descriptor::with_header(bytes, header)?;
        Ok(Language::new(descriptor))
    }

    /// Load the descriptor behind a C-ABI reference.
    ///
    /// # Safety
    /// When non-null, `raw` must point to a valid [`RawGrammar`] whose bytes
    /// stay valid and unmodified for `'a`.
    pub unsafe fn load_raw<'a>(&self, raw: *const RawGrammar) -> Result<Language<'a>, LoadError> {
        // SAFETY: forwarded from the caller.
        let bytes = unsafe { RawGrammar::bytes(raw) }?;
        self.load(bytes)
    }
}

/// Load descriptor bytes with the runtime's ABI range.
pub fn load(bytes: &[u8]) -> Result<Language<'_>, LoadError> {
    Loader::default().load(bytes)
}

/// Load a C-ABI descriptor reference with the runtime's ABI range.
///
/// # Safety
/// See [`Loader::load_raw`].
pub unsafe fn load_raw<'a>(raw: *const RawGrammar) -> Result<Language<'a>, LoadError> {
    // SAFETY: forwarded from the caller.
    unsafe { Loader::default().load_raw(raw) }
}
