//! C-ABI descriptor reference exported by compiled grammar modules.

use super::DescriptorError;

/// What a native grammar module hands out from `tree_sitter_<name>()`.
///
/// The module owns `data`; it must stay mapped and unmodified for as long
/// as any slice obtained through [`RawGrammar::bytes`] is alive.
#[derive(Debug)]
#[repr(C)]
pub struct RawGrammar {
    pub data: *const u8,
    pub len: usize,
}

// SAFETY: a RawGrammar only points at immutable descriptor bytes.
unsafe impl Send for RawGrammar {}
unsafe impl Sync for RawGrammar {}

/// Signature of the `tree_sitter_<name>` symbol.
pub type RawGrammarFn = unsafe extern "C" fn() -> *const RawGrammar;

impl RawGrammar {
    /// Describe a byte slice. The slice must outlive every use of the result.
    pub const fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.as_ptr(),
            len: bytes.len(),
        }
    }

    /// Borrow the descriptor bytes behind a raw pointer.
    ///
    /// Null pointers (to the struct or to its data) are reported as
    /// [`DescriptorError::Null`], a zero length as [`DescriptorError::Empty`].
    ///
    /// # Safety
    /// When non-null, `raw` must point to a valid `RawGrammar` whose `data`
    /// is readable for `len` bytes and stays valid and unmodified for `'a`.
    pub unsafe fn bytes<'a>(raw: *const RawGrammar) -> Result<&'a [u8], DescriptorError> {
        // SAFETY: the caller guarantees `raw` is either null or valid.
        let Some(raw) = (unsafe { raw.as_ref() }) else {
            return Err(DescriptorError::Null);
        };
        if raw.data.is_null() {
            return Err(DescriptorError::Null);
        }
        if raw.len == 0 {
            return Err(DescriptorError::Empty);
        }
        // SAFETY: non-null, and the caller guarantees `len` readable bytes for `'a`.
        Ok(unsafe { std::slice::from_raw_parts(raw.data, raw.len) })
    }
}
