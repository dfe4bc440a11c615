//! Structural descriptor errors.

/// Why a byte buffer is not a readable grammar descriptor.
///
/// These never say anything about ABI compatibility; that decision belongs
/// to the loader, which only sees a descriptor once its header is readable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("descriptor reference is null")]
    Null,
    #[error("descriptor is empty")]
    Empty,
    #[error("descriptor too small: {0} bytes (minimum 64)")]
    TooSmall(usize),
    #[error("invalid magic: expected HQLG")]
    InvalidMagic,
    #[error("header does not match the descriptor bytes")]
    HeaderMismatch,
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("{section} section ends at byte {end}, past the descriptor end ({len})")]
    SectionOutOfBounds {
        section: &'static str,
        end: usize,
        len: usize,
    },
    #[error("string table entry {0} points outside the string blob")]
    InvalidStringTable(usize),
    #[error("string {0} is not valid UTF-8")]
    InvalidUtf8(usize),
    #[error("{section} refers to string {id}, but the table has {count}")]
    StringOutOfRange {
        section: &'static str,
        id: u16,
        count: u16,
    },
    #[error("root node kind {root} out of range ({count} node kinds)")]
    RootOutOfRange { root: u16, count: u16 },
}
