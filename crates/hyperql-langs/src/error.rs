use hyperql_core::DescriptorError;

/// Why a grammar descriptor could not become a [`Language`](crate::Language).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Null, empty or structurally unreadable descriptor.
    #[error("invalid grammar descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),

    /// Readable descriptor built for an ABI outside the supported range.
    #[error(
        "incompatible grammar ABI version {observed} (supported: {expected_min}..={expected_max})"
    )]
    AbiMismatch {
        observed: u32,
        expected_min: u32,
        expected_max: u32,
    },
}
