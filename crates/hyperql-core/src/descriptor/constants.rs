//! Descriptor format constants.

/// Magic bytes identifying a compiled HyperQL grammar descriptor.
pub const MAGIC: [u8; 4] = *b"HQLG";

/// Header size in bytes. The header is always the first section.
pub const HEADER_SIZE: usize = 64;

/// Section alignment in bytes.
pub const SECTION_ALIGN: usize = 64;

/// ABI version emitted by [`DescriptorBuilder`](super::DescriptorBuilder)
/// unless overridden.
pub const DEFAULT_ABI_VERSION: u32 = 14;

/// Header value of `root` when the grammar declares no root node.
pub const NO_ROOT: u16 = u16::MAX;

/// Name of node kind 0, the end-of-input sentinel.
pub const END_NODE_KIND: &str = "end";
