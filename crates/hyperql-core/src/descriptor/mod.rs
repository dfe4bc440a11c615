//! Compiled grammar descriptors.
//!
//! A descriptor is the binary artifact a grammar compiler emits for one
//! language: a 64-byte header followed by 64-byte aligned sections.

mod builder;
mod constants;
mod error;
mod header;
mod raw;
mod sections;
mod view;

#[cfg(test)]
mod view_tests;

pub use builder::{BuildError, DescriptorBuilder};
pub use constants::{
    DEFAULT_ABI_VERSION, END_NODE_KIND, HEADER_SIZE, MAGIC, NO_ROOT, SECTION_ALIGN,
};
pub use error::DescriptorError;
pub use header::{Header, SectionOffsets};
pub use raw::{RawGrammar, RawGrammarFn};
pub use sections::{FieldId, NodeKindEntry, NodeKindId, StringId, node_flags};
pub use view::Descriptor;
