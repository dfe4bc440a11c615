#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammar descriptor format for HyperQL language bindings.
//!
//! - [`descriptor`]: binary layout, validated view, builder and the C-ABI
//!   reference type
//! - [`node_types`]: tree-sitter `node-types.json` ingestion for the builder
//!
//! ABI compatibility is decided by the loader in `hyperql-langs`; nothing
//! here interprets the version tag.

pub mod descriptor;
pub mod node_types;


pub use descriptor::{
    BuildError, Descriptor, DescriptorBuilder, DescriptorError, FieldId, Header, NodeKindEntry,
    NodeKindId, RawGrammar, RawGrammarFn, StringId,
};
pub use node_types::{RawCardinality, RawNode, RawTypeRef, parse_node_types};
