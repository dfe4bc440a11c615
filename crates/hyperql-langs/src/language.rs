use std::fmt;

use hyperql_core::descriptor::{Descriptor, FieldId, NodeKindId};

/// A grammar that passed the ABI gate.
///
/// Handles only come out of a [`Loader`](crate::Loader). They borrow the
/// descriptor bytes, are cheap to copy and can be shared across threads.
/// Lookups mirror tree-sitter's `Language` API, with `Option` in place of
/// sentinel values.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Language<'a> {
    descriptor: Descriptor<'a>,
}

impl<'a> Language<'a> {
    pub(crate) fn new(descriptor: Descriptor<'a>) -> Self {
        Self { descriptor }
    }

    pub fn name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn abi_version(&self) -> u32 {
        self.descriptor.abi_version()
    }

    pub fn node_kind_count(&self) -> usize {
        self.descriptor.node_kind_count() as usize
    }

    pub fn field_count(&self) -> usize {
        self.descriptor.field_count() as usize
    }

    pub fn node_kind_for_id(&self, id: NodeKindId) -> Option<&'a str> {
        self.descriptor.node_kind_name(id)
    }

    /// Resolve a node kind by name.
    ///
    /// Unlike tree-sitter, a miss is `None` rather than 0, so the anonymous
    /// `"end"` sentinel stays distinguishable from an unknown kind.
    pub fn id_for_node_kind(&self, kind: &str, named: bool) -> Option<NodeKindId> {
        let descriptor = self.descriptor;
        descriptor
            .node_kinds()
            .find(|(_, entry)| {
                entry.is_named() == named && descriptor.string(entry.name) == Some(kind)
            })
            .map(|(id, _)| id)
    }

    pub fn node_kind_is_named(&self, id: NodeKindId) -> bool {
        self.descriptor.node_kind(id).is_some_and(|e| e.is_named())
    }

    pub fn node_kind_is_extra(&self, id: NodeKindId) -> bool {
        self.descriptor.node_kind(id).is_some_and(|e| e.is_extra())
    }

    pub fn node_kind_is_supertype(&self, id: NodeKindId) -> bool {
        self.descriptor
            .node_kind(id)
            .is_some_and(|e| e.is_supertype())
    }

    pub fn field_name_for_id(&self, id: FieldId) -> Option<&'a str> {
        self.descriptor.field_name(id)
    }

    pub fn field_id_for_name(&self, name: &str) -> Option<FieldId> {
        self.descriptor
            .fields()
            .find(|&(_, field)| field == name)
            .map(|(id, _)| id)
    }

    /// Node kind of the tree root, if the grammar declares one.
    pub fn root(&self) -> Option<NodeKindId> {
        self.descriptor.root()
    }

    /// Names of all named node kinds, in ID order.
    pub fn named_node_kinds(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let descriptor = self.descriptor;
        (0..descriptor.node_kind_count())
            .filter(move |&id| descriptor.node_kind(id).is_some_and(|e| e.is_named()))
            .filter_map(move |id| descriptor.node_kind_name(id))
    }

    /// Names of all fields, in ID order.
    pub fn field_names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let descriptor = self.descriptor;
        (1..=descriptor.field_count())
            .filter_map(FieldId::new)
            .filter_map(move |id| descriptor.field_name(id))
    }

    /// The validated descriptor behind this handle.
    pub fn descriptor(&self) -> Descriptor<'a> {
        self.descriptor
    }
}

impl fmt::Debug for Language<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name())
            .field("abi_version", &self.abi_version())
            .finish_non_exhaustive()
    }
}
