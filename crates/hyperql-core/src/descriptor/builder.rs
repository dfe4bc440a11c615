//! Descriptor emission.
//!
//! This is the grammar-compiler side of the format: it turns node kinds and
//! field names into the binary layout that loaders validate. Used for the
//! built-in grammars, for `hyperql compile`, and for test fixtures.

use indexmap::{IndexMap, IndexSet};

use super::header::Header;
use super::sections::{FieldId, NodeKindEntry, NodeKindId, StringId, node_flags};
use super::{DEFAULT_ABI_VERSION, END_NODE_KIND, HEADER_SIZE, SECTION_ALIGN};
use crate::node_types::parse_node_types;

/// Error during descriptor emission.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("too many node kinds: {0} (max 65535)")]
    TooManyNodeKinds(usize),
    #[error("too many fields: {0} (max 65535)")]
    TooManyFields(usize),
    #[error("too many strings: {0} (max 65535)")]
    TooManyStrings(usize),
    #[error("descriptor too large: {0} bytes")]
    TooLarge(usize),
    #[error("unknown node kind: {0}")]
    UnknownNodeKind(NodeKindId),
    #[error("invalid node-types.json: {0}")]
    NodeTypes(#[from] serde_json::Error),
}

/// Builds a grammar descriptor.
///
/// Node kind 0 is always the anonymous `"end"` sentinel. Node kinds are keyed
/// by `(name, named)`, fields by name; re-adding either returns the
/// existing ID.
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    abi_version: u32,
    name: StringId,
    strings: IndexSet<String>,
    node_kinds: IndexMap<(String, bool), NodeKindEntry>,
    fields: IndexMap<String, StringId>,
    root: Option<NodeKindId>,
}

impl DescriptorBuilder {
    pub fn new(name: &str) -> Self {
        let mut builder = Self {
            abi_version: DEFAULT_ABI_VERSION,
            name: StringId(0),
            strings: IndexSet::new(),
            node_kinds: IndexMap::new(),
            fields: IndexMap::new(),
            root: None,
        };
        builder.name = builder.intern(name);
        let end = builder.intern(END_NODE_KIND);
        builder.node_kinds.insert(
            (END_NODE_KIND.to_owned(), false),
            NodeKindEntry {
                name: end,
                flags: 0,
            },
        );
        builder
    }

    /// Build from the contents of a tree-sitter `node-types.json`.
    pub fn from_node_types(name: &str, json: &str) -> Result<Self, BuildError> {
        let raw_nodes = parse_node_types(json)?;
        let mut builder = Self::new(name);

        for raw in &raw_nodes {
            let id = builder.node_kind(&raw.type_name, raw.named)?;
            if raw.root {
                builder.root(id)?;
            }
            if raw.extra {
                builder.extra(id)?;
            }
            if raw.subtypes.is_some() {
                builder.supertype(id)?;
            }
            for field in raw.fields.keys() {
                builder.field(field)?;
            }
        }

        Ok(builder)
    }

    /// Override the ABI version written to the header.
    pub fn abi_version(&mut self, version: u32) -> &mut Self {
        self.abi_version = version;
        self
    }

    /// Get or create a node kind.
    pub fn node_kind(&mut self, name: &str, named: bool) -> Result<NodeKindId, BuildError> {
        if let Some(idx) = self.node_kinds.get_index_of(&(name.to_owned(), named)) {
            return Ok(idx as NodeKindId);
        }

        // 0xFFFF is reserved for "no root".
        let idx = self.node_kinds.len();
        if idx >= u16::MAX as usize {
            return Err(BuildError::TooManyNodeKinds(idx + 1));
        }

        let entry = NodeKindEntry {
            name: self.try_intern(name)?,
            flags: if named { node_flags::NAMED } else { 0 },
        };
        self.node_kinds.insert((name.to_owned(), named), entry);
        Ok(idx as NodeKindId)
    }

    /// Get or create a field.
    pub fn field(&mut self, name: &str) -> Result<FieldId, BuildError> {
        let idx = match self.fields.get_index_of(name) {
            Some(idx) => idx,
            None => {
                let idx = self.fields.len();
                if idx >= u16::MAX as usize {
                    return Err(BuildError::TooManyFields(idx + 1));
                }
                let id = self.try_intern(name)?;
                self.fields.insert(name.to_owned(), id);
                idx
            }
        };
        // Fields are 1-based.
        FieldId::new(idx as u16 + 1).ok_or(BuildError::TooManyFields(idx + 1))
    }

    pub fn root(&mut self, id: NodeKindId) -> Result<(), BuildError> {
        self.ensure_node_kind(id)?;
        self.root = Some(id);
        Ok(())
    }

    pub fn extra(&mut self, id: NodeKindId) -> Result<(), BuildError> {
        self.set_flag(id, node_flags::EXTRA)
    }

    pub fn supertype(&mut self, id: NodeKindId) -> Result<(), BuildError> {
        self.set_flag(id, node_flags::SUPERTYPE)
    }

    pub fn node_kind_count(&self) -> usize {
        self.node_kinds.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Emit the descriptor bytes.
    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        let (str_blob, str_table) = self.emit_strings();

        let mut node_kinds = Vec::with_capacity(self.node_kinds.len() * 4);
        for entry in self.node_kinds.values() {
            node_kinds.extend_from_slice(&entry.to_bytes());
        }

        let mut fields = Vec::with_capacity(self.fields.len() * 2);
        for id in self.fields.values() {
            fields.extend_from_slice(&id.0.to_le_bytes());
        }

        // Header → StringBlob → StringTable → NodeKinds → Fields
        let mut output = vec![0u8; HEADER_SIZE];
        emit_section(&mut output, &str_blob);
        emit_section(&mut output, &str_table);
        emit_section(&mut output, &node_kinds);
        emit_section(&mut output, &fields);
        pad_to_section(&mut output);

        let total_size =
            u32::try_from(output.len()).map_err(|_| BuildError::TooLarge(output.len()))?;

        let mut header = Header {
            abi_version: self.abi_version,
            total_size,
            str_blob_size: str_blob.len() as u32,
            str_table_count: self.strings.len() as u16,
            node_kinds_count: self.node_kinds.len() as u16,
            fields_count: self.fields.len() as u16,
            name: self.name.0,
            ..Default::default()
        };
        if let Some(root) = self.root {
            header.root = root;
        }
        header.checksum = crc32fast::hash(&output[HEADER_SIZE..]);
        output[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

        Ok(output)
    }

    fn intern(&mut self, s: &str) -> StringId {
        let (idx, _) = self.strings.insert_full(s.to_owned());
        StringId(idx as u16)
    }

    fn try_intern(&mut self, s: &str) -> Result<StringId, BuildError> {
        if self.strings.get_index_of(s).is_none() && self.strings.len() >= u16::MAX as usize {
            return Err(BuildError::TooManyStrings(self.strings.len() + 1));
        }
        Ok(self.intern(s))
    }

    fn ensure_node_kind(&self, id: NodeKindId) -> Result<(), BuildError> {
        if (id as usize) < self.node_kinds.len() {
            Ok(())
        } else {
            Err(BuildError::UnknownNodeKind(id))
        }
    }

    fn set_flag(&mut self, id: NodeKindId, flag: u16) -> Result<(), BuildError> {
        self.ensure_node_kind(id)?;
        self.node_kinds[id as usize].flags |= flag;
        Ok(())
    }

    /// Emit the string blob and offset table.
    ///
    /// The table has count+1 entries; the sentinel closes the last string.
    fn emit_strings(&self) -> (Vec<u8>, Vec<u8>) {
        let mut blob = Vec::new();
        let mut table = Vec::with_capacity((self.strings.len() + 1) * 4);

        for s in &self.strings {
            table.extend_from_slice(&(blob.len() as u32).to_le_bytes());
            blob.extend_from_slice(s.as_bytes());
        }
        table.extend_from_slice(&(blob.len() as u32).to_le_bytes());

        (blob, table)
    }
}

/// Pad a buffer to the section alignment boundary.
fn pad_to_section(buf: &mut Vec<u8>) {
    let rem = buf.len() % SECTION_ALIGN;
    if rem != 0 {
        let padding = SECTION_ALIGN - rem;
        buf.resize(buf.len() + padding, 0);
    }
}

fn emit_section(output: &mut Vec<u8>, data: &[u8]) {
    pad_to_section(output);
    output.extend_from_slice(data);
}
