//! Bounds-checked view over a compiled grammar descriptor.
//!
//! [`Descriptor::parse`] validates the whole structure once; afterwards every
//! accessor stays inside the declared sections without further checks.

use std::fmt;

use super::header::{Header, SectionOffsets};
use super::sections::{FieldId, NodeKindEntry, NodeKindId, StringId};
use super::{DescriptorError, HEADER_SIZE};

/// Read a little-endian u16 from bytes at the given offset.
#[inline]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Read a little-endian u32 from bytes at the given offset.
#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// A structurally valid grammar descriptor borrowed from its owner.
///
/// The view never copies descriptor contents; it is as cheap to pass around
/// as the slice it wraps. Equality compares the underlying bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Descriptor<'a> {
    bytes: &'a [u8],
    header: Header,
    offsets: SectionOffsets,
}

impl<'a> Descriptor<'a> {
    /// Read the header and validate the full structure.
    ///
    /// The ABI version is not inspected.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, DescriptorError> {
        let header = Header::read(bytes)?;
        Self::with_header(bytes, header)
    }

    /// Validate the structure behind an already-read header.
    ///
    /// `header` must be the one stored in `bytes`; anything else is a
    /// [`DescriptorError::HeaderMismatch`].
    pub fn with_header(bytes: &'a [u8], header: Header) -> Result<Self, DescriptorError> {
        if Header::read(bytes)? != header {
            return Err(DescriptorError::HeaderMismatch);
        }
        if header.total_size as usize != bytes.len() {
            return Err(DescriptorError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }

        let offsets = header.compute_offsets();
        check_section("string blob", offsets.str_blob, header.str_blob_size as u64, bytes)?;
        check_section(
            "string table",
            offsets.str_table,
            (header.str_table_count as u64 + 1) * 4,
            bytes,
        )?;
        check_section(
            "node kinds",
            offsets.node_kinds,
            header.node_kinds_count as u64 * 4,
            bytes,
        )?;
        check_section("fields", offsets.fields, header.fields_count as u64 * 2, bytes)?;

        let actual = crc32fast::hash(&bytes[HEADER_SIZE..]);
        if actual != header.checksum {
            return Err(DescriptorError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }

        let descriptor = Self {
            bytes,
            header,
            offsets,
        };
        descriptor.validate_strings()?;
        descriptor.validate_references()?;
        Ok(descriptor)
    }

    fn validate_strings(&self) -> Result<(), DescriptorError> {
        let blob_size = self.header.str_blob_size as usize;
        let count = self.header.str_table_count as usize;
        let table = self.offsets.str_table as usize;
        let blob = &self.bytes[self.offsets.str_blob as usize..][..blob_size];

        let mut prev = 0usize;
        for idx in 0..=count {
            let offset = read_u32_le(self.bytes, table + idx * 4) as usize;
            if offset < prev || offset > blob_size {
                return Err(DescriptorError::InvalidStringTable(idx));
            }
            if idx > 0 && std::str::from_utf8(&blob[prev..offset]).is_err() {
                return Err(DescriptorError::InvalidUtf8(idx - 1));
            }
            prev = offset;
        }
        Ok(())
    }

    fn validate_references(&self) -> Result<(), DescriptorError> {
        let count = self.header.str_table_count;
        let check = |section: &'static str, id: StringId| {
            if id.0 < count {
                Ok(())
            } else {
                Err(DescriptorError::StringOutOfRange {
                    section,
                    id: id.0,
                    count,
                })
            }
        };

        check("header name", StringId(self.header.name))?;
        for id in 0..self.header.node_kinds_count {
            check("node kinds", self.node_kind_entry(id).name)?;
        }
        for idx in 0..self.header.fields_count as usize {
            check("fields", self.field_entry(idx))?;
        }

        if let Some(root) = self.header.root()
            && root >= self.header.node_kinds_count
        {
            return Err(DescriptorError::RootOutOfRange {
                root,
                count: self.header.node_kinds_count,
            });
        }
        Ok(())
    }

    /// Get the parsed header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get the computed section offsets.
    pub fn offsets(&self) -> &SectionOffsets {
        &self.offsets
    }

    /// Get the raw bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn abi_version(&self) -> u32 {
        self.header.abi_version
    }

    /// Language name recorded by the grammar compiler.
    pub fn name(&self) -> &'a str {
        self.string(StringId(self.header.name)).unwrap_or_default()
    }

    /// Look up a string by its ID.
    pub fn string(&self, id: StringId) -> Option<&'a str> {
        if id.0 >= self.header.str_table_count {
            return None;
        }
        let table = self.offsets.str_table as usize;
        let start = read_u32_le(self.bytes, table + id.0 as usize * 4) as usize;
        let end = read_u32_le(self.bytes, table + (id.0 as usize + 1) * 4) as usize;
        let blob = self.offsets.str_blob as usize;
        std::str::from_utf8(&self.bytes[blob + start..blob + end]).ok()
    }

    pub fn node_kind_count(&self) -> u16 {
        self.header.node_kinds_count
    }

    pub fn field_count(&self) -> u16 {
        self.header.fields_count
    }

    pub fn root(&self) -> Option<NodeKindId> {
        self.header.root()
    }

    /// Get a node kind entry by ID.
    pub fn node_kind(&self, id: NodeKindId) -> Option<NodeKindEntry> {
        (id < self.header.node_kinds_count).then(|| self.node_kind_entry(id))
    }

    pub fn node_kind_name(&self, id: NodeKindId) -> Option<&'a str> {
        self.node_kind(id).and_then(|entry| self.string(entry.name))
    }

    /// Iterate over `(id, entry)` pairs in ID order.
    pub fn node_kinds(&self) -> impl Iterator<Item = (NodeKindId, NodeKindEntry)> + '_ {
        (0..self.header.node_kinds_count).map(|id| (id, self.node_kind_entry(id)))
    }

    pub fn field_name(&self, id: FieldId) -> Option<&'a str> {
        let idx = id.get() as usize - 1;
        if idx >= self.header.fields_count as usize {
            return None;
        }
        self.string(self.field_entry(idx))
    }

    /// Iterate over `(id, name)` pairs in ID order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &'a str)> + '_ {
        (1..=self.header.fields_count)
            .filter_map(FieldId::new)
            .filter_map(|id| self.field_name(id).map(|name| (id, name)))
    }

    fn node_kind_entry(&self, id: NodeKindId) -> NodeKindEntry {
        let offset = self.offsets.node_kinds as usize + id as usize * 4;
        let bytes = [
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
            self.bytes[offset + 3],
        ];
        NodeKindEntry::from_bytes(bytes)
    }

    fn field_entry(&self, idx: usize) -> StringId {
        StringId(read_u16_le(self.bytes, self.offsets.fields as usize + idx * 2))
    }
}

impl fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name())
            .field("abi_version", &self.header.abi_version)
            .field("node_kinds", &self.header.node_kinds_count)
            .field("fields", &self.header.fields_count)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn check_section(
    section: &'static str,
    start: u32,
    size: u64,
    bytes: &[u8],
) -> Result<(), DescriptorError> {
    let end = start as u64 + size;
    if end > bytes.len() as u64 {
        return Err(DescriptorError::SectionOutOfBounds {
            section,
            end: usize::try_from(end).unwrap_or(usize::MAX),
            len: bytes.len(),
        });
    }
    Ok(())
}
