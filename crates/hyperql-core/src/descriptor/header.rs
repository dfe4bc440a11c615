//! Descriptor header (64 bytes).
//!
//! Section order: Header → StringBlob → StringTable → NodeKinds → Fields.
//! Offsets are not stored; they follow from counts + SECTION_ALIGN.

use super::{DescriptorError, HEADER_SIZE, MAGIC, NO_ROOT, SECTION_ALIGN};

/// Descriptor header - first 64 bytes of every compiled grammar.
///
/// - 0-19: identity and sizes (magic, abi_version, checksum, total_size, str_blob_size)
/// - 20-31: counts, name, root, flags (6 × u16)
/// - 32-63: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Header {
    /// Magic bytes: b"HQLG"
    pub magic: [u8; 4],
    /// Binary layout version the grammar compiler targeted.
    pub abi_version: u32,
    /// CRC32 checksum of everything after the header
    pub checksum: u32,
    /// Total descriptor size in bytes
    pub total_size: u32,
    /// Size of the string blob in bytes.
    pub str_blob_size: u32,

    pub str_table_count: u16,
    pub node_kinds_count: u16,
    pub fields_count: u16,
    /// StringId of the language name.
    pub name: u16,
    /// Root node kind, or [`NO_ROOT`].
    pub root: u16,
    pub flags: u16,

    pub _reserved: [u8; 32],
}

const _: () = assert!(std::mem::size_of::<Header>() == HEADER_SIZE);

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            abi_version: 0,
            checksum: 0,
            total_size: 0,
            str_blob_size: 0,
            str_table_count: 0,
            node_kinds_count: 0,
            fields_count: 0,
            name: 0,
            root: NO_ROOT,
            flags: 0,
            _reserved: [0; 32],
        }
    }
}

/// Section offsets derived from header counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub str_blob: u32,
    pub str_table: u32,
    pub node_kinds: u32,
    pub fields: u32,
    /// One past the last byte of the fields section.
    pub end: u32,
}

impl Header {
    /// Read the fixed-position header of a descriptor.
    ///
    /// Only the length and the magic are checked; everything else is taken
    /// at face value until [`Descriptor::parse`](super::Descriptor::parse)
    /// validates it.
    pub fn read(bytes: &[u8]) -> Result<Self, DescriptorError> {
        if bytes.is_empty() {
            return Err(DescriptorError::Empty);
        }
        let Some(head) = bytes.first_chunk::<HEADER_SIZE>() else {
            return Err(DescriptorError::TooSmall(bytes.len()));
        };

        let header = Self::from_bytes(head);
        if !header.validate_magic() {
            return Err(DescriptorError::InvalidMagic);
        }
        Ok(header)
    }

    /// Decode header from 64 bytes.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut reserved = [0u8; 32];
        reserved.copy_from_slice(&bytes[32..64]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            abi_version: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            checksum: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            total_size: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            str_blob_size: u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]),
            str_table_count: u16::from_le_bytes([bytes[20], bytes[21]]),
            node_kinds_count: u16::from_le_bytes([bytes[22], bytes[23]]),
            fields_count: u16::from_le_bytes([bytes[24], bytes[25]]),
            name: u16::from_le_bytes([bytes[26], bytes[27]]),
            root: u16::from_le_bytes([bytes[28], bytes[29]]),
            flags: u16::from_le_bytes([bytes[30], bytes[31]]),
            _reserved: reserved,
        }
    }

    /// Encode header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.abi_version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.str_blob_size.to_le_bytes());
        bytes[20..22].copy_from_slice(&self.str_table_count.to_le_bytes());
        bytes[22..24].copy_from_slice(&self.node_kinds_count.to_le_bytes());
        bytes[24..26].copy_from_slice(&self.fields_count.to_le_bytes());
        bytes[26..28].copy_from_slice(&self.name.to_le_bytes());
        bytes[28..30].copy_from_slice(&self.root.to_le_bytes());
        bytes[30..32].copy_from_slice(&self.flags.to_le_bytes());
        bytes[32..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// Root node kind, if the grammar declares one.
    pub fn root(&self) -> Option<u16> {
        (self.root != NO_ROOT).then_some(self.root)
    }

    /// Compute section offsets from counts and blob size.
    ///
    /// Arithmetic is done in u64 so hostile counts cannot wrap around.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let align = SECTION_ALIGN as u64;

        let str_blob = align;
        let str_table = align_up(str_blob + self.str_blob_size as u64, align);
        let str_table_size = (self.str_table_count as u64 + 1) * 4;

        let node_kinds = align_up(str_table + str_table_size, align);
        let node_kinds_size = self.node_kinds_count as u64 * 4;

        let fields = align_up(node_kinds + node_kinds_size, align);
        let fields_size = self.fields_count as u64 * 2;

        SectionOffsets {
            str_blob: clamp(str_blob),
            str_table: clamp(str_table),
            node_kinds: clamp(node_kinds),
            fields: clamp(fields),
            end: clamp(fields + fields_size),
        }
    }
}

/// Round up to the next multiple of `align`.
fn align_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}

fn clamp(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
