//! Descriptor section primitives.

use std::num::NonZeroU16;

/// Node kind ID (index into the NodeKinds section).
pub type NodeKindId = u16;

/// Field ID. Field `n` is stored at index `n - 1` of the Fields section.
pub type FieldId = NonZeroU16;

/// Index into the String Table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct StringId(pub u16);

impl StringId {
    #[inline]
    pub fn get(self) -> u16 {
        self.0
    }
}

/// Node kind flags (bit field).
pub mod node_flags {
    /// Named node (appears in the grammar as a rule, not a literal token).
    pub const NAMED: u16 = 0x0001;
    /// Extra node that may appear anywhere (comments, whitespace).
    pub const EXTRA: u16 = 0x0002;
    /// Supertype grouping other node kinds.
    pub const SUPERTYPE: u16 = 0x0004;
}

/// NodeKinds section entry (4 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct NodeKindEntry {
    pub name: StringId,
    pub flags: u16,
}

impl NodeKindEntry {
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            name: StringId(u16::from_le_bytes([bytes[0], bytes[1]])),
            flags: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        let name = self.name.0.to_le_bytes();
        let flags = self.flags.to_le_bytes();
        [name[0], name[1], flags[0], flags[1]]
    }

    pub fn is_named(self) -> bool {
        self.flags & node_flags::NAMED != 0
    }

    pub fn is_extra(self) -> bool {
        self.flags & node_flags::EXTRA != 0
    }

    pub fn is_supertype(self) -> bool {
        self.flags & node_flags::SUPERTYPE != 0
    }
}
