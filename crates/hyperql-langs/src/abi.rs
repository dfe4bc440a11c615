//! Supported grammar ABI versions.

use std::fmt;

/// Oldest descriptor ABI this runtime can read.
pub const MIN_SUPPORTED_ABI: u32 = 13;

/// Newest descriptor ABI this runtime can read.
pub const MAX_SUPPORTED_ABI: u32 = 15;

/// Inclusive range of accepted ABI versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AbiRange {
    min: u32,
    max: u32,
}

impl AbiRange {
    /// The range compiled into this runtime.
    pub const RUNTIME: Self = Self {
        min: MIN_SUPPORTED_ABI,
        max: MAX_SUPPORTED_ABI,
    };

    /// Returns `None` when `min > max`.
    pub const fn new(min: u32, max: u32) -> Option<Self> {
        if min > max {
            return None;
        }
        Some(Self { min, max })
    }

    pub const fn min(self) -> u32 {
        self.min
    }

    pub const fn max(self) -> u32 {
        self.max
    }

    pub const fn contains(self, version: u32) -> bool {
        self.min <= version && version <= self.max
    }
}

impl Default for AbiRange {
    fn default() -> Self {
        Self::RUNTIME
    }
}

impl fmt::Display for AbiRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
