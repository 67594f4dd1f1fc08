use bitflags::bitflags;

bitflags! {
    /// Category bits attached to each field.
    ///
    /// Text conversion of a class only includes fields whose flags intersect
    /// the requested mask; binary serialization ignores flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FieldFlags: u32 {
        /// Authored configuration.
        const CONFIG = 1 << 0;
        /// Runtime state.
        const STATE = 1 << 1;
        /// Derived or cached data, left out of text dumps by default.
        const TRANSIENT = 1 << 2;
    }
}

impl FieldFlags {
    /// Mask used when none is given.
    pub const DEFAULT_TEXT: Self = Self::CONFIG.union(Self::STATE);
}

impl Default for FieldFlags {
    /// Fields are runtime state unless marked otherwise.
    #[inline]
    fn default() -> Self {
        Self::STATE
    }
}
