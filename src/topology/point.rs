//! `PointId`: a strong, zero-cost handle for geometry points
//!
//! Boundary segments refer to the points they join by identifier, never by
//! value. `PointId` wraps the raw `u64` so identifiers cannot be confused
//! with array positions (mesh point indices are plain `usize`).
//!
//! Unlike mesh entity handles, geometry identifiers are allowed to be 0:
//! geometry builders commonly number their points from zero.

use std::fmt;

/// Identifier of a geometry point referenced by line segments.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct PointId(u64);

impl PointId {
    /// Creates a new `PointId` from a raw `u64` value.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use gmsh_tidy::topology::point::PointId;
    /// let p = PointId::new(1);
    /// assert_eq!(p.get(), 1);
    /// ```
    #[inline]
    pub const fn new(raw: u64) -> Self {
        PointId(raw)
    }

    /// Returns the inner `u64` value of this `PointId`.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PointId {
    #[inline]
    fn from(raw: u64) -> Self {
        PointId(raw)
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

/// Custom `Debug` implementation to display as `PointId(raw_value)`.
impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PointId").field(&self.get()).finish()
    }
}

/// Prints the numeric ID without any wrapper text.
impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
