//! Orientation of 1D entities.
//!
//! A line segment is either traversed in its stored direction or against it.
//! [`Sign`] models that as the two-element group C₂ so reversals can be
//! accumulated with [`Orientation::compose`] instead of tracked by hand.

use core::fmt::{Debug, Formatter};
use core::ops::Neg;

/// A finite group capturing per-entity orientations.
/// Implementations **must** satisfy for all `a`, `b`, `c`:
///   - associativity: `compose(a, compose(b, c)) == compose(compose(a, b), c)`
///   - identity:      `compose(id, a) == a == compose(a, id)` where `id = Default::default()`
///   - inverse:       `compose(a, inverse(a)) == id == compose(inverse(a), a)`
pub trait Orientation: Copy + Default + Debug + 'static {
    fn compose(a: Self, b: Self) -> Self;
    fn inverse(a: Self) -> Self;
}

/// Traversal sign of a segment: `Forward` (+1) follows the stored
/// `(tail, head)` order, `Reversed` (−1) runs from head to tail.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Sign {
    #[default]
    Forward,
    Reversed,
}

impl Sign {
    /// `+1` or `-1`.
    #[inline]
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Forward => 1,
            Sign::Reversed => -1,
        }
    }

    #[inline]
    pub fn is_reversed(self) -> bool {
        self == Sign::Reversed
    }

    /// The opposite sign.
    #[inline]
    pub fn flipped(self) -> Self {
        Sign::compose(self, Sign::Reversed)
    }
}

impl Debug for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Sign").field(&self.as_i8()).finish()
    }
}

impl Orientation for Sign {
    #[inline]
    fn compose(a: Self, b: Self) -> Self {
        if a == b { Sign::Forward } else { Sign::Reversed }
    }
    #[inline]
    fn inverse(a: Self) -> Self {
        a
    }
}

impl Neg for Sign {
    type Output = Sign;
    #[inline]
    fn neg(self) -> Sign {
        self.flipped()
    }
}
