//! Line segments between geometry points.

use core::ops::Neg;

use crate::topology::orientation::{Orientation, Sign};
use crate::topology::point::PointId;

/// Anything that can be chained into an edge loop.
///
/// `tail`/`head` are the *effective* endpoints, i.e. already account for any
/// reversal the implementor carries. `reversed` must swap them.
pub trait Segment: Clone {
    fn tail(&self) -> PointId;
    fn head(&self) -> PointId;
    fn reversed(&self) -> Self;
}

/// A stored `(tail, head)` pair plus the sign it is traversed with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LineSegment {
    points: [PointId; 2],
    sign: Sign,
}

impl LineSegment {
    /// A forward segment from `tail` to `head`.
    pub fn new(tail: impl Into<PointId>, head: impl Into<PointId>) -> Self {
        Self {
            points: [tail.into(), head.into()],
            sign: Sign::Forward,
        }
    }

    /// A segment with an explicit sign.
    pub fn with_sign(tail: impl Into<PointId>, head: impl Into<PointId>, sign: Sign) -> Self {
        Self {
            points: [tail.into(), head.into()],
            sign,
        }
    }

    /// Endpoints in stored order, ignoring the sign.
    #[inline]
    pub fn stored(&self) -> [PointId; 2] {
        self.points
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Endpoints as an unordered pair, smaller id first.
    pub fn undirected(&self) -> (PointId, PointId) {
        let [a, b] = self.points;
        if a <= b { (a, b) } else { (b, a) }
    }
}

impl Segment for LineSegment {
    #[inline]
    fn tail(&self) -> PointId {
        match self.sign {
            Sign::Forward => self.points[0],
            Sign::Reversed => self.points[1],
        }
    }

    #[inline]
    fn head(&self) -> PointId {
        match self.sign {
            Sign::Forward => self.points[1],
            Sign::Reversed => self.points[0],
        }
    }

    #[inline]
    fn reversed(&self) -> Self {
        Self {
            points: self.points,
            sign: Sign::compose(self.sign, Sign::Reversed),
        }
    }
}

impl Neg for LineSegment {
    type Output = LineSegment;
    fn neg(self) -> LineSegment {
        self.reversed()
    }
}

impl From<(u64, u64)> for LineSegment {
    fn from((tail, head): (u64, u64)) -> Self {
        LineSegment::new(tail, head)
    }
}
