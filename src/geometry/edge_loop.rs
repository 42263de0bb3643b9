//! Edge-loop orientation.
//!
//! Boundary loops are usually assembled from independently created,
//! arbitrarily directed segments. [`orient_lines`] chains such a set into one
//! consistent traversal: segment `i`'s head is segment `i + 1`'s tail,
//! wrapping around from the last segment to the first.
//!
//! The chaining is greedy and deterministic. The first segment is the
//! reference edge and keeps its direction. At each following position the
//! lowest-indexed unplaced segment whose tail continues the chain is taken; if
//! none exists the lowest-indexed one whose head continues it is taken after
//! reversing the *whole* unplaced pool, so later comparisons stay in the
//! chain's current direction.

use hashbrown::HashMap;

use crate::geometry::line::Segment;
use crate::mesh_error::{LoopDefect, MeshTidyError};
use crate::topology::orientation::Sign;
use crate::topology::point::PointId;

/// Reorder and reorient `lines` into a single closed traversal.
///
/// The result is a permutation of the input in which some segments may be
/// replaced by their [`Segment::reversed`] form. Feeding the result back in
/// returns it unchanged.
///
/// # Errors
/// [`MeshTidyError::MalformedLoop`] if the segments do not form exactly one
/// simple cycle: no segments, a point of degree other than two, or a chain
/// that cannot be continued (several disjoint cycles).
pub fn orient_lines<L: Segment>(lines: &[L]) -> Result<Vec<L>, MeshTidyError> {
    validate_loop_degrees(lines)?;

    let n = lines.len();
    // Working buffer indexed by position: effective endpoints, source index
    // into `lines`, and the reversal applied so far.
    let mut pool: Vec<[PointId; 2]> = lines.iter().map(|l| [l.tail(), l.head()]).collect();
    let mut order: Vec<usize> = (0..n).collect();
    let mut signs = vec![Sign::Forward; n];

    for j in 1..n {
        let out = pool[j - 1][1];
        let k = match pool[j..].iter().position(|p| p[0] == out) {
            Some(offset) => j + offset,
            None => {
                let offset = pool[j..]
                    .iter()
                    .position(|p| p[1] == out)
                    .ok_or(LoopDefect::Unchained {
                        position: j,
                        point: out,
                    })?;
                log::trace!("edge loop reverses direction at position {j} (point {out})");
                for (pair, sign) in pool[j..].iter_mut().zip(signs[j..].iter_mut()) {
                    pair.swap(0, 1);
                    *sign = -*sign;
                }
                j + offset
            }
        };
        pool.swap(j, k);
        order.swap(j, k);
        signs.swap(j, k);
    }

    // Every point has degree two and all segments were chained, so the
    // traversal is a single cycle and closes on its own.
    debug_assert_eq!(pool[0][0], pool[n - 1][1]);

    Ok(order
        .into_iter()
        .zip(signs)
        .map(|(idx, sign)| match sign {
            Sign::Forward => lines[idx].clone(),
            Sign::Reversed => lines[idx].reversed(),
        })
        .collect())
}

/// Check that every endpoint is shared by exactly two segments.
///
/// Points are examined in order of first appearance, so the reported point is
/// deterministic.
pub fn validate_loop_degrees<L: Segment>(lines: &[L]) -> Result<(), MeshTidyError> {
    if lines.is_empty() {
        return Err(LoopDefect::Empty.into());
    }
    let mut degree: HashMap<PointId, usize> = HashMap::with_capacity(lines.len());
    let mut seen = Vec::with_capacity(lines.len());
    for line in lines {
        for p in [line.tail(), line.head()] {
            let d = degree.entry(p).or_insert(0);
            if *d == 0 {
                seen.push(p);
            }
            *d += 1;
        }
    }
    for point in seen {
        let d = degree[&point];
        if d != 2 {
            return Err(LoopDefect::Degree { point, degree: d }.into());
        }
    }
    Ok(())
}

/// `true` if every segment's head is the next segment's tail, cyclically.
pub fn is_closed_loop<L: Segment>(lines: &[L]) -> bool {
    !lines.is_empty()
        && lines
            .iter()
            .zip(lines.iter().cycle().skip(1))
            .all(|(a, b)| a.head() == b.tail())
}
