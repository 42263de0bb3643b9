//! Axis-angle rotations for placing geometry before meshing.

use crate::mesh_error::MeshTidyError;

/// Matches `numpy.isclose(x, 1.0)`: `atol + rtol * 1.0`.
const UNIT_TOLERANCE: f64 = 1e-8 + 1e-5;

/// Rotation matrix about the unit axis `u` by the angle `theta` (radians).
///
/// Uses Rodrigues' formula `R = I cos θ + sin θ [u]ₓ + (1 − cos θ) u uᵀ`,
/// where `[u]ₓ` is the cross-product matrix of `u`.
pub fn rotation_matrix(u: [f64; 3], theta: f64) -> Result<[[f64; 3]; 3], MeshTidyError> {
    let norm_sq = u.iter().map(|c| c * c).sum::<f64>();
    if (norm_sq - 1.0).abs() > UNIT_TOLERANCE {
        return Err(MeshTidyError::NonUnitAxis { norm_sq });
    }

    let cpm = [
        [0.0, -u[2], u[1]],
        [u[2], 0.0, -u[0]],
        [-u[1], u[0], 0.0],
    ];
    let (s, c) = theta.sin_cos();

    let mut r = [[0.0; 3]; 3];
    for (i, (row, cross)) in r.iter_mut().zip(&cpm).enumerate() {
        for (j, (entry, &k)) in row.iter_mut().zip(cross).enumerate() {
            let identity = if i == j { c } else { 0.0 };
            *entry = identity + s * k + (1.0 - c) * u[i] * u[j];
        }
    }
    Ok(r)
}

/// Apply `r` to a 3D point.
pub fn rotate(r: &[[f64; 3]; 3], p: [f64; 3]) -> [f64; 3] {
    let mut out = [0.0; 3];
    for (o, row) in out.iter_mut().zip(r) {
        *o = row[0] * p[0] + row[1] * p[1] + row[2] * p[2];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn close(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-12)
    }

    #[test]
    fn quarter_turn_about_z() {
        let r = rotation_matrix([0.0, 0.0, 1.0], FRAC_PI_2).unwrap();
        assert!(close(rotate(&r, [1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]));
        assert!(close(rotate(&r, [0.0, 0.0, 2.0]), [0.0, 0.0, 2.0]));
    }

    #[test]
    fn zero_angle_is_identity() {
        let s = 1.0 / 3f64.sqrt();
        let r = rotation_matrix([s, s, s], 0.0).unwrap();
        assert!(close(rotate(&r, [1.0, -2.0, 3.0]), [1.0, -2.0, 3.0]));
    }

    #[test]
    fn quarter_turn_about_x_entries() {
        let r = rotation_matrix([1.0, 0.0, 0.0], FRAC_PI_2).unwrap();
        assert!(close(r[0], [1.0, 0.0, 0.0]));
        assert!(close(r[1], [0.0, 0.0, -1.0]));
        assert!(close(r[2], [0.0, 1.0, 0.0]));
        assert!(close(rotate(&r, [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn rejects_non_unit_axis() {
        let err = rotation_matrix([0.0, 0.0, 2.0], 1.0).unwrap_err();
        assert_eq!(err, MeshTidyError::NonUnitAxis { norm_sq: 4.0 });
    }
}
