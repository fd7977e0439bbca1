use super::{Point2, Vector2, TOLERANCE};
use crate::math::distance::point_to_line;

/// Angle between two directions, in `[0, π]`.
///
/// Computed via clamped dot product; returns `0.0` for any near-zero input
/// rather than NaN.
#[must_use]
pub fn angle_between(d1: &Vector2, d2: &Vector2) -> f64 {
    let n1 = d1.norm();
    let n2 = d2.norm();
    if n1 < TOLERANCE || n2 < TOLERANCE {
        return 0.0;
    }
    let cos = (d1.dot(d2) / (n1 * n2)).clamp(-1.0, 1.0);
    cos.acos()
}

/// Tests whether two directions are parallel (either sense), comparing the
/// cross magnitude of the normalized vectors against `eps`.
///
/// Zero-length inputs are never parallel to anything.
#[must_use]
pub fn are_parallel(d1: &Vector2, d2: &Vector2, eps: f64) -> bool {
    let n1 = d1.norm();
    let n2 = d2.norm();
    if n1 < TOLERANCE || n2 < TOLERANCE {
        return false;
    }
    let cross = (d1.x * d2.y - d1.y * d2.x) / (n1 * n2);
    cross.abs() < eps
}

/// Tests whether segments `a0 → a1` and `b0 → b1` lie on one supporting
/// line: parallel directions (`dir_eps` on the normalized cross) and a
/// perpendicular offset below `dist_tol`.
#[must_use]
pub fn are_collinear(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    dir_eps: f64,
    dist_tol: f64,
) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    if !are_parallel(&da, &db, dir_eps) {
        return false;
    }
    point_to_line(b0, a0, a1) < dist_tol
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::DIRECTION_EPS;
    use std::f64::consts::PI;

    #[test]
    fn right_angle() {
        let a = angle_between(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 3.0));
        assert!((a - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn opposite_directions() {
        let a = angle_between(&Vector2::new(1.0, 0.0), &Vector2::new(-2.0, 0.0));
        assert!((a - PI).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_yields_zero_angle() {
        let a = angle_between(&Vector2::new(0.0, 0.0), &Vector2::new(1.0, 0.0));
        assert!(a.abs() < 1e-12);
        assert!(a.is_finite());
    }

    #[test]
    fn parallel_same_and_opposite_sense() {
        let d = Vector2::new(3.0, 1.0);
        assert!(are_parallel(&d, &Vector2::new(6.0, 2.0), DIRECTION_EPS));
        assert!(are_parallel(&d, &Vector2::new(-3.0, -1.0), DIRECTION_EPS));
        assert!(!are_parallel(&d, &Vector2::new(1.0, 3.0), DIRECTION_EPS));
    }

    #[test]
    fn zero_vector_never_parallel() {
        assert!(!are_parallel(
            &Vector2::new(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            DIRECTION_EPS
        ));
    }

    #[test]
    fn collinear_offset_segments() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(10.0, 0.0);
        // Same supporting line, disjoint extent.
        assert!(are_collinear(
            &a0,
            &a1,
            &Point2::new(20.0, 0.0),
            &Point2::new(30.0, 0.0),
            DIRECTION_EPS,
            1.0
        ));
        // Parallel but offset beyond the distance tolerance.
        assert!(!are_collinear(
            &a0,
            &a1,
            &Point2::new(0.0, 5.0),
            &Point2::new(10.0, 5.0),
            DIRECTION_EPS,
            1.0
        ));
    }
}
