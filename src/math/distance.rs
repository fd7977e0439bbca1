use super::{Point2, TOLERANCE};

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjection {
    /// Distance from the query point to the closest point on the segment.
    pub distance: f64,
    /// Clamped parameter in `[0, 1]` along the segment.
    pub t: f64,
    /// The closest point on the segment.
    pub point: Point2,
}

/// Minimum distance from `p` to the segment `a → b`, with the clamped
/// parameter and foot point.
///
/// Degenerates to point-to-point distance when `a ≈ b`.
#[must_use]
pub fn point_to_segment(p: &Point2, a: &Point2, b: &Point2) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < TOLERANCE * TOLERANCE {
        let distance = ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
        return SegmentProjection {
            distance,
            t: 0.0,
            point: *a,
        };
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let point = Point2::new(a.x + t * dx, a.y + t * dy);
    let distance = ((p.x - point.x).powi(2) + (p.y - point.y).powi(2)).sqrt();
    SegmentProjection { distance, t, point }
}

/// Minimum distance from `p` to the infinite line through `a` and `b`.
///
/// Degenerates to point-to-point distance when `a ≈ b`.
#[must_use]
pub fn point_to_line(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < TOLERANCE {
        return ((p.x - a.x).powi(2) + (p.y - a.y).powi(2)).sqrt();
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / len
}
