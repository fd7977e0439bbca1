use crate::math::intersect::intersection_point;
use crate::math::{Point2, TOLERANCE};
use crate::model::{ReferenceLine, Side, Wall, WallEnd};

use super::JoinInfo;

/// Maximum corner-segment length, as a multiple of the thicker wall.
/// Beyond it the miter degenerates into a spike and is clamped to a bevel.
const MITER_LIMIT_FACTOR: f64 = 2.5;

/// Corner cut polygon for an L join between `wall` and `other`, given the
/// already-detected join point on the reference lines.
///
/// Which face pairs are intersected depends on both reference modes:
/// - Core/Core: the exterior-face and interior-face intersections;
/// - matching finish modes: the join point itself (it lies on the shared
///   reference face) paired with the opposite-face intersection;
/// - mixed modes: the join point paired with the intersection of the two
///   unused faces.
///
/// Near-parallel faces yield an empty polygon; the caller renders the
/// blunt end instead.
#[must_use]
pub fn corner_polygon(wall: &Wall, other: &Wall, join_point: &Point2) -> Vec<Point2> {
    use ReferenceLine as R;

    let pair = match (wall.reference_line, other.reference_line) {
        (R::Core, R::Core) => {
            let ext = face_intersection(wall, other, Side::Exterior, Side::Exterior);
            let int = face_intersection(wall, other, Side::Interior, Side::Interior);
            match (ext, int) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            }
        }
        (R::FinishExterior, R::FinishExterior) => {
            face_intersection(wall, other, Side::Interior, Side::Interior)
                .map(|p| (*join_point, p))
        }
        (R::FinishInterior, R::FinishInterior) => {
            face_intersection(wall, other, Side::Exterior, Side::Exterior)
                .map(|p| (*join_point, p))
        }
        (ma, mb) => face_intersection(wall, other, unused_face(ma), unused_face(mb))
            .map(|p| (*join_point, p)),
    };

    let Some((p, q)) = pair else {
        return Vec::new();
    };
    let (p, q) = orient_exterior_first(wall, p, q);
    clamp_miter(p, q, wall.thickness().max(other.thickness()))
}

/// T corner: cuts `wall`'s end at the two points where its exterior and
/// interior faces cross the abutted face line of `other`. The host wall's
/// geometry is untouched.
#[must_use]
pub fn t_corner(wall: &Wall, other: &Wall, face: &(Point2, Point2)) -> Vec<Point2> {
    let df = face.1 - face.0;
    let cut = |side| {
        wall.face_line(side)
            .and_then(|(a0, a1)| intersection_point(&a0, &(a1 - a0), &face.0, &df))
    };
    match (cut(Side::Exterior), cut(Side::Interior)) {
        (Some(p), Some(q)) => clamp_miter(p, q, wall.thickness().max(other.thickness())),
        _ => Vec::new(),
    }
}

/// The render polygon for a wall: its blunt body rectangle with the end
/// pairs replaced by join corner cuts where available.
#[must_use]
pub fn wall_contour(wall: &Wall, joins: &[JoinInfo]) -> Vec<Point2> {
    let Some([se, ee, ei, si]) = wall.corner_points() else {
        return Vec::new();
    };
    let mut start_pair = (se, si);
    let mut end_pair = (ee, ei);

    for join in joins {
        if join.corner.len() != 2 {
            continue;
        }
        match join.end {
            Some(WallEnd::Start) => start_pair = (join.corner[0], join.corner[1]),
            Some(WallEnd::End) => end_pair = (join.corner[0], join.corner[1]),
            None => {}
        }
    }

    vec![start_pair.0, end_pair.0, end_pair.1, start_pair.1]
}

/// The face not used as the reference for this join. A Core wall's
/// reference is its centerline; its exterior face stands in as the unused
/// line for mixed pairs.
fn unused_face(mode: ReferenceLine) -> Side {
    match mode {
        ReferenceLine::FinishExterior => Side::Interior,
        ReferenceLine::FinishInterior | ReferenceLine::Core => Side::Exterior,
    }
}

fn face_intersection(wall: &Wall, other: &Wall, side_a: Side, side_b: Side) -> Option<Point2> {
    let (a0, a1) = wall.face_line(side_a)?;
    let (b0, b1) = other.face_line(side_b)?;
    intersection_point(&a0, &(a1 - a0), &b0, &(b1 - b0))
}

/// Orders a corner pair so the point on `wall`'s exterior side comes
/// first.
fn orient_exterior_first(wall: &Wall, p: Point2, q: Point2) -> (Point2, Point2) {
    let Some(perp) = wall.perpendicular() else {
        return (p, q);
    };
    let sp = (p - wall.start).dot(&perp);
    let sq = (q - wall.start).dot(&perp);
    if sp >= sq {
        (p, q)
    } else {
        (q, p)
    }
}

/// Clamps the corner segment to the miter limit, keeping its midpoint
/// fixed: the bevel fallback for near-parallel or acute pairs.
fn clamp_miter(p: Point2, q: Point2, max_thickness: f64) -> Vec<Point2> {
    let limit = MITER_LIMIT_FACTOR * max_thickness;
    let d = q - p;
    let len = d.norm();
    if len <= limit || len < TOLERANCE {
        return vec![p, q];
    }
    let mid = Point2::new((p.x + q.x) * 0.5, (p.y + q.y) * 0.5);
    let dir = d / len;
    let half = limit * 0.5;
    vec![mid - dir * half, mid + dir * half]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::join::{FindJoins, JoinKind};
    use crate::model::WallId;
    use slotmap::SlotMap;

    fn corner_pair(angle_deg: f64, t_a: f64, t_b: f64) -> (Wall, Wall) {
        let joint = Point2::new(2000.0, 0.0);
        let a = Wall::new(Point2::new(0.0, 0.0), joint, t_a);
        let rad = angle_deg.to_radians();
        let b_end = Point2::new(joint.x + 2000.0 * rad.cos(), joint.y + 2000.0 * rad.sin());
        let b = Wall::new(joint, b_end, t_b);
        (a, b)
    }

    #[test]
    fn core_miter_non_degenerate_across_angles() {
        // Strictly between 10° and 170° the Core/Core corner is always two
        // points, never longer than the miter limit.
        for angle in [15.0, 45.0, 90.0, 135.0, 165.0] {
            let (a, b) = corner_pair(angle, 200.0, 150.0);
            let corner = corner_polygon(&a, &b, &Point2::new(2000.0, 0.0));
            assert_eq!(corner.len(), 2, "angle {angle}");
            let len = (corner[1] - corner[0]).norm();
            assert!(
                len <= 2.5 * 200.0 + 1e-6,
                "angle {angle}: corner length {len}"
            );
        }
    }

    #[test]
    fn acute_corner_clamps_to_bevel() {
        // At 165° between the directions the path nearly doubles back and
        // the raw miter runs far past the limit.
        let (a, b) = corner_pair(165.0, 200.0, 200.0);
        let corner = corner_polygon(&a, &b, &Point2::new(2000.0, 0.0));
        assert_eq!(corner.len(), 2);
        let len = (corner[1] - corner[0]).norm();
        assert!((len - 500.0).abs() < 1e-6, "clamped length, got {len}");
    }

    #[test]
    fn clamp_keeps_midpoint() {
        let p = Point2::new(0.0, 0.0);
        let q = Point2::new(2000.0, 0.0);
        let clamped = clamp_miter(p, q, 200.0);
        assert_eq!(clamped.len(), 2);
        let mid = Point2::new(
            (clamped[0].x + clamped[1].x) * 0.5,
            (clamped[0].y + clamped[1].y) * 0.5,
        );
        assert!((mid - Point2::new(1000.0, 0.0)).norm() < 1e-9);
        assert!(((clamped[1] - clamped[0]).norm() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn parallel_faces_fall_back_to_empty() {
        // Collinear continuation: every face pair is parallel.
        let a = Wall::new(Point2::new(0.0, 0.0), Point2::new(2000.0, 0.0), 200.0);
        let b = Wall::new(Point2::new(2000.0, 0.0), Point2::new(4000.0, 0.0), 200.0);
        let corner = corner_polygon(&a, &b, &Point2::new(2000.0, 0.0));
        assert!(corner.is_empty());
    }

    #[test]
    fn degenerate_wall_contour_is_empty() {
        let w = Wall::new(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0), 200.0);
        assert!(wall_contour(&w, &[]).is_empty());
    }

    #[test]
    fn contour_without_joins_is_blunt_rectangle() {
        let w = Wall::new(Point2::new(0.0, 0.0), Point2::new(1000.0, 0.0), 200.0);
        let contour = wall_contour(&w, &[]);
        assert_eq!(contour.len(), 4);
        assert!((contour[0] - Point2::new(0.0, 100.0)).norm() < 1e-9);
        assert!((contour[1] - Point2::new(1000.0, 100.0)).norm() < 1e-9);
        assert!((contour[2] - Point2::new(1000.0, -100.0)).norm() < 1e-9);
        assert!((contour[3] - Point2::new(0.0, -100.0)).norm() < 1e-9);
    }

    #[test]
    fn contour_replaces_joined_end() {
        let mut walls: SlotMap<WallId, Wall> = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        walls.insert(Wall::new(
            Point2::new(4000.0, 0.0),
            Point2::new(4000.0, 3000.0),
            200.0,
        ));
        let joins = FindJoins::new(a).execute(&walls);
        assert_eq!(joins[0].kind, JoinKind::L);

        let contour = wall_contour(&walls[a], &joins);
        assert_eq!(contour.len(), 4);
        // Start stays blunt; the end pair is the mitered cut.
        assert!((contour[0] - Point2::new(0.0, 100.0)).norm() < 1e-6);
        assert!((contour[1] - Point2::new(3900.0, 100.0)).norm() < 1e-6);
        assert!((contour[2] - Point2::new(4100.0, -100.0)).norm() < 1e-6);
        assert!((contour[3] - Point2::new(0.0, -100.0)).norm() < 1e-6);
    }
}
