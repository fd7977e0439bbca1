pub mod corner;
pub mod snap;

use slotmap::SlotMap;

use crate::math::angle::{angle_between, are_parallel};
use crate::math::distance::point_to_segment;
use crate::math::intersect::{intersection_point, line_line_intersect, point_at};
use crate::math::{Point2, DIRECTION_EPS};
use crate::model::{Side, Wall, WallEnd, WallId};

/// Default endpoint tolerance for join detection (mm). Tolerates small
/// gaps left by imprecise coordinate entry.
pub const JOIN_TOLERANCE: f64 = 50.0;

/// Fraction of a segment's parametric extent that both intersection
/// parameters must clear for an X classification.
const X_INTERIOR_MARGIN: f64 = 0.1;

/// Relationship classes between two walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Two wall ends meeting at a corner.
    L,
    /// One wall's end abutting the other's span.
    T,
    /// Both walls crossing through each other's interior spans.
    X,
    /// Walls butted or overlapping on one supporting line.
    Collinear,
}

/// A computed relationship between two walls.
///
/// Recomputed on every draw/edit cycle; never stored across document
/// mutations and never mutated once built.
#[derive(Debug, Clone)]
pub struct JoinInfo {
    pub wall: WallId,
    pub other: WallId,
    pub kind: JoinKind,
    /// Participating end of `wall`; `None` for X joins.
    pub end: Option<WallEnd>,
    /// Participating end of `other`; `None` for T and X joins.
    pub other_end: Option<WallEnd>,
    /// The meeting point on the reference geometry.
    pub point: Point2,
    /// Open angle between the wall directions, in `[0, π]`.
    pub angle: f64,
    /// Corner cut polygon, exterior-side point first. Empty when no miter
    /// applies (X, collinear, or the parallel-face fallback).
    pub corner: Vec<Point2>,
}

/// Finds every join between one wall and the rest of the wall set.
///
/// A pure query over the walls' reference ("attachment") lines: each
/// wall's centerline offset by its reference-line mode. Wall geometry is
/// never mutated; the draw-time snapping path lives in [`snap`].
#[derive(Debug)]
pub struct FindJoins {
    wall: WallId,
    tolerance: f64,
}

impl FindJoins {
    #[must_use]
    pub fn new(wall: WallId) -> Self {
        Self {
            wall,
            tolerance: JOIN_TOLERANCE,
        }
    }

    /// Overrides the endpoint tolerance (mm).
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query. Unknown ids and degenerate walls yield an empty
    /// result; parallel geometry classifies as collinear or not at all,
    /// never as an error.
    #[must_use]
    pub fn execute(&self, walls: &SlotMap<WallId, Wall>) -> Vec<JoinInfo> {
        let Some(wall) = walls.get(self.wall) else {
            return Vec::new();
        };
        let (Some((a0, a1)), Some(dir_a)) = (wall.attachment_line(), wall.direction()) else {
            return Vec::new();
        };

        let mut joins = Vec::new();

        for (other_id, other) in walls {
            if other_id == self.wall {
                continue;
            }
            let (Some((b0, b1)), Some(dir_b)) = (other.attachment_line(), other.direction())
            else {
                continue;
            };

            let angle = angle_between(&dir_a, &dir_b);
            let parallel = are_parallel(&dir_a, &dir_b, DIRECTION_EPS);

            for end in [WallEnd::Start, WallEnd::End] {
                if !wall.join_allowed(end) {
                    continue;
                }
                let p = match end {
                    WallEnd::Start => a0,
                    WallEnd::End => a1,
                };

                // Endpoint proximity: L, or collinear butt when parallel.
                let (d0, d1) = ((p - b0).norm(), (p - b1).norm());
                let (near, other_end, dist) = if d0 <= d1 {
                    (b0, WallEnd::Start, d0)
                } else {
                    (b1, WallEnd::End, d1)
                };
                if dist <= self.tolerance {
                    let point = mid(&p, &near);
                    let (kind, corner) = if parallel {
                        (JoinKind::Collinear, Vec::new())
                    } else {
                        (
                            JoinKind::L,
                            corner::corner_polygon(wall, other, &point),
                        )
                    };
                    joins.push(JoinInfo {
                        wall: self.wall,
                        other: other_id,
                        kind,
                        end: Some(end),
                        other_end: Some(other_end),
                        point,
                        angle,
                        corner,
                    });
                    continue;
                }

                if parallel {
                    // Mid-span collinear overlap; parallel walls can form
                    // no T or X joins.
                    let proj = point_to_segment(&p, &b0, &b1);
                    if proj.distance <= self.tolerance {
                        joins.push(JoinInfo {
                            wall: self.wall,
                            other: other_id,
                            kind: JoinKind::Collinear,
                            end: Some(end),
                            other_end: None,
                            point: proj.point,
                            angle,
                            corner: Vec::new(),
                        });
                    }
                    continue;
                }

                // T: the end abuts the other's span, clear of its own
                // endpoint neighbourhoods.
                let proj = point_to_segment(&p, &b0, &b1);
                if proj.distance <= self.tolerance
                    && (proj.point - b0).norm() > other.thickness()
                    && (proj.point - b1).norm() > other.thickness()
                {
                    if let Some(join) = self.t_join(
                        wall, other, other_id, end, angle,
                    ) {
                        joins.push(join);
                    }
                }
            }

            // X: tested once per pair, independent of endpoint adjacency.
            if !parallel {
                let (da, db) = (a1 - a0, b1 - b0);
                if let Some((t, u)) = line_line_intersect(&a0, &da, &b0, &db) {
                    let interior = |v: f64| v > X_INTERIOR_MARGIN && v < 1.0 - X_INTERIOR_MARGIN;
                    if interior(t) && interior(u) {
                        joins.push(JoinInfo {
                            wall: self.wall,
                            other: other_id,
                            kind: JoinKind::X,
                            end: None,
                            other_end: None,
                            point: point_at(&a0, &da, t),
                            angle,
                            corner: Vec::new(),
                        });
                    }
                }
            }
        }

        joins
    }

    /// Builds the T join of `wall`'s `end` against `other`'s span: the
    /// join point is the intersection of `wall`'s infinite centerline with
    /// the face of `other` that `wall` approaches.
    fn t_join(
        &self,
        wall: &Wall,
        other: &Wall,
        other_id: WallId,
        end: WallEnd,
        angle: f64,
    ) -> Option<JoinInfo> {
        let dir_b = other.direction()?;
        let far = wall.end_point(end.opposite());
        let rel = far - other.start;
        let side = if dir_b.x * rel.y - dir_b.y * rel.x >= 0.0 {
            Side::Exterior
        } else {
            Side::Interior
        };
        let (f0, f1) = other.face_line(side)?;

        let dir_a = wall.direction()?;
        let point = intersection_point(&wall.start, &dir_a, &f0, &(f1 - f0))?;
        let corner = corner::t_corner(wall, other, &(f0, f1));

        Some(JoinInfo {
            wall: self.wall,
            other: other_id,
            kind: JoinKind::T,
            end: Some(end),
            other_end: None,
            point,
            angle,
            corner,
        })
    }
}

fn mid(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}
