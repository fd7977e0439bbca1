use slotmap::SlotMap;

use crate::math::Point2;
use crate::model::{Wall, WallEnd, WallId};

use super::JoinInfo;

/// Draw-time endpoint snapping: the legacy join path, used when
/// auto-join-on-draw is enabled.
///
/// Unlike [`FindJoins`](super::FindJoins), which computes transient corner
/// geometry at render time, this mutates stored wall coordinates: each
/// permitted end of `wall` that lies within `tolerance` of another wall's
/// permitted endpoint is moved, together with that endpoint, onto their
/// shared midpoint. Returns the number of ends snapped.
pub fn snap_wall_ends(
    walls: &mut SlotMap<WallId, Wall>,
    wall: WallId,
    tolerance: f64,
) -> usize {
    let Some(probe) = walls.get(wall).cloned() else {
        return 0;
    };

    let mut snaps: Vec<(WallEnd, WallId, WallEnd, Point2)> = Vec::new();

    for end in [WallEnd::Start, WallEnd::End] {
        if !probe.join_allowed(end) {
            continue;
        }
        let p = probe.end_point(end);

        let mut best: Option<(f64, WallId, WallEnd, Point2)> = None;
        for (other_id, other) in walls.iter() {
            if other_id == wall {
                continue;
            }
            for other_end in [WallEnd::Start, WallEnd::End] {
                if !other.join_allowed(other_end) {
                    continue;
                }
                let q = other.end_point(other_end);
                let d = (p - q).norm();
                if d <= tolerance && best.map_or(true, |(bd, ..)| d < bd) {
                    best = Some((d, other_id, other_end, q));
                }
            }
        }

        if let Some((_, other_id, other_end, q)) = best {
            let mid = Point2::new((p.x + q.x) * 0.5, (p.y + q.y) * 0.5);
            snaps.push((end, other_id, other_end, mid));
        }
    }

    let count = snaps.len();
    for (end, other_id, other_end, mid) in snaps {
        if let Some(w) = walls.get_mut(wall) {
            match end {
                WallEnd::Start => w.start = mid,
                WallEnd::End => w.end = mid,
            }
        }
        if let Some(o) = walls.get_mut(other_id) {
            match other_end {
                WallEnd::Start => o.start = mid,
                WallEnd::End => o.end = mid,
            }
        }
    }
    count
}

/// Applies a detected endpoint join by snapping both participating wall
/// ends onto the join point.
///
/// Only endpoint joins (L, collinear butt) carry two ends; T and X joins
/// leave both walls unchanged, as does a join whose ends are no longer
/// permitted or whose walls are gone. Returns whether geometry moved.
pub fn apply_join(walls: &mut SlotMap<WallId, Wall>, join: &JoinInfo) -> bool {
    let (Some(end), Some(other_end)) = (join.end, join.other_end) else {
        return false;
    };
    let permitted = walls
        .get(join.wall)
        .is_some_and(|w| w.join_allowed(end))
        && walls
            .get(join.other)
            .is_some_and(|w| w.join_allowed(other_end));
    if !permitted {
        return false;
    }

    if let Some(w) = walls.get_mut(join.wall) {
        match end {
            WallEnd::Start => w.start = join.point,
            WallEnd::End => w.end = join.point,
        }
    }
    if let Some(o) = walls.get_mut(join.other) {
        match other_end {
            WallEnd::Start => o.start = join.point,
            WallEnd::End => o.end = join.point,
        }
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn snaps_both_walls_to_midpoint() {
        let mut walls = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        let b = walls.insert(Wall::new(
            Point2::new(4000.0, 40.0),
            Point2::new(4000.0, 3000.0),
            200.0,
        ));

        let snapped = snap_wall_ends(&mut walls, a, 50.0);
        assert_eq!(snapped, 1);
        let mid = Point2::new(4000.0, 20.0);
        assert!((walls[a].end - mid).norm() < 1e-9);
        assert!((walls[b].start - mid).norm() < 1e-9);
    }

    #[test]
    fn gap_beyond_tolerance_is_left_alone() {
        let mut walls = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        walls.insert(Wall::new(
            Point2::new(4000.0, 80.0),
            Point2::new(4000.0, 3000.0),
            200.0,
        ));

        assert_eq!(snap_wall_ends(&mut walls, a, 50.0), 0);
        assert!((walls[a].end - Point2::new(4000.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn respects_join_permission_on_both_sides() {
        let mut walls = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        let b = walls.insert(Wall::new(
            Point2::new(4000.0, 40.0),
            Point2::new(4000.0, 3000.0),
            200.0,
        ));

        // A manually trimmed end must not be re-snapped.
        walls[b].set_join_allowed(WallEnd::Start, false);
        assert_eq!(snap_wall_ends(&mut walls, a, 50.0), 0);

        walls[b].set_join_allowed(WallEnd::Start, true);
        walls[a].set_join_allowed(WallEnd::End, false);
        assert_eq!(snap_wall_ends(&mut walls, a, 50.0), 0);
    }

    #[test]
    fn picks_the_nearest_candidate() {
        let mut walls = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        walls.insert(Wall::new(
            Point2::new(4000.0, 45.0),
            Point2::new(4000.0, 3000.0),
            200.0,
        ));
        let near = walls.insert(Wall::new(
            Point2::new(4000.0, -10.0),
            Point2::new(4000.0, -3000.0),
            200.0,
        ));

        assert_eq!(snap_wall_ends(&mut walls, a, 50.0), 1);
        let mid = Point2::new(4000.0, -5.0);
        assert!((walls[a].end - mid).norm() < 1e-9);
        assert!((walls[near].start - mid).norm() < 1e-9);
    }

    #[test]
    fn apply_join_snaps_both_ends_onto_the_join_point() {
        let mut walls = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        let b = walls.insert(Wall::new(
            Point2::new(4000.0, 40.0),
            Point2::new(4000.0, 3000.0),
            200.0,
        ));

        let joins = crate::join::FindJoins::new(a).execute(&walls);
        assert_eq!(joins.len(), 1);
        assert!(apply_join(&mut walls, &joins[0]));

        let mid = Point2::new(4000.0, 20.0);
        assert!((walls[a].end - mid).norm() < 1e-9);
        assert!((walls[b].start - mid).norm() < 1e-9);
    }

    #[test]
    fn apply_join_refuses_x_joins() {
        let mut walls = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(4000.0, 0.0),
            200.0,
        ));
        walls.insert(Wall::new(
            Point2::new(2000.0, -1000.0),
            Point2::new(2000.0, 1000.0),
            200.0,
        ));

        let joins = crate::join::FindJoins::new(a).execute(&walls);
        assert_eq!(joins.len(), 1);
        assert!(!apply_join(&mut walls, &joins[0]));
        assert!((walls[a].end - Point2::new(4000.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn missing_wall_is_a_no_op() {
        let mut walls: SlotMap<WallId, Wall> = SlotMap::with_key();
        let a = walls.insert(Wall::new(
            Point2::new(0.0, 0.0),
            Point2::new(1000.0, 0.0),
            200.0,
        ));
        walls.remove(a);
        assert_eq!(snap_wall_ends(&mut walls, a, 50.0), 0);
    }
}
