pub mod cycles;
pub mod graph;

use slotmap::SlotMap;

use crate::math::polygon;
use crate::math::Point2;
use crate::model::{Room, Wall, WallId};

use self::cycles::{find_cycles, MAX_CYCLE_DEPTH};
use self::graph::{build_graph, MERGE_TOLERANCE};

/// Minimum enclosed area for a valid room: 1 m², in mm². Filters the
/// slivers produced by near-duplicate nodes or noise in the wall network.
pub const MIN_ROOM_AREA: f64 = 1.0e6;

/// Detects the closed regions ("rooms") enclosed by the wall network.
///
/// A pure query: endpoint merge into a planar graph, depth-capped cycle
/// enumeration, canonical de-duplication, then an area filter. Always
/// returns, possibly empty; fewer than three walls short-circuit.
#[derive(Debug)]
pub struct DetectRooms {
    merge_tolerance: f64,
    max_depth: usize,
    min_area: f64,
}

impl Default for DetectRooms {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectRooms {
    #[must_use]
    pub fn new() -> Self {
        Self {
            merge_tolerance: MERGE_TOLERANCE,
            max_depth: MAX_CYCLE_DEPTH,
            min_area: MIN_ROOM_AREA,
        }
    }

    /// Overrides the endpoint merge tolerance (mm).
    #[must_use]
    pub fn with_merge_tolerance(mut self, tolerance: f64) -> Self {
        self.merge_tolerance = tolerance;
        self
    }

    /// Overrides the cycle depth cap.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Overrides the minimum room area (mm²).
    #[must_use]
    pub fn with_min_area(mut self, area: f64) -> Self {
        self.min_area = area;
        self
    }

    /// Executes the detection.
    #[must_use]
    pub fn execute(&self, walls: &SlotMap<WallId, Wall>) -> Vec<Room> {
        if walls.len() < 3 {
            return Vec::new();
        }

        let graph = build_graph(walls, self.merge_tolerance);
        let mut rooms = Vec::new();

        for cycle in find_cycles(&graph, self.max_depth) {
            let contour: Vec<Point2> = cycle.iter().map(|&i| graph.nodes[i]).collect();
            if polygon::signed_area(&contour).abs() < self.min_area {
                continue;
            }

            let n = cycle.len();
            let bounding: Vec<WallId> = (0..n)
                .filter_map(|i| graph.wall_between(cycle[i], cycle[(i + 1) % n]))
                .collect();

            rooms.push(Room::from_contour(contour, rooms.len() + 1, bounding));
        }

        rooms
    }
}
