use slotmap::SlotMap;

use crate::math::Point2;
use crate::model::{Wall, WallId};

/// Default endpoint merge tolerance (mm): endpoints closer than this
/// collapse into one graph node.
pub const MERGE_TOLERANCE: f64 = 5.0;

/// The planar wall graph: merged endpoint nodes plus undirected edges.
#[derive(Debug)]
pub struct WallGraph {
    pub nodes: Vec<Point2>,
    /// `(node a, node b, wall)` with `a < b`; one edge per node pair.
    pub edges: Vec<(usize, usize, WallId)>,
    /// `adjacency[n]` lists `(neighbour node, edge index)`.
    pub adjacency: Vec<Vec<(usize, usize)>>,
}

impl WallGraph {
    /// The wall carried by the edge between two nodes, if any.
    #[must_use]
    pub fn wall_between(&self, a: usize, b: usize) -> Option<WallId> {
        let key = (a.min(b), a.max(b));
        self.edges
            .iter()
            .find(|&&(ea, eb, _)| (ea, eb) == key)
            .map(|&(_, _, id)| id)
    }

    /// Whether any edge connects the two nodes.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.wall_between(a, b).is_some()
    }
}

/// Builds the graph from the wall set.
///
/// Endpoints within `merge_tolerance` of an existing node merge into it
/// (linear scan; plans stay in the tens-to-hundreds of walls). Self-loops
/// are skipped and parallel duplicate edges between one node pair are
/// de-duplicated.
#[must_use]
pub fn build_graph(walls: &SlotMap<WallId, Wall>, merge_tolerance: f64) -> WallGraph {
    let mut nodes: Vec<Point2> = Vec::new();
    let mut edges: Vec<(usize, usize, WallId)> = Vec::new();

    for (id, wall) in walls {
        let a = ensure_node(&mut nodes, wall.start, merge_tolerance);
        let b = ensure_node(&mut nodes, wall.end, merge_tolerance);
        if a == b {
            continue;
        }
        let key = (a.min(b), a.max(b));
        if !edges.iter().any(|&(ea, eb, _)| (ea, eb) == key) {
            edges.push((key.0, key.1, id));
        }
    }

    let mut adjacency = vec![Vec::new(); nodes.len()];
    for (i, &(a, b, _)) in edges.iter().enumerate() {
        adjacency[a].push((b, i));
        adjacency[b].push((a, i));
    }

    WallGraph {
        nodes,
        edges,
        adjacency,
    }
}

fn ensure_node(nodes: &mut Vec<Point2>, p: Point2, tolerance: f64) -> usize {
    let tol_sq = tolerance * tolerance;
    for (i, n) in nodes.iter().enumerate() {
        if (n - p).norm_squared() < tol_sq {
            return i;
        }
    }
    nodes.push(p);
    nodes.len() - 1
}
