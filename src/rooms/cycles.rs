use std::collections::HashSet;

use super::graph::WallGraph;

/// Maximum cycle length in edges; bounds the search on dense graphs.
pub const MAX_CYCLE_DEPTH: usize = 12;

/// Enumerates the unique minimal simple cycles of the graph, in canonical
/// form.
///
/// A depth-first search runs from every node, extending the path only
/// through unvisited nodes up to `max_depth` edges; a return to the start
/// with three or more nodes on the path records a candidate. Candidates
/// are canonicalized and de-duplicated, and cycles with a chord (a graph
/// edge between two non-adjacent cycle nodes) are discarded: such a cycle
/// is the union of smaller ones, not a minimal region.
#[must_use]
pub fn find_cycles(graph: &WallGraph, max_depth: usize) -> Vec<Vec<usize>> {
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut cycles: Vec<Vec<usize>> = Vec::new();
    let mut path: Vec<usize> = Vec::new();

    for start in 0..graph.nodes.len() {
        path.push(start);
        dfs(graph, start, start, max_depth, &mut path, &mut seen, &mut cycles);
        path.pop();
    }

    cycles
}

fn dfs(
    graph: &WallGraph,
    start: usize,
    current: usize,
    max_depth: usize,
    path: &mut Vec<usize>,
    seen: &mut HashSet<Vec<usize>>,
    out: &mut Vec<Vec<usize>>,
) {
    if path.len() > max_depth {
        return;
    }
    for &(next, _) in &graph.adjacency[current] {
        if next == start {
            if path.len() >= 3 {
                let canon = canonicalize(path);
                if seen.insert(canon.clone()) && !has_chord(graph, &canon) {
                    out.push(canon);
                }
            }
        } else if !path.contains(&next) {
            path.push(next);
            dfs(graph, start, next, max_depth, path, seen, out);
            path.pop();
        }
    }
}

/// Rotates the cycle to start at its lowest node and picks the
/// lexicographically smaller of the forward and reversed sequences, so
/// one physical loop found from different starts or directions hashes
/// identically.
fn canonicalize(cycle: &[usize]) -> Vec<usize> {
    let forward = rotate_to_min(cycle);
    let reversed: Vec<usize> = cycle.iter().rev().copied().collect();
    let backward = rotate_to_min(&reversed);
    if forward <= backward {
        forward
    } else {
        backward
    }
}

fn rotate_to_min(cycle: &[usize]) -> Vec<usize> {
    let Some(min_pos) = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, v)| *v)
        .map(|(i, _)| i)
    else {
        return Vec::new();
    };
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_pos..]);
    rotated.extend_from_slice(&cycle[..min_pos]);
    rotated
}

/// A chord is a graph edge between two cycle nodes that are not
/// neighbours along the cycle.
fn has_chord(graph: &WallGraph, cycle: &[usize]) -> bool {
    let n = cycle.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent_on_cycle = j == i + 1 || (i == 0 && j == n - 1);
            if !adjacent_on_cycle && graph.has_edge(cycle[i], cycle[j]) {
                return true;
            }
        }
    }
    false
}
