use std::collections::HashMap;

use tracing::debug;

use crate::model::{Dimension, DimensionChain, Wall, WallId};

use super::Document;

/// Sub-millimetre dimensions are dropped; an opening flush with a wall
/// end would otherwise leave zero-length clutter.
const MIN_DIMENSION_LENGTH: f64 = 1.0;

/// Default perpendicular offset: clear of the wall body plus a 300 mm gap.
fn default_offset(wall: &Wall) -> f64 {
    wall.thickness() * 0.5 + 300.0
}

impl Document {
    /// Seeds a locked offset restored from a project file. Consumed by the
    /// next rebuild, where it takes precedence over any live locked value.
    pub fn load_auto_dimension_state(&mut self, wall: WallId, offset: f64) {
        self.restored_offsets.insert(wall, offset);
    }

    /// Regenerates every auto dimension from current wall and opening
    /// geometry.
    ///
    /// Locked offsets survive: they are snapshotted before the old
    /// dimensions are discarded and re-applied to the regenerated ones.
    /// Manual dimensions are untouched. Idempotent for unchanged inputs.
    pub fn rebuild_auto_dimensions(&mut self) {
        let mut locked: HashMap<WallId, f64> = HashMap::new();
        for dim in self.dimensions.values() {
            if dim.locked {
                if let Some(wall) = dim.wall() {
                    locked.insert(wall, dim.offset);
                }
            }
        }
        // File-restored state wins over live locks, then is consumed: a
        // one-time seed, not a persistent override.
        for (wall, offset) in self.restored_offsets.drain() {
            locked.insert(wall, offset);
        }

        self.dimensions.retain(|_, d| !d.is_auto());
        self.chains.clear();

        let wall_ids: Vec<WallId> = self.walls.keys().collect();
        for id in wall_ids {
            self.build_wall_dimensions(id, &locked);
        }

        debug!(
            dimensions = self.dimensions.len(),
            chains = self.chains.len(),
            "rebuilt auto dimensions"
        );
    }

    /// Emits the dimension (or chain) for one wall: a whole-wall length
    /// when it has no openings, otherwise alternating wall-segment and
    /// opening-width dimensions sharing one chain offset.
    fn build_wall_dimensions(&mut self, id: WallId, locked: &HashMap<WallId, f64>) {
        let Some(wall) = self.walls.get(id) else {
            return;
        };
        let length = wall.length();
        if length < MIN_DIMENSION_LENGTH {
            return;
        }
        let (Some((anchor, _)), Some(dir)) = (wall.attachment_line(), wall.direction()) else {
            return;
        };

        let offset = locked
            .get(&id)
            .copied()
            .unwrap_or_else(|| default_offset(wall));
        let is_locked = locked.contains_key(&id);
        let at = |d: f64| anchor + dir * d;

        let mut spans: Vec<(f64, f64)> = self
            .openings
            .values()
            .filter(|o| o.wall == id)
            .map(|o| o.span_on(length))
            .collect();

        if spans.is_empty() {
            let mut dim = Dimension::auto(at(0.0), at(length), offset, id, None);
            dim.locked = is_locked;
            self.dimensions.insert(dim);
            return;
        }

        spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        // Walk the sorted spans: segment up to each opening, the opening
        // itself, then the closing segment to the wall end.
        let chain_index = self.chains.len();
        let mut pieces: Vec<(f64, f64)> = Vec::new();
        let mut cursor = 0.0;
        for &(a, b) in &spans {
            pieces.push((cursor, a));
            pieces.push((a, b));
            cursor = cursor.max(b);
        }
        pieces.push((cursor, length));

        let mut members = Vec::new();
        for (a, b) in pieces {
            if b - a < MIN_DIMENSION_LENGTH {
                continue;
            }
            let mut dim = Dimension::auto(at(a), at(b), offset, id, Some(chain_index));
            dim.locked = is_locked;
            members.push(self.dimensions.insert(dim));
        }

        self.chains.push(DimensionChain {
            wall: id,
            offset,
            members,
        });
    }
}
