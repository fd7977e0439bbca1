use crate::math::{Point2, Vector2, TOLERANCE};
use crate::model::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a dimension in the document.
    pub struct DimensionId;
}

/// Origin of a dimension: regenerated from a wall, or user-placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionSource {
    /// Rebuilt from wall/opening geometry on every structural change.
    /// `chain` indexes the document's chain list when the host wall has
    /// openings.
    Auto {
        wall: WallId,
        chain: Option<usize>,
    },
    /// Placed by the user between two arbitrary points; always locked.
    Manual,
}

/// A linear dimension between two points, displayed at a perpendicular
/// offset from the measured line.
#[derive(Debug, Clone)]
pub struct Dimension {
    pub start: Point2,
    pub end: Point2,
    /// Perpendicular display offset from the measured line (mm).
    pub offset: f64,
    /// A locked offset survives auto-dimension rebuilds.
    pub locked: bool,
    pub source: DimensionSource,
}

impl Dimension {
    #[must_use]
    pub fn auto(
        start: Point2,
        end: Point2,
        offset: f64,
        wall: WallId,
        chain: Option<usize>,
    ) -> Self {
        Self {
            start,
            end,
            offset,
            locked: false,
            source: DimensionSource::Auto { wall, chain },
        }
    }

    /// Manual dimensions are always locked.
    #[must_use]
    pub fn manual(start: Point2, end: Point2, offset: f64) -> Self {
        Self {
            start,
            end,
            offset,
            locked: true,
            source: DimensionSource::Manual,
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self.source, DimensionSource::Auto { .. })
    }

    /// The host wall for auto dimensions.
    #[must_use]
    pub fn wall(&self) -> Option<WallId> {
        match self.source {
            DimensionSource::Auto { wall, .. } => Some(wall),
            DimensionSource::Manual => None,
        }
    }

    /// The displayed line: the measured segment shifted by `offset` along
    /// its left normal. A degenerate dimension renders in place.
    #[must_use]
    pub fn render_line(&self) -> (Point2, Point2) {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            return (self.start, self.end);
        }
        let n = Vector2::new(-d.y / len, d.x / len);
        (self.start + n * self.offset, self.end + n * self.offset)
    }
}

/// The auto dimensions of one wall with openings, sharing a single offset
/// so dragging one member moves the whole chain.
#[derive(Debug, Clone)]
pub struct DimensionChain {
    pub wall: WallId,
    pub offset: f64,
    pub members: Vec<DimensionId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_is_locked() {
        let d = Dimension::manual(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), 250.0);
        assert!(d.locked);
        assert!(!d.is_auto());
        assert!(d.wall().is_none());
    }

    #[test]
    fn render_line_offsets_perpendicular() {
        let d = Dimension::auto(
            Point2::new(0.0, 0.0),
            Point2::new(1000.0, 0.0),
            400.0,
            WallId::default(),
            None,
        );
        let (a, b) = d.render_line();
        assert!((a.y - 400.0).abs() < TOLERANCE);
        assert!((b.y - 400.0).abs() < TOLERANCE);
        assert!((b.x - 1000.0).abs() < TOLERANCE);
    }

    #[test]
    fn degenerate_renders_in_place() {
        let p = Point2::new(5.0, 5.0);
        let d = Dimension::manual(p, p, 100.0);
        let (a, b) = d.render_line();
        assert!((a - p).norm() < TOLERANCE);
        assert!((b - p).norm() < TOLERANCE);
    }
}
