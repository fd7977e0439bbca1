use crate::math::{Point2, Vector2, TOLERANCE};
use crate::model::wall_type::WallTypeId;

slotmap::new_key_type! {
    /// Unique identifier for a wall in the document.
    pub struct WallId;
}

/// Construction-phase tag, used for view filtering and estimate grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkState {
    Existing,
    Demolish,
    #[default]
    New,
}

/// Which offset line of a wall is authoritative for joins, snapping and
/// dimension anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceLine {
    /// The centerline; attachment offset zero.
    #[default]
    Core,
    /// The exterior face, offset `+thickness/2` along the perpendicular.
    FinishExterior,
    /// The interior face, offset `-thickness/2`.
    FinishInterior,
}

/// One end of a wall segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEnd {
    Start,
    End,
}

impl WallEnd {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// A wall face. The exterior face lies on the `+perpendicular` (left
/// normal) side of the start→end direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Exterior,
    Interior,
}

/// Sane thickness range enforced by the model (mm).
pub const MIN_THICKNESS: f64 = 50.0;
/// Upper bound of the model's thickness clamp (mm).
pub const MAX_THICKNESS: f64 = 1000.0;
/// Default wall height (mm).
pub const DEFAULT_WALL_HEIGHT: f64 = 2700.0;

/// A straight wall: a line segment with thickness.
///
/// Walls are owned by the [`Document`](crate::document::Document); the join,
/// room and dimension subsystems only borrow them for the duration of a
/// single computation.
#[derive(Debug, Clone)]
pub struct Wall {
    pub start: Point2,
    pub end: Point2,
    thickness: f64,
    pub height: f64,
    pub work_state: WorkState,
    pub reference_line: ReferenceLine,
    pub wall_type: Option<WallTypeId>,
    /// Join resolution permitted at the start end. Cleared after a manual
    /// trim/extend so the system does not re-snap the end.
    pub join_start: bool,
    /// Join resolution permitted at the end end.
    pub join_end: bool,
    pub selected: bool,
}

impl Wall {
    /// Creates a wall between two points. Thickness is clamped to
    /// [`MIN_THICKNESS`], [`MAX_THICKNESS`].
    #[must_use]
    pub fn new(start: Point2, end: Point2, thickness: f64) -> Self {
        Self {
            start,
            end,
            thickness: thickness.clamp(MIN_THICKNESS, MAX_THICKNESS),
            height: DEFAULT_WALL_HEIGHT,
            work_state: WorkState::New,
            reference_line: ReferenceLine::Core,
            wall_type: None,
            join_start: true,
            join_end: true,
            selected: false,
        }
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Sets the thickness, clamped to the sane range.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction start→end, or `None` for a degenerate wall.
    #[must_use]
    pub fn direction(&self) -> Option<Vector2> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(d / len)
    }

    /// Left normal of the direction; the exterior side.
    #[must_use]
    pub fn perpendicular(&self) -> Option<Vector2> {
        self.direction().map(|d| Vector2::new(-d.y, d.x))
    }

    #[must_use]
    pub fn end_point(&self, end: WallEnd) -> Point2 {
        match end {
            WallEnd::Start => self.start,
            WallEnd::End => self.end,
        }
    }

    /// Point at the given distance from the start along the centerline.
    /// A degenerate wall returns its start.
    #[must_use]
    pub fn point_along(&self, distance: f64) -> Point2 {
        match self.direction() {
            Some(dir) => self.start + dir * distance,
            None => self.start,
        }
    }

    /// Signed perpendicular offset of the reference line from the
    /// centerline.
    #[must_use]
    pub fn attachment_offset(&self) -> f64 {
        match self.reference_line {
            ReferenceLine::Core => 0.0,
            ReferenceLine::FinishExterior => self.thickness * 0.5,
            ReferenceLine::FinishInterior => -self.thickness * 0.5,
        }
    }

    /// The reference line used for join detection and dimension anchoring,
    /// derived from the current geometry and mode. `None` for a degenerate
    /// wall.
    #[must_use]
    pub fn attachment_line(&self) -> Option<(Point2, Point2)> {
        self.offset_line(self.attachment_offset())
    }

    /// The exterior or interior face line. `None` for a degenerate wall.
    #[must_use]
    pub fn face_line(&self, side: Side) -> Option<(Point2, Point2)> {
        let offset = match side {
            Side::Exterior => self.thickness * 0.5,
            Side::Interior => -self.thickness * 0.5,
        };
        self.offset_line(offset)
    }

    fn offset_line(&self, offset: f64) -> Option<(Point2, Point2)> {
        let perp = self.perpendicular()?;
        Some((self.start + perp * offset, self.end + perp * offset))
    }

    /// The blunt body rectangle `[start ext, end ext, end int, start int]`,
    /// before any join corner replaces the end pairs.
    #[must_use]
    pub fn corner_points(&self) -> Option<[Point2; 4]> {
        let perp = self.perpendicular()?;
        let h = self.thickness * 0.5;
        Some([
            self.start + perp * h,
            self.end + perp * h,
            self.end - perp * h,
            self.start - perp * h,
        ])
    }

    #[must_use]
    pub fn join_allowed(&self, end: WallEnd) -> bool {
        match end {
            WallEnd::Start => self.join_start,
            WallEnd::End => self.join_end,
        }
    }

    pub fn set_join_allowed(&mut self, end: WallEnd, allowed: bool) {
        match end {
            WallEnd::Start => self.join_start = allowed,
            WallEnd::End => self.join_end = allowed,
        }
    }
}
