use crate::math::Point2;
use crate::model::wall::WorkState;

slotmap::new_key_type! {
    /// Unique identifier for a column in the document.
    pub struct ColumnId;
}

slotmap::new_key_type! {
    /// Unique identifier for a beam in the document.
    pub struct BeamId;
}

slotmap::new_key_type! {
    /// Unique identifier for a slab in the document.
    pub struct SlabId;
}

/// A rectangular column, axis-aligned.
#[derive(Debug, Clone)]
pub struct Column {
    pub center: Point2,
    pub width: f64,
    pub depth: f64,
    pub work_state: WorkState,
}

impl Column {
    #[must_use]
    pub fn new(center: Point2, width: f64, depth: f64) -> Self {
        Self {
            center,
            width,
            depth,
            work_state: WorkState::New,
        }
    }
}

/// A beam span drawn in plan.
#[derive(Debug, Clone)]
pub struct Beam {
    pub start: Point2,
    pub end: Point2,
    pub width: f64,
    pub work_state: WorkState,
}

impl Beam {
    #[must_use]
    pub fn new(start: Point2, end: Point2, width: f64) -> Self {
        Self {
            start,
            end,
            width,
            work_state: WorkState::New,
        }
    }
}

/// A floor slab outline.
#[derive(Debug, Clone)]
pub struct Slab {
    pub contour: Vec<Point2>,
    pub thickness: f64,
    pub work_state: WorkState,
}

impl Slab {
    #[must_use]
    pub fn new(contour: Vec<Point2>, thickness: f64) -> Self {
        Self {
            contour,
            thickness,
            work_state: WorkState::New,
        }
    }
}
