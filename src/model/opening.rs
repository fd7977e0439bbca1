use crate::model::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for an opening in the document.
    pub struct OpeningId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    Door,
    Window,
}

/// Default door/window head height above floor (mm).
pub const DEFAULT_OPENING_HEIGHT: f64 = 2100.0;

/// A door or window hosted on a wall.
///
/// Openings never affect join resolution; they are input to the
/// auto-dimension builder (dimension chains split at their spans) and to
/// hit-testing.
#[derive(Debug, Clone)]
pub struct Opening {
    pub wall: WallId,
    pub kind: OpeningKind,
    /// Normalized center position along the host wall, clamped to `[0, 1]`.
    position: f64,
    /// Clear width in mm.
    pub width: f64,
    pub height: f64,
    /// Sill height above floor; zero for doors.
    pub sill_height: f64,
}

impl Opening {
    #[must_use]
    pub fn new(wall: WallId, kind: OpeningKind, position: f64, width: f64) -> Self {
        Self {
            wall,
            kind,
            position: position.clamp(0.0, 1.0),
            width,
            height: DEFAULT_OPENING_HEIGHT,
            sill_height: match kind {
                OpeningKind::Door => 0.0,
                OpeningKind::Window => 900.0,
            },
        }
    }

    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position.clamp(0.0, 1.0);
    }

    /// The opening's span `[center - width/2, center + width/2]` in
    /// wall-local coordinates, clamped to the wall extent.
    #[must_use]
    pub fn span_on(&self, wall_length: f64) -> (f64, f64) {
        let center = self.position * wall_length;
        let half = self.width * 0.5;
        (
            (center - half).clamp(0.0, wall_length),
            (center + half).clamp(0.0, wall_length),
        )
    }
}
