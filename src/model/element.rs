use crate::model::dimension::DimensionId;
use crate::model::opening::OpeningId;
use crate::model::room::RoomId;
use crate::model::structural::{BeamId, ColumnId, SlabId};
use crate::model::wall::WallId;

/// A reference to any selectable element of the drawing.
///
/// A closed sum type: hit-testing and selection match on it exhaustively,
/// so adding an element kind is a compile-time obligation at every
/// dispatch site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Wall(WallId),
    Opening(OpeningId),
    Dimension(DimensionId),
    Room(RoomId),
    Column(ColumnId),
    Beam(BeamId),
    Slab(SlabId),
}
