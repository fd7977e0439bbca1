pub mod dimension;
pub mod element;
pub mod opening;
pub mod room;
pub mod structural;
pub mod wall;
pub mod wall_type;

pub use dimension::{Dimension, DimensionChain, DimensionId, DimensionSource};
pub use element::Element;
pub use opening::{Opening, OpeningId, OpeningKind};
pub use room::{Room, RoomCategory, RoomId};
pub use structural::{Beam, BeamId, Column, ColumnId, Slab, SlabId};
pub use wall::{ReferenceLine, Side, Wall, WallEnd, WallId, WorkState};
pub use wall_type::{LayerFunction, WallLayer, WallType, WallTypeId};
