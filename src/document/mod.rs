mod dimensions;
mod hit_test;

use std::collections::{BTreeMap, HashMap};

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{GeometryError, ModelError};
use crate::join::{corner, snap, FindJoins, JoinInfo, JOIN_TOLERANCE};
use crate::math::{Point2, Vector2};
use crate::model::{
    Beam, BeamId, Column, ColumnId, Dimension, DimensionChain, DimensionId, DimensionSource,
    Opening, OpeningId, OpeningKind, ReferenceLine, Room, RoomId, Slab, SlabId, Wall, WallEnd,
    WallId, WallType, WallTypeId, WorkState,
};
use crate::rooms::DetectRooms;

/// Per-material quantity take-off derived from wall layers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialQuantity {
    /// Elevation face area, m².
    pub area_m2: f64,
    /// Layer volume, m³.
    pub volume_m3: f64,
}

/// The drawing document: sole owner of every entity.
///
/// The join, room and dimension subsystems are pure functions over the
/// borrowed entity maps; none of them retains a reference or caches
/// anything across a mutation. Rooms and auto dimensions are rebuilt
/// wholesale on every structural change.
#[derive(Debug)]
pub struct Document {
    walls: SlotMap<WallId, Wall>,
    wall_types: SlotMap<WallTypeId, WallType>,
    openings: SlotMap<OpeningId, Opening>,
    dimensions: SlotMap<DimensionId, Dimension>,
    rooms: SlotMap<RoomId, Room>,
    columns: SlotMap<ColumnId, Column>,
    beams: SlotMap<BeamId, Beam>,
    slabs: SlotMap<SlabId, Slab>,
    chains: Vec<DimensionChain>,
    /// One-shot `wall → offset` seed restored by the external serializer.
    restored_offsets: HashMap<WallId, f64>,
    /// Snap newly drawn walls onto nearby endpoints (the legacy join
    /// path; the render-time attachment system is always active).
    pub auto_join_on_draw: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self {
            walls: SlotMap::with_key(),
            wall_types: SlotMap::with_key(),
            openings: SlotMap::with_key(),
            dimensions: SlotMap::with_key(),
            rooms: SlotMap::with_key(),
            columns: SlotMap::with_key(),
            beams: SlotMap::with_key(),
            slabs: SlotMap::with_key(),
            chains: Vec::new(),
            restored_offsets: HashMap::new(),
            auto_join_on_draw: true,
        }
    }

    // --- walls ---

    /// Adds a wall, snaps its ends if auto-join is on, and rebuilds the
    /// derived state.
    pub fn add_wall(&mut self, start: Point2, end: Point2, thickness: f64) -> WallId {
        let id = self.walls.insert(Wall::new(start, end, thickness));
        if self.auto_join_on_draw {
            snap::snap_wall_ends(&mut self.walls, id, JOIN_TOLERANCE);
        }
        self.rebuild();
        id
    }

    /// Returns a reference to the wall, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not in the document.
    pub fn wall(&self, id: WallId) -> Result<&Wall, ModelError> {
        self.walls.get(id).ok_or(ModelError::EntityNotFound("wall"))
    }

    #[must_use]
    pub fn walls(&self) -> &SlotMap<WallId, Wall> {
        &self.walls
    }

    /// Removes a wall together with its hosted openings.
    pub fn remove_wall(&mut self, id: WallId) {
        if self.walls.remove(id).is_some() {
            self.openings.retain(|_, o| o.wall != id);
            self.restored_offsets.remove(&id);
            self.rebuild();
        }
    }

    /// Moves one wall end (a drag); join permissions are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the document.
    pub fn move_wall_end(
        &mut self,
        id: WallId,
        end: WallEnd,
        to: Point2,
    ) -> Result<(), ModelError> {
        let wall = self
            .walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?;
        match end {
            WallEnd::Start => wall.start = to,
            WallEnd::End => wall.end = to,
        }
        self.rebuild();
        Ok(())
    }

    /// Manually trims or extends one wall end. The end's join permission
    /// is cleared so the system does not re-snap it.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the document.
    pub fn trim_wall_end(
        &mut self,
        id: WallId,
        end: WallEnd,
        to: Point2,
    ) -> Result<(), ModelError> {
        let wall = self
            .walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?;
        match end {
            WallEnd::Start => wall.start = to,
            WallEnd::End => wall.end = to,
        }
        wall.set_join_allowed(end, false);
        self.rebuild();
        Ok(())
    }

    /// Translates a wall rigidly.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the document.
    pub fn translate_wall(&mut self, id: WallId, delta: Vector2) -> Result<(), ModelError> {
        let wall = self
            .walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?;
        wall.start += delta;
        wall.end += delta;
        self.rebuild();
        Ok(())
    }

    /// Splits a wall at the normalized parameter `at`, re-hosting openings
    /// onto the side they fall on. Returns the id of the new second half.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is missing, degenerate, or `at` is not
    /// strictly inside `(0, 1)`.
    pub fn split_wall(&mut self, id: WallId, at: f64) -> crate::Result<WallId> {
        if !(at > 0.0 && at < 1.0) {
            return Err(ModelError::InvalidParameter {
                parameter: "at",
                value: at,
            }
            .into());
        }
        let original = self
            .walls
            .get(id)
            .ok_or(ModelError::EntityNotFound("wall"))?
            .clone();
        let length = original.length();
        if length < 1.0 {
            return Err(GeometryError::ZeroLengthSegment.into());
        }

        let split_point = original.point_along(at * length);
        let mut second = original.clone();
        second.start = split_point;
        second.selected = false;
        if let Some(first) = self.walls.get_mut(id) {
            first.end = split_point;
        }
        let second_id = self.walls.insert(second);

        // Re-host openings on whichever half their center falls.
        let split_at = at * length;
        for opening in self.openings.values_mut() {
            if opening.wall != id {
                continue;
            }
            let center = opening.position() * length;
            if center <= split_at {
                opening.set_position(center / split_at);
            } else {
                opening.wall = second_id;
                opening.set_position((center - split_at) / (length - split_at));
            }
        }

        self.rebuild();
        Ok(second_id)
    }

    /// Changes a wall's reference-line mode; joins and dimension anchors
    /// follow it.
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the document.
    pub fn set_wall_reference_line(
        &mut self,
        id: WallId,
        mode: ReferenceLine,
    ) -> Result<(), ModelError> {
        self.walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?
            .reference_line = mode;
        self.rebuild();
        Ok(())
    }

    /// Sets a wall's work state (no geometry change; no rebuild needed).
    ///
    /// # Errors
    ///
    /// Returns an error if the wall is not in the document.
    pub fn set_wall_work_state(&mut self, id: WallId, state: WorkState) -> Result<(), ModelError> {
        self.walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?
            .work_state = state;
        Ok(())
    }

    // --- wall types ---

    pub fn add_wall_type(&mut self, wall_type: WallType) -> WallTypeId {
        self.wall_types.insert(wall_type)
    }

    #[must_use]
    pub fn wall_types(&self) -> &SlotMap<WallTypeId, WallType> {
        &self.wall_types
    }

    /// Assigns a wall type; the wall takes the type's composite thickness.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity is not in the document.
    pub fn assign_wall_type(&mut self, id: WallId, ty: WallTypeId) -> Result<(), ModelError> {
        let composite = self
            .wall_types
            .get(ty)
            .ok_or(ModelError::EntityNotFound("wall type"))?
            .composite_thickness();
        let wall = self
            .walls
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("wall"))?;
        wall.wall_type = Some(ty);
        if composite > 0.0 {
            wall.set_thickness(composite);
        }
        self.rebuild();
        Ok(())
    }

    // --- openings ---

    /// Adds a door or window to a wall.
    ///
    /// # Errors
    ///
    /// Returns an error if the host wall is missing or the width is not
    /// positive.
    pub fn add_opening(
        &mut self,
        wall: WallId,
        kind: OpeningKind,
        position: f64,
        width: f64,
    ) -> Result<OpeningId, ModelError> {
        if !self.walls.contains_key(wall) {
            return Err(ModelError::EntityNotFound("wall"));
        }
        if width <= 0.0 {
            return Err(ModelError::InvalidParameter {
                parameter: "width",
                value: width,
            });
        }
        let id = self.openings.insert(Opening::new(wall, kind, position, width));
        self.rebuild();
        Ok(id)
    }

    pub fn remove_opening(&mut self, id: OpeningId) {
        if self.openings.remove(id).is_some() {
            self.rebuild();
        }
    }

    #[must_use]
    pub fn openings(&self) -> &SlotMap<OpeningId, Opening> {
        &self.openings
    }

    // --- dimensions ---

    /// Places a manual dimension between two arbitrary points. Manual
    /// dimensions are locked and survive every rebuild.
    pub fn add_manual_dimension(
        &mut self,
        start: Point2,
        end: Point2,
        offset: f64,
    ) -> DimensionId {
        self.dimensions.insert(Dimension::manual(start, end, offset))
    }

    /// Drags a dimension to a new offset and locks it there. For a
    /// chained auto dimension the whole chain follows.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimension is not in the document.
    pub fn set_dimension_offset(&mut self, id: DimensionId, offset: f64) -> Result<(), ModelError> {
        let dim = self
            .dimensions
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("dimension"))?;
        dim.offset = offset;
        dim.locked = true;

        if let DimensionSource::Auto {
            chain: Some(chain), ..
        } = dim.source
        {
            if let Some(chain) = self.chains.get_mut(chain) {
                chain.offset = offset;
                for member in chain.members.clone() {
                    if let Some(d) = self.dimensions.get_mut(member) {
                        d.offset = offset;
                        d.locked = true;
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn dimensions(&self) -> &SlotMap<DimensionId, Dimension> {
        &self.dimensions
    }

    #[must_use]
    pub fn dimension_chains(&self) -> &[DimensionChain] {
        &self.chains
    }

    // --- rooms ---

    #[must_use]
    pub fn rooms(&self) -> &SlotMap<RoomId, Room> {
        &self.rooms
    }

    /// Returns a reference to the room, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not in the document.
    pub fn room(&self, id: RoomId) -> Result<&Room, ModelError> {
        self.rooms.get(id).ok_or(ModelError::EntityNotFound("room"))
    }

    /// Renames a room; its category is re-inferred from the name.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is not in the document.
    pub fn rename_room(&mut self, id: RoomId, name: impl Into<String>) -> Result<(), ModelError> {
        self.rooms
            .get_mut(id)
            .ok_or(ModelError::EntityNotFound("room"))?
            .set_name(name);
        Ok(())
    }

    // --- structural elements ---

    pub fn add_column(&mut self, column: Column) -> ColumnId {
        self.columns.insert(column)
    }

    pub fn remove_column(&mut self, id: ColumnId) {
        self.columns.remove(id);
    }

    #[must_use]
    pub fn columns(&self) -> &SlotMap<ColumnId, Column> {
        &self.columns
    }

    pub fn add_beam(&mut self, beam: Beam) -> BeamId {
        self.beams.insert(beam)
    }

    pub fn remove_beam(&mut self, id: BeamId) {
        self.beams.remove(id);
    }

    #[must_use]
    pub fn beams(&self) -> &SlotMap<BeamId, Beam> {
        &self.beams
    }

    pub fn add_slab(&mut self, slab: Slab) -> SlabId {
        self.slabs.insert(slab)
    }

    pub fn remove_slab(&mut self, id: SlabId) {
        self.slabs.remove(id);
    }

    #[must_use]
    pub fn slabs(&self) -> &SlotMap<SlabId, Slab> {
        &self.slabs
    }

    // --- render-time join queries ---

    /// All joins of one wall against the rest of the set.
    #[must_use]
    pub fn find_joins(&self, wall: WallId) -> Vec<JoinInfo> {
        FindJoins::new(wall).execute(&self.walls)
    }

    /// The wall's render polygon with mitered corners.
    #[must_use]
    pub fn wall_contour(&self, wall: WallId) -> Vec<Point2> {
        let Some(w) = self.walls.get(wall) else {
            return Vec::new();
        };
        corner::wall_contour(w, &self.find_joins(wall))
    }

    // --- derived state ---

    /// Rebuilds rooms and auto dimensions. Invoked by every structural
    /// mutator; callers mutating walls through other means call it
    /// directly.
    pub fn rebuild(&mut self) {
        self.rebuild_rooms();
        self.rebuild_auto_dimensions();
    }

    fn rebuild_rooms(&mut self) {
        self.rooms.clear();
        for room in DetectRooms::new().execute(&self.walls) {
            self.rooms.insert(room);
        }
        debug!(rooms = self.rooms.len(), "rebuilt rooms");
    }

    /// Per-material areas and volumes over the walls' layer build-ups,
    /// optionally restricted to one work state. Walls without a type are
    /// skipped.
    #[must_use]
    pub fn material_quantities(
        &self,
        filter: Option<WorkState>,
    ) -> BTreeMap<String, MaterialQuantity> {
        let mut out: BTreeMap<String, MaterialQuantity> = BTreeMap::new();
        for wall in self.walls.values() {
            if filter.is_some_and(|state| state != wall.work_state) {
                continue;
            }
            let Some(ty) = wall.wall_type.and_then(|t| self.wall_types.get(t)) else {
                continue;
            };
            let face_area_m2 = wall.length() * wall.height / 1.0e6;
            for layer in &ty.layers {
                let q = out.entry(layer.material.clone()).or_default();
                q.area_m2 += face_area_m2;
                q.volume_m3 += face_area_m2 * layer.thickness / 1.0e3;
            }
        }
        out
    }
}
