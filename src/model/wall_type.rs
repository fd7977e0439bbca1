slotmap::new_key_type! {
    /// Unique identifier for a wall type in the document.
    pub struct WallTypeId;
}

/// Role of a layer within a wall build-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerFunction {
    Core,
    Finish,
    Insulation,
}

/// One material layer of a wall type.
#[derive(Debug, Clone)]
pub struct WallLayer {
    pub name: String,
    pub material: String,
    /// Layer thickness in mm.
    pub thickness: f64,
    pub function: LayerFunction,
}

/// A named, ordered list of material layers. Walls referencing a type take
/// its composite thickness; the estimate layers read per-material
/// quantities from it.
#[derive(Debug, Clone)]
pub struct WallType {
    pub name: String,
    pub layers: Vec<WallLayer>,
}

impl WallType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
        }
    }

    /// Appends a layer (builder style).
    #[must_use]
    pub fn with_layer(
        mut self,
        name: impl Into<String>,
        material: impl Into<String>,
        thickness: f64,
        function: LayerFunction,
    ) -> Self {
        self.layers.push(WallLayer {
            name: name.into(),
            material: material.into(),
            thickness,
            function,
        });
        self
    }

    /// Sum of the layer thicknesses.
    #[must_use]
    pub fn composite_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness).sum()
    }
}
