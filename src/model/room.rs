use crate::math::polygon;
use crate::math::Point2;
use crate::model::wall::WallId;

slotmap::new_key_type! {
    /// Unique identifier for a room in the document.
    pub struct RoomId;
}

/// Default room ceiling height (mm).
pub const DEFAULT_CEILING_HEIGHT: f64 = 2700.0;

/// Room category, inferred from the user-assigned name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomCategory {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
    Toilet,
    Hallway,
    Office,
    Storage,
    Balcony,
    #[default]
    Undefined,
}

impl RoomCategory {
    /// Keyword match against the (lowercased) room name.
    #[must_use]
    pub fn infer(name: &str) -> Self {
        let n = name.to_lowercase();
        let table: [(&str, Self); 12] = [
            ("living", Self::Living),
            ("lounge", Self::Living),
            ("bed", Self::Bedroom),
            ("kitchen", Self::Kitchen),
            ("bath", Self::Bathroom),
            ("shower", Self::Bathroom),
            ("wc", Self::Toilet),
            ("toilet", Self::Toilet),
            ("hall", Self::Hallway),
            ("corridor", Self::Hallway),
            ("office", Self::Office),
            ("stor", Self::Storage),
        ];
        for (key, category) in table {
            if n.contains(key) {
                return category;
            }
        }
        if n.contains("balcon") || n.contains("terrace") {
            return Self::Balcony;
        }
        Self::Undefined
    }
}

/// A closed region enclosed by the wall network.
///
/// Rooms are derived entities: the detector rebuilds them wholesale on
/// every structural change, so they carry no identity across rebuilds
/// beyond spatial coincidence.
#[derive(Debug, Clone)]
pub struct Room {
    /// Contour in the detector's canonical cycle order.
    pub contour: Vec<Point2>,
    /// Signed area in mm²; the sign records the polygon winding.
    pub area: f64,
    pub perimeter: f64,
    /// Centroid, used to place the room label.
    pub label_point: Point2,
    pub name: String,
    /// Sequential index assigned by the detector.
    pub number: usize,
    pub category: RoomCategory,
    pub ceiling_height: f64,
    /// The walls whose centerline edges bound this room.
    pub walls: Vec<WallId>,
}

impl Room {
    /// Builds a room from a detected contour, deriving area, perimeter and
    /// label point.
    #[must_use]
    pub fn from_contour(contour: Vec<Point2>, number: usize, walls: Vec<WallId>) -> Self {
        let area = polygon::signed_area(&contour);
        let perimeter = polygon::perimeter(&contour);
        let label_point = polygon::centroid(&contour);
        Self {
            contour,
            area,
            perimeter,
            label_point,
            name: format!("Room {number}"),
            number,
            category: RoomCategory::Undefined,
            ceiling_height: DEFAULT_CEILING_HEIGHT,
            walls,
        }
    }

    /// Renames the room and re-infers its category.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.category = RoomCategory::infer(&self.name);
    }

    /// Unsigned area in m².
    #[must_use]
    pub fn area_m2(&self) -> f64 {
        self.area.abs() / 1.0e6
    }

    /// Point-in-polygon test against the room contour.
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        polygon::contains_point(&self.contour, p)
    }
}
