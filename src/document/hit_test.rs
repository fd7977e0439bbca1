use crate::math::distance::point_to_segment;
use crate::math::{polygon, Point2};
use crate::model::{Element, WallId};

use super::Document;

impl Document {
    /// Finds the topmost element at a point.
    ///
    /// Priority runs specific before broad — openings, dimensions, walls,
    /// columns, beams, slabs, rooms — so a door wins over its host wall
    /// and a room only matches when nothing else is under the cursor.
    #[must_use]
    pub fn hit_test(&self, point: &Point2, tolerance: f64) -> Option<Element> {
        for (id, opening) in &self.openings {
            let Some(wall) = self.walls.get(opening.wall) else {
                // Stale host id: skip, never assume referential integrity.
                continue;
            };
            let (a, b) = opening.span_on(wall.length());
            let s0 = wall.point_along(a);
            let s1 = wall.point_along(b);
            if point_to_segment(point, &s0, &s1).distance <= wall.thickness() * 0.5 + tolerance
            {
                return Some(Element::Opening(id));
            }
        }

        for (id, dim) in &self.dimensions {
            let (a, b) = dim.render_line();
            if point_to_segment(point, &a, &b).distance <= tolerance {
                return Some(Element::Dimension(id));
            }
        }

        for (id, wall) in &self.walls {
            if point_to_segment(point, &wall.start, &wall.end).distance
                <= wall.thickness() * 0.5 + tolerance
            {
                return Some(Element::Wall(id));
            }
        }

        for (id, column) in &self.columns {
            let dx = (point.x - column.center.x).abs();
            let dy = (point.y - column.center.y).abs();
            if dx <= column.width * 0.5 + tolerance && dy <= column.depth * 0.5 + tolerance {
                return Some(Element::Column(id));
            }
        }

        for (id, beam) in &self.beams {
            if point_to_segment(point, &beam.start, &beam.end).distance
                <= beam.width * 0.5 + tolerance
            {
                return Some(Element::Beam(id));
            }
        }

        for (id, slab) in &self.slabs {
            if polygon::contains_point(&slab.contour, point) {
                return Some(Element::Slab(id));
            }
        }

        for (id, room) in &self.rooms {
            if room.contains(point) {
                return Some(Element::Room(id));
            }
        }

        None
    }

    /// Hit-tests and toggles wall selection. Other element kinds are
    /// reported without a selection flag change.
    pub fn select_at(&mut self, point: &Point2, tolerance: f64) -> Option<Element> {
        let hit = self.hit_test(point, tolerance)?;
        if let Element::Wall(id) = hit {
            if let Some(wall) = self.walls.get_mut(id) {
                wall.selected = !wall.selected;
            }
        }
        Some(hit)
    }

    pub fn clear_selection(&mut self) {
        for wall in self.walls.values_mut() {
            wall.selected = false;
        }
    }

    #[must_use]
    pub fn selected_walls(&self) -> Vec<WallId> {
        self.walls
            .iter()
            .filter(|(_, w)| w.selected)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Column, OpeningKind};

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square_doc(side: f64) -> Document {
        let mut doc = Document::new();
        let corners = [
            p(0.0, 0.0),
            p(side, 0.0),
            p(side, side),
            p(0.0, side),
        ];
        for i in 0..4 {
            doc.add_wall(corners[i], corners[(i + 1) % 4], 200.0);
        }
        doc
    }

    #[test]
    fn wall_hit_within_body() {
        let doc = square_doc(4000.0);
        let hit = doc.hit_test(&p(2000.0, 60.0), 10.0);
        assert!(matches!(hit, Some(Element::Wall(_))));
    }

    #[test]
    fn opening_beats_host_wall() {
        let mut doc = Document::new();
        let a = doc.add_wall(p(0.0, 0.0), p(4000.0, 0.0), 200.0);
        doc.add_opening(a, OpeningKind::Door, 0.5, 900.0).unwrap();

        let hit = doc.hit_test(&p(2000.0, 0.0), 10.0);
        assert!(matches!(hit, Some(Element::Opening(_))));
    }

    #[test]
    fn room_hit_away_from_walls() {
        let doc = square_doc(4000.0);
        let hit = doc.hit_test(&p(2000.0, 2000.0), 10.0);
        assert!(matches!(hit, Some(Element::Room(_))));
    }

    #[test]
    fn dimension_hit_on_its_offset_line() {
        let mut doc = Document::new();
        doc.add_wall(p(0.0, 0.0), p(4000.0, 0.0), 200.0);
        // The auto dimension renders 400 mm above the centerline.
        let hit = doc.hit_test(&p(2000.0, 400.0), 10.0);
        assert!(matches!(hit, Some(Element::Dimension(_))));
    }

    #[test]
    fn column_hit() {
        let mut doc = Document::new();
        doc.add_column(Column::new(p(1000.0, 1000.0), 400.0, 400.0));
        let hit = doc.hit_test(&p(1100.0, 950.0), 10.0);
        assert!(matches!(hit, Some(Element::Column(_))));
    }

    #[test]
    fn empty_space_hits_nothing() {
        let doc = square_doc(4000.0);
        assert!(doc.hit_test(&p(10_000.0, 10_000.0), 10.0).is_none());
    }

    #[test]
    fn selection_toggles_walls() {
        let mut doc = square_doc(4000.0);
        let hit = doc.select_at(&p(2000.0, 0.0), 10.0);
        assert!(matches!(hit, Some(Element::Wall(_))));
        assert_eq!(doc.selected_walls().len(), 1);

        doc.select_at(&p(2000.0, 0.0), 10.0);
        assert!(doc.selected_walls().is_empty());

        doc.select_at(&p(2000.0, 0.0), 10.0);
        doc.clear_selection();
        assert!(doc.selected_walls().is_empty());
    }
}
