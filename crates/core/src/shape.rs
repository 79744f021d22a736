//! Fixed-capacity polygon model

use glam::Vec2;

use crate::error::EditorError;
use crate::geometry::distance_squared_point_to_segment;
use crate::view::ViewTransform;

/// Hard cap on vertices per shape.
pub const MAX_VERTICES: usize = 128;

/// An ordered vertex sequence. With three or more vertices it is a
/// closed polygon (edge `i` connects vertex `i` to `(i + 1) % len`),
/// with fewer it is an open polyline. Order is meaningful; vertices
/// have no identity beyond their position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    verts: Vec<Vec2>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a shape from an ordered point list, rejecting lists over
    /// capacity.
    pub fn from_points(points: Vec<Vec2>) -> Result<Self, EditorError> {
        if points.len() > MAX_VERTICES {
            return Err(EditorError::CapacityExceeded);
        }
        Ok(Self { verts: points })
    }

    pub fn len(&self) -> usize {
        self.verts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.verts.len() == MAX_VERTICES
    }

    pub fn points(&self) -> &[Vec2] {
        &self.verts
    }

    pub fn vertex(&self, index: usize) -> Vec2 {
        self.verts[index]
    }

    pub fn vertex_mut(&mut self, index: usize) -> &mut Vec2 {
        &mut self.verts[index]
    }

    /// Insert `point` next to the nearest edge and return the new
    /// vertex's index.
    ///
    /// With fewer than three vertices there is no meaningful edge set,
    /// so the point is appended. Otherwise every edge is scored by
    /// squared distance to `point` and the new vertex lands right
    /// after the winning edge's starting vertex. Ties keep the lowest
    /// edge index (first encountered wins under strict `<`).
    pub fn insert_near_edge(&mut self, point: Vec2) -> Result<usize, EditorError> {
        if self.is_full() {
            return Err(EditorError::CapacityExceeded);
        }

        if self.verts.len() < 3 {
            self.verts.push(point);
            return Ok(self.verts.len() - 1);
        }

        let mut closest_sq = f32::INFINITY;
        let mut edge = 0;
        for i in 0..self.verts.len() {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % self.verts.len()];
            let d = distance_squared_point_to_segment(point, a, b);
            if d < closest_sq {
                closest_sq = d;
                edge = i;
            }
        }

        self.verts.insert(edge + 1, point);
        Ok(edge + 1)
    }

    /// Remove the vertex at `index`, shifting later vertices down.
    /// Out-of-range indices are a programming error and panic.
    pub fn remove_vertex(&mut self, index: usize) {
        self.verts.remove(index);
    }

    /// Overwrite the vertex at `index`. No shifting.
    pub fn move_vertex(&mut self, index: usize, point: Vec2) {
        self.verts[index] = point;
    }

    /// First vertex (ascending index) whose screen position is within
    /// `radius` of `cursor`. The caller supplies the world-to-screen
    /// transform and the viewport center.
    pub fn hit_test(
        &self,
        view: &ViewTransform,
        center: Vec2,
        cursor: Vec2,
        radius: f32,
    ) -> Option<usize> {
        self.verts
            .iter()
            .position(|&v| view.world_to_screen(center, v).distance(cursor) <= radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn square() -> Shape {
        Shape::from_points(vec![
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_appends_below_three_vertices() {
        let mut shape = Shape::new();
        // Candidate position must not matter while the shape is a stub
        assert_eq!(shape.insert_near_edge(vec2(50.0, 50.0)).unwrap(), 0);
        assert_eq!(shape.insert_near_edge(vec2(-3.0, 0.0)).unwrap(), 1);
        assert_eq!(shape.insert_near_edge(vec2(1.0, 1.0)).unwrap(), 2);
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_insert_splits_nearest_edge() {
        let mut shape = square();
        // Just outside the bottom edge (edge 0: vertex 0 -> vertex 1)
        let index = shape.insert_near_edge(vec2(5.0, -1.0)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(shape.vertex(1), vec2(5.0, -1.0));
        assert_eq!(shape.len(), 5);
    }

    #[test]
    fn test_insert_near_right_edge() {
        let mut shape = square();
        // Edge 1 runs from vertex 1 to vertex 2
        let index = shape.insert_near_edge(vec2(11.0, 5.0)).unwrap();
        assert_eq!(index, 2);
    }

    #[test]
    fn test_insert_is_optimal_among_edges() {
        let mut shape = square();
        let point = vec2(4.0, -2.0);
        let before = shape.clone();
        let index = shape.insert_near_edge(point).unwrap();

        // The chosen edge must beat every edge of the pre-insert shape
        let chosen_edge = index - 1;
        let n = before.len();
        let chosen = distance_squared_point_to_segment(
            point,
            before.vertex(chosen_edge),
            before.vertex((chosen_edge + 1) % n),
        );
        for i in 0..n {
            let d =
                distance_squared_point_to_segment(point, before.vertex(i), before.vertex((i + 1) % n));
            assert!(chosen <= d, "edge {i} is closer than the chosen edge");
        }
    }

    #[test]
    fn test_insert_tie_breaks_to_lowest_edge() {
        // The square's center is equidistant from all four edges; the
        // scan keeps the first edge it saw.
        let mut shape = square();
        let index = shape.insert_near_edge(vec2(5.0, 5.0)).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_insert_fails_at_capacity() {
        let mut shape = Shape::new();
        for i in 0..MAX_VERTICES {
            shape.insert_near_edge(vec2(i as f32, 0.0)).unwrap();
        }
        assert!(shape.is_full());
        assert!(matches!(
            shape.insert_near_edge(vec2(0.5, 0.5)),
            Err(EditorError::CapacityExceeded)
        ));
        assert_eq!(shape.len(), MAX_VERTICES);
    }

    #[test]
    fn test_remove_then_reinsert_restores_count() {
        let mut shape = square();
        let point = shape.vertex(2);
        shape.remove_vertex(2);
        assert_eq!(shape.len(), 3);
        shape.insert_near_edge(point).unwrap();
        assert_eq!(shape.len(), 4);
    }

    #[test]
    fn test_remove_shifts_later_vertices() {
        let mut shape = square();
        shape.remove_vertex(1);
        assert_eq!(shape.vertex(1), vec2(10.0, 10.0));
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_move_vertex_overwrites_in_place() {
        let mut shape = square();
        shape.move_vertex(2, vec2(20.0, 20.0));
        assert_eq!(shape.vertex(2), vec2(20.0, 20.0));
        assert_eq!(shape.len(), 4);
    }

    #[test]
    fn test_hit_test_returns_first_match() {
        let view = ViewTransform::default();
        let center = vec2(100.0, 100.0);
        let shape = Shape::from_points(vec![vec2(0.0, 0.0), vec2(1.0, 1.0)]).unwrap();

        // Both vertices sit within the radius of a cursor at the center
        let hit = shape.hit_test(&view, center, vec2(100.0, 100.0), 5.0);
        assert_eq!(hit, Some(0));

        let miss = shape.hit_test(&view, center, vec2(200.0, 200.0), 5.0);
        assert_eq!(miss, None);
    }
}
