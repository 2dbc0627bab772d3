//! Scene description: loose points, loose lines and indexed meshes
use crate::color::Color;
use crate::error::RenderError;
use crate::math::Vec3;

/// A world-space mesh drawn as a wireframe and/or filled triangles.
///
/// `edges` and `triangle_mesh` index into `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<[usize; 2]>,
    pub color: Color,
    pub triangle_mesh: Vec<[usize; 3]>,
    pub triangle_mesh_color: Color,
}

impl Object {
    pub fn new(vertices: Vec<Vec3>, color: Color, triangle_mesh_color: Color) -> Self {
        Self {
            vertices,
            edges: Vec::new(),
            color,
            triangle_mesh: Vec::new(),
            triangle_mesh_color,
        }
    }

    pub fn with_edges(mut self, edges: Vec<[usize; 2]>) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_triangles(mut self, triangles: Vec<[usize; 3]>) -> Self {
        self.triangle_mesh = triangles;
        self
    }

    /// Looks up a vertex, failing instead of panicking on a bad index.
    pub fn vertex(&self, index: usize) -> Result<&Vec3, RenderError> {
        self.vertices
            .get(index)
            .ok_or(RenderError::VertexIndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    /// Checks that every edge and triangle refers to an existing vertex.
    pub fn validate(&self) -> Result<(), RenderError> {
        let indices = self
            .edges
            .iter()
            .flatten()
            .chain(self.triangle_mesh.iter().flatten());
        for &index in indices {
            self.vertex(index)?;
        }
        Ok(())
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }
}

/// Everything compiled into one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub points: Vec<Vec3>,
    pub lines: Vec<[Vec3; 2]>,
    pub objects: Vec<Object>,
}

impl Scene {
    pub const POINT_COLOR: Color = Color::RED;
    pub const LINE_COLOR: Color = Color::WHITE;

    pub fn new() -> Self {
        Self::default()
    }

    /// The three world axes from `-length` to `length`, each with a small
    /// arrow head at its positive end.
    pub fn axes(length: f64) -> Self {
        let x = Vec3::new(length, 0.0, 0.0);
        let y = Vec3::new(0.0, length, 0.0);
        let z = Vec3::new(0.0, 0.0, length);
        let lines = vec![
            [-x, x],
            [-y, y],
            [-z, z],
            [x, Vec3::new(length - 10.0, 5.0, 0.0)],
            [x, Vec3::new(length - 10.0, -5.0, 0.0)],
            [y, Vec3::new(5.0, length - 10.0, 0.0)],
            [y, Vec3::new(-5.0, length - 10.0, 0.0)],
            [z, Vec3::new(5.0, 0.0, length - 10.0)],
            [z, Vec3::new(-5.0, 0.0, length - 10.0)],
        ];
        Self {
            lines,
            ..Self::default()
        }
    }

    /// Axes, one marker point and a triangular prism.
    pub fn demo() -> Self {
        let mut scene = Self::axes(200.0);
        scene.points.push(Vec3::new(80.0, 50.0, 50.0));
        scene.objects.push(crate::solids::triangular_prism());
        scene
    }

    pub fn with_object(mut self, object: Object) -> Self {
        self.objects.push(object);
        self
    }

    /// Validates every object; see [`Object::validate`].
    pub fn validate(&self) -> Result<(), RenderError> {
        self.objects.iter().try_for_each(Object::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Object {
        Object::new(
            vec![Vec3::zeros(), Vec3::x(), Vec3::y()],
            Color::WHITE,
            Color::GRAY,
        )
        .with_edges(vec![[0, 1], [1, 2], [2, 0]])
        .with_triangles(vec![[0, 1, 2]])
    }

    #[test]
    fn test_valid_object() {
        assert_eq!(triangle().validate(), Ok(()));
    }

    #[test]
    fn test_bad_edge_index() {
        let object = triangle().with_edges(vec![[0, 3]]);
        assert_eq!(
            object.validate(),
            Err(RenderError::VertexIndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_bad_triangle_index() {
        let object = triangle().with_triangles(vec![[0, 1, 7]]);
        assert_eq!(
            object.validate(),
            Err(RenderError::VertexIndexOutOfRange { index: 7, len: 3 })
        );
    }

    #[test]
    fn test_axes() {
        let scene = Scene::axes(100.0);
        assert_eq!(scene.lines.len(), 9);
        assert!(scene.points.is_empty());
        assert_eq!(scene.lines[3][1], Vec3::new(90.0, 5.0, 0.0));
    }

    #[test]
    fn test_demo_scene_is_valid() {
        let scene = Scene::demo();
        assert_eq!(scene.points.len(), 1);
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.validate(), Ok(()));
    }

    #[test]
    fn test_translate() {
        let mut object = triangle();
        object.translate(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(object.vertices[1], Vec3::new(2.0, 2.0, 3.0));
    }
}
