//! Scene-to-draw-queue compiler.
//!
//! Every primitive is moved into camera space, culled or clipped against the
//! near plane, projected, and tagged with a depth. The depth of a line or a
//! triangle always comes from its unclipped vertices so that the sort order
//! does not jump while the primitive crosses the near plane.

use log::debug;

use crate::camera::Camera;
use crate::clip::{clip_line, clip_triangle, ClippedPolygon};
use crate::color::Color;
use crate::error::{PrimitiveRef, RenderError};
use crate::geometry::{Object, Scene};
use crate::math::{Vec2, Vec3};
use crate::projection::{is_in_front, is_in_front_of, point_on_canvas, DisplaySettings};

/// Screen-space shape of a draw item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawShape {
    Point(Vec2),
    Line([Vec2; 2]),
    Triangle([Vec2; 3]),
    Quad([Vec2; 4]),
}

/// One entry of a frame's draw queue.
///
/// `depth` is a camera-space Z used only as a sort key: more negative is
/// further away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawQueueItem {
    pub shape: DrawShape,
    pub depth: f64,
    pub color: Color,
}

/// Compiles `scene` as seen by `camera` into an unsorted draw queue.
///
/// Fails on the first malformed primitive; no partial queue is returned.
pub fn compile_scene(
    scene: &Scene,
    camera: &Camera,
    display: &DisplaySettings,
) -> Result<Vec<DrawQueueItem>, RenderError> {
    let mut compiler = Compiler {
        display,
        queue: Vec::new(),
    };

    for point in &scene.points {
        compiler.push_point(&camera.point_to_camera(point), Scene::POINT_COLOR);
    }

    for (i, [start, end]) in scene.lines.iter().enumerate() {
        let start = camera.point_to_camera(start);
        let end = camera.point_to_camera(end);
        compiler
            .push_segment(&start, &end, Scene::LINE_COLOR)
            .map_err(|e| e.at(PrimitiveRef::Line(i)))?;
    }

    for (i, object) in scene.objects.iter().enumerate() {
        compiler.push_object(i, object, camera)?;
    }

    debug!("compiled {} draw items", compiler.queue.len());
    Ok(compiler.queue)
}

struct Compiler<'a> {
    display: &'a DisplaySettings,
    queue: Vec<DrawQueueItem>,
}

impl Compiler<'_> {
    fn project(&self, point: &Vec3) -> Vec2 {
        point_on_canvas(point, self.display)
    }

    fn push(&mut self, shape: DrawShape, depth: f64, color: Color) {
        self.queue.push(DrawQueueItem {
            shape,
            depth,
            color,
        });
    }

    fn push_point(&mut self, point: &Vec3, color: Color) {
        if is_in_front(point) {
            let shape = DrawShape::Point(self.project(point));
            self.push(shape, point.z, color);
        }
    }

    fn push_segment(&mut self, start: &Vec3, end: &Vec3, color: Color) -> Result<(), RenderError> {
        if let Some([a, b]) = clip_line(start, end, self.display.near_z)? {
            let shape = DrawShape::Line([self.project(&a), self.project(&b)]);
            self.push(shape, (start.z + end.z) / 2.0, color);
        }
        Ok(())
    }

    fn push_triangle(&mut self, points: &[Vec3; 3], color: Color) -> Result<(), RenderError> {
        let near_z = self.display.near_z;
        let depth = (points[0].z + points[1].z + points[2].z) / 3.0;
        let in_front = points.iter().filter(|p| is_in_front_of(p, near_z)).count();

        let shape = match in_front {
            0 => return Ok(()),
            3 => DrawShape::Triangle(points.map(|p| self.project(&p))),
            _ => match clip_triangle(points, near_z)? {
                ClippedPolygon::Triangle(clipped) => {
                    DrawShape::Triangle(clipped.map(|p| self.project(&p)))
                }
                ClippedPolygon::Quad(clipped) => DrawShape::Quad(clipped.map(|p| self.project(&p))),
            },
        };
        self.push(shape, depth, color);
        Ok(())
    }

    fn push_object(&mut self, index: usize, object: &Object, camera: &Camera) -> Result<(), RenderError> {
        let vertices: Vec<Vec3> = object
            .vertices
            .iter()
            .map(|v| camera.point_to_camera(v))
            .collect();
        let lookup = |i: usize| {
            vertices.get(i).copied().ok_or(RenderError::VertexIndexOutOfRange {
                index: i,
                len: vertices.len(),
            })
        };

        for (edge, &[a, b]) in object.edges.iter().enumerate() {
            let at = PrimitiveRef::Edge {
                object: index,
                edge,
            };
            let resolve = |i| lookup(i).map_err(|e| e.at(at));
            let (start, end) = (resolve(a)?, resolve(b)?);
            self.push_segment(&start, &end, object.color)
                .map_err(|e| e.at(at))?;
        }

        for (triangle, &[a, b, c]) in object.triangle_mesh.iter().enumerate() {
            let at = PrimitiveRef::Triangle {
                object: index,
                triangle,
            };
            let resolve = |i| lookup(i).map_err(|e| e.at(at));
            let points = [resolve(a)?, resolve(b)?, resolve(c)?];
            self.push_triangle(&points, object.triangle_mesh_color)
                .map_err(|e| e.at(at))?;
        }
        Ok(())
    }
}
