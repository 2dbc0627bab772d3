//! Depth sort and dispatch to a 2D drawing surface.
//!
//! This is a painter's algorithm, not a rasterizer: there is no per-pixel
//! depth test, so primitives whose geometry interpenetrates can be drawn in
//! the wrong order.

use crate::color::Color;
use crate::math::Vec2;
use crate::queue::{DrawQueueItem, DrawShape};

/// Radius of a drawn scene point, in surface units.
pub const POINT_RADIUS: f64 = 5.0;
/// Stroke width of drawn lines, in surface units.
pub const LINE_WIDTH: f64 = 2.0;

/// A canvas-like 2D target. Calls are synchronous and assumed to succeed.
pub trait Surface {
    fn clear_surface(&mut self);
    fn draw_point(&mut self, center: Vec2, radius: f64, color: Color);
    fn draw_line(&mut self, segment: [Vec2; 2], color: Color, width: f64);
    fn draw_filled_triangle(&mut self, points: [Vec2; 3], color: Color);
    fn draw_filled_quad(&mut self, points: [Vec2; 4], color: Color);
}

/// Sorts far-to-near (ascending depth). Equal depths keep their order.
pub fn sort_queue(queue: &mut [DrawQueueItem]) {
    queue.sort_by(|a, b| a.depth.total_cmp(&b.depth));
}

/// Paints an already sorted queue in order.
pub fn paint_queue<S: Surface + ?Sized>(queue: &[DrawQueueItem], surface: &mut S) {
    for item in queue {
        match item.shape {
            DrawShape::Point(center) => surface.draw_point(center, POINT_RADIUS, item.color),
            DrawShape::Line(segment) => surface.draw_line(segment, item.color, LINE_WIDTH),
            DrawShape::Triangle(points) => surface.draw_filled_triangle(points, item.color),
            DrawShape::Quad(points) => surface.draw_filled_quad(points, item.color),
        }
    }
}

/// A recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Point {
        center: Vec2,
        radius: f64,
        color: Color,
    },
    Line {
        segment: [Vec2; 2],
        color: Color,
        width: f64,
    },
    Triangle {
        points: [Vec2; 3],
        color: Color,
    },
    Quad {
        points: [Vec2; 4],
        color: Color,
    },
}

/// A surface that only records what it is asked to draw.
#[derive(Debug, Clone, Default)]
pub struct DrawLog {
    pub calls: Vec<DrawCall>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for DrawLog {
    fn clear_surface(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_point(&mut self, center: Vec2, radius: f64, color: Color) {
        self.calls.push(DrawCall::Point {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, segment: [Vec2; 2], color: Color, width: f64) {
        self.calls.push(DrawCall::Line {
            segment,
            color,
            width,
        });
    }

    fn draw_filled_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.calls.push(DrawCall::Triangle { points, color });
    }

    fn draw_filled_quad(&mut self, points: [Vec2; 4], color: Color) {
        self.calls.push(DrawCall::Quad { points, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(depth: f64) -> DrawQueueItem {
        DrawQueueItem {
            shape: DrawShape::Line([Vec2::zeros(), Vec2::new(depth, depth)]),
            depth,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_far_before_near() {
        for mut queue in [vec![line(-10.0), line(-5.0)], vec![line(-5.0), line(-10.0)]] {
            sort_queue(&mut queue);
            assert_eq!(queue[0].depth, -10.0);
            assert_eq!(queue[1].depth, -5.0);
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let mut a = line(-3.0);
        a.color = Color::RED;
        let mut b = line(-3.0);
        b.color = Color::BLUE;
        let mut queue = vec![a, line(-7.0), b];
        sort_queue(&mut queue);
        assert_eq!(queue[1].color, Color::RED);
        assert_eq!(queue[2].color, Color::BLUE);
    }

    #[test]
    fn test_dispatch_by_shape() {
        let p = Vec2::new(1.0, 2.0);
        let queue = [
            DrawQueueItem {
                shape: DrawShape::Point(p),
                depth: -1.0,
                color: Color::RED,
            },
            DrawQueueItem {
                shape: DrawShape::Triangle([p; 3]),
                depth: -1.0,
                color: Color::GRAY,
            },
            DrawQueueItem {
                shape: DrawShape::Quad([p; 4]),
                depth: -1.0,
                color: Color::GRAY,
            },
            line(-1.0),
        ];
        let mut log = DrawLog::new();
        paint_queue(&queue, &mut log);
        assert_eq!(
            log.calls[0],
            DrawCall::Point {
                center: p,
                radius: POINT_RADIUS,
                color: Color::RED
            }
        );
        assert!(matches!(log.calls[1], DrawCall::Triangle { .. }));
        assert!(matches!(log.calls[2], DrawCall::Quad { .. }));
        assert!(matches!(
            log.calls[3],
            DrawCall::Line { width, .. } if width == LINE_WIDTH
        ));
    }
}
