/// Character-cell surface for terminal rendering
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Color, Surface, Vec2};

/// Glyph for filled triangles and quads
pub const FILL_GLYPH: char = '█';
/// Glyph for line cells
pub const LINE_GLYPH: char = '*';
/// Glyph for point cells
pub const POINT_GLYPH: char = '@';

/// Largest disc a point covers, in cells. Canvas radii are far too big for
/// a character grid.
const MAX_POINT_RADIUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

/// A grid of cells where one canvas unit is one cell.
///
/// There is no depth buffer: later draws overwrite earlier ones.
pub struct CellSurface {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl CellSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Resizes and clears the grid.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width * height];
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = Some(Cell { glyph, color });
        }
    }

    /// True if a disc of radius `reach` around `center` can touch the grid.
    fn covers(&self, center: Vec2, reach: f64) -> bool {
        center.x.is_finite()
            && center.y.is_finite()
            && center.x >= -reach
            && center.y >= -reach
            && center.x < self.width as f64 + reach
            && center.y < self.height as f64 + reach
    }

    fn fill_triangle(&mut self, v: [Vec2; 3], color: Color) {
        if self.width == 0 || self.height == 0 || !all_finite(&v) {
            return;
        }

        // Bounding box, clipped to the grid
        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor().max(0.0);
        let max_x = v[0].x.max(v[1].x).max(v[2].x).ceil().min(self.width as f64 - 1.0);
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor().max(0.0);
        let max_y = v[0].y.max(v[1].y).max(v[2].y).ceil().min(self.height as f64 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for y in min_y as i64..=max_y as i64 {
            for x in min_x as i64..=max_x as i64 {
                let p = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(&v[0], &v[1], &v[2], &p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, FILL_GLYPH, color);
                    }
                }
            }
        }
    }

    /// Writes the grid at the top-left of the terminal.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                match self.cells[y * self.width + x] {
                    Some(Cell { glyph, color }) => {
                        writer.queue(SetForegroundColor(to_terminal_color(color)))?;
                        writer.queue(Print(glyph))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for CellSurface {
    fn clear_surface(&mut self) {
        self.cells.fill(None);
    }

    fn draw_point(&mut self, center: Vec2, radius: f64, color: Color) {
        let r = radius.min(MAX_POINT_RADIUS);
        let reach = r.ceil().max(0.0);
        // points just in front of the camera plane project arbitrarily far away
        if !self.covers(center, reach) {
            return;
        }
        let (cx, cy) = (center.x.floor() as i64, center.y.floor() as i64);
        let reach = reach as i64;
        for y in cy - reach..=cy + reach {
            for x in cx - reach..=cx + reach {
                let (dx, dy) = ((x - cx) as f64, (y - cy) as f64);
                if dx * dx + dy * dy <= r * r {
                    self.plot(x, y, POINT_GLYPH, color);
                }
            }
        }
    }

    fn draw_line(&mut self, segment: [Vec2; 2], color: Color, _width: f64) {
        if !all_finite(&segment) {
            return;
        }
        let bounds = Vec2::new(self.width as f64, self.height as f64);
        let Some([a, b]) = clip_to_rect(segment, bounds) else {
            return;
        };

        // DDA: one plotted cell per step along the major axis
        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0);
        let increment = delta / steps;
        let mut p = a;
        for _ in 0..=steps as usize {
            self.plot(p.x.floor() as i64, p.y.floor() as i64, LINE_GLYPH, color);
            p += increment;
        }
    }

    fn draw_filled_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.fill_triangle(points, color);
    }

    fn draw_filled_quad(&mut self, points: [Vec2; 4], color: Color) {
        // clipped quads are convex, so a fan covers them
        self.fill_triangle([points[0], points[1], points[2]], color);
        self.fill_triangle([points[0], points[2], points[3]], color);
    }
}

pub fn to_terminal_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn all_finite(points: &[Vec2]) -> bool {
    points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(v0: &Vec2, v1: &Vec2, v2: &Vec2, p: &Vec2) -> Option<(f64, f64, f64)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

/// Liang-Barsky clip of a segment to `[0, bounds.x) x [0, bounds.y)`.
///
/// Projected segments that end near the near plane can be millions of cells
/// long, so lines are clipped before stepping.
fn clip_to_rect(segment: [Vec2; 2], bounds: Vec2) -> Option<[Vec2; 2]> {
    let [a, b] = segment;
    let d = b - a;
    let max = bounds - Vec2::repeat(1e-9);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-d.x, a.x),
        (d.x, max.x - a.x),
        (-d.y, a.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }

    (t0 <= t1).then(|| [a + d * t0, a + d * t1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire3d_core::{AppState, Camera, DisplaySettings, Scene, Vec3};

    #[test]
    fn test_triangle_fill() {
        let mut surface = CellSurface::new(10, 10);
        surface.draw_filled_triangle(
            [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
            Color::RED,
        );
        assert_eq!(
            surface.cell(1, 1),
            Some(Cell {
                glyph: FILL_GLYPH,
                color: Color::RED
            })
        );
        assert_eq!(surface.cell(9, 9), None);
    }

    #[test]
    fn test_quad_fill_covers_both_halves() {
        let mut surface = CellSurface::new(10, 10);
        surface.draw_filled_quad(
            [
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(0.0, 10.0),
            ],
            Color::BLUE,
        );
        assert!(surface.cell(8, 1).is_some());
        assert!(surface.cell(1, 8).is_some());
    }

    #[test]
    fn test_horizontal_line() {
        let mut surface = CellSurface::new(10, 5);
        surface.draw_line([Vec2::new(0.5, 2.5), Vec2::new(9.5, 2.5)], Color::WHITE, 2.0);
        for x in 0..10 {
            assert_eq!(surface.cell(x, 2).map(|c| c.glyph), Some(LINE_GLYPH));
        }
        assert_eq!(surface.cell(0, 1), None);
    }

    #[test]
    fn test_huge_line_is_clipped() {
        let mut surface = CellSurface::new(20, 10);
        surface.draw_line(
            [Vec2::new(-1.0e9, 5.5), Vec2::new(1.0e9, 5.5)],
            Color::WHITE,
            2.0,
        );
        assert!(surface.cell(0, 5).is_some());
        assert!(surface.cell(19, 5).is_some());
    }

    #[test]
    fn test_line_outside_is_skipped() {
        let mut surface = CellSurface::new(10, 10);
        surface.draw_line([Vec2::new(-5.0, -5.0), Vec2::new(-1.0, -8.0)], Color::WHITE, 2.0);
        assert!((0..10).all(|y| (0..10).all(|x| surface.cell(x, y).is_none())));
    }

    #[test]
    fn test_far_off_points_are_skipped() {
        let mut surface = CellSurface::new(10, 10);
        for center in [
            Vec2::new(-4.0e301, 5.0),
            Vec2::new(5.0, 1.0e300),
            Vec2::new(f64::INFINITY, 5.0),
            Vec2::new(f64::NAN, f64::NAN),
        ] {
            surface.draw_point(center, 5.0, Color::RED);
        }
        assert!((0..10).all(|y| (0..10).all(|x| surface.cell(x, y).is_none())));

        // a disc centred just off the grid still reaches its edge cells
        surface.draw_point(Vec2::new(-0.5, 5.0), 5.0, Color::RED);
        assert!(surface.cell(0, 5).is_some());
    }

    #[test]
    fn test_point_grazing_the_camera_plane_renders() {
        let scene = Scene {
            points: vec![Vec3::new(1.0, 0.0, -1e-300)],
            ..Scene::default()
        };
        let mut state = AppState::new(scene, DisplaySettings::new(80, 24, 90.0));
        state.camera = Camera::new(Vec3::zeros());
        let mut surface = CellSurface::new(80, 24);
        assert_eq!(state.render(&mut surface).unwrap(), 1);
        assert!((0..24).all(|y| (0..80).all(|x| surface.cell(x, y).is_none())));
    }

    #[test]
    fn test_later_draws_win() {
        let mut surface = CellSurface::new(10, 10);
        surface.draw_point(Vec2::new(5.0, 5.0), 5.0, Color::RED);
        surface.draw_point(Vec2::new(5.0, 5.0), 5.0, Color::GREEN);
        assert_eq!(surface.cell(5, 5).map(|c| c.color), Some(Color::GREEN));
        assert!(surface.cell(7, 5).is_none());

        surface.clear_surface();
        assert!(surface.cell(5, 5).is_none());
    }
}
