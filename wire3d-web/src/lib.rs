/// wire3d Web - WASM viewer drawing onto a 2D canvas
///
/// The page owns the event listeners and forwards them:
///
/// ```js
/// const viewer = new WebViewer("canvas");
/// document.addEventListener("keydown", (e) => viewer.key_down(e.key));
/// window.addEventListener("resize", () => viewer.resize(innerWidth, innerHeight));
/// ```
use std::f64::consts::TAU;
use std::sync::Once;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wire3d_core::{obj, AppState, Color, Command, Movement, Rotation, Surface, Vec2};

/// Maps a `KeyboardEvent.key` value to a camera command.
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "ArrowLeft" => Command::Move(Movement::Left),
        "ArrowRight" => Command::Move(Movement::Right),
        "ArrowUp" => Command::Move(Movement::Forward),
        "ArrowDown" => Command::Move(Movement::Backward),
        "i" => Command::Move(Movement::Up),
        "k" => Command::Move(Movement::Down),
        "a" => Command::Rotate(Rotation::YawLeft),
        "d" => Command::Rotate(Rotation::YawRight),
        "w" => Command::Rotate(Rotation::PitchUp),
        "s" => Command::Rotate(Rotation::PitchDown),
        _ => return None,
    };
    Some(command)
}

static INIT: Once = Once::new();

/// Routes panics and `log` records to the browser console. Later calls are
/// ignored; outside wasm32 there is no console and nothing is installed.
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        {
            console_error_panic_hook::set_once();
            wasm_logger::init(wasm_logger::Config::default());
        }
        debug!("console logging initialized");
    });
}

/// Radius handed to `arc`, or `None` when the canvas would reject it.
fn arc_radius(radius: f64) -> Option<f64> {
    (radius.is_finite() && radius >= 0.0).then_some(radius)
}

/// [`Surface`] backed by a `CanvasRenderingContext2d`.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas does not support 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("failed to cast canvas context"))?;
        Ok(Self { canvas, context })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn fill_polygon(&self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.context.begin_path();
        self.context.move_to(first.x, first.y);
        for p in rest {
            self.context.line_to(p.x, p.y);
        }
        self.context.close_path();
        self.context.set_fill_style_str(&color.to_hex());
        self.context.fill();
    }
}

impl Surface for CanvasSurface {
    fn clear_surface(&mut self) {
        let (width, height) = self.size();
        self.context.clear_rect(0.0, 0.0, f64::from(width), f64::from(height));
    }

    fn draw_point(&mut self, center: Vec2, radius: f64, color: Color) {
        let Some(radius) = arc_radius(radius) else {
            warn!("skipping point with radius {radius}");
            return;
        };
        self.context.begin_path();
        if let Err(e) = self.context.arc(center.x, center.y, radius, 0.0, TAU) {
            warn!("canvas rejected point at {center:?}: {e:?}");
            return;
        }
        self.context.set_fill_style_str(&color.to_hex());
        self.context.fill();
    }

    fn draw_line(&mut self, segment: [Vec2; 2], color: Color, width: f64) {
        let [a, b] = segment;
        self.context.begin_path();
        self.context.move_to(a.x, a.y);
        self.context.line_to(b.x, b.y);
        self.context.set_stroke_style_str(&color.to_hex());
        self.context.set_line_width(width);
        self.context.stroke();
    }

    fn draw_filled_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.fill_polygon(&points, color);
    }

    fn draw_filled_quad(&mut self, points: [Vec2; 4], color: Color) {
        self.fill_polygon(&points, color);
    }
}

/// Browser entry point: owns the viewer state and the canvas.
#[wasm_bindgen]
pub struct WebViewer {
    state: AppState,
    surface: CanvasSurface,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attaches to the canvas with id `canvas_id` and shows the demo scene
    /// at the canvas' current size.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebViewer, JsValue> {
        init_logging();
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("missing document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas element not found"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;

        let surface = CanvasSurface::new(canvas)?;
        let mut state = AppState::default();
        let (width, height) = surface.size();
        state.apply(Command::Resize { width, height });

        let mut viewer = WebViewer { state, surface };
        viewer.redraw();
        Ok(viewer)
    }

    /// Handles a `KeyboardEvent.key`; returns whether the key was bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        match command_for_key(key) {
            Some(command) => {
                self.state.apply(command);
                self.redraw();
                true
            }
            None => false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.apply(Command::Resize { width, height });
        let display = self.state.display;
        self.surface.resize(display.width, display.height);
        self.redraw();
    }

    /// Draws one frame and returns the number of items painted.
    pub fn render(&mut self) -> Result<u32, JsValue> {
        let drawn = self
            .state
            .render(&mut self.surface)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(drawn as u32)
    }

    /// Replaces the scene's objects with a mesh parsed from OBJ text.
    pub fn load_obj(&mut self, text: &str, scale: f64) -> Result<(), JsValue> {
        let object = obj::parse_obj(text, scale).map_err(|e| JsValue::from_str(&e.to_string()))?;
        debug!(
            "loaded OBJ mesh with {} vertices and {} triangles",
            object.vertices.len(),
            object.triangle_mesh.len()
        );
        self.state.scene.objects = vec![object];
        self.redraw();
        Ok(())
    }

    /// Camera position as `[x, y, z]`.
    pub fn camera_position(&self) -> Vec<f64> {
        self.state.camera.position.iter().copied().collect()
    }

    /// Camera orientation, row-major.
    pub fn camera_orientation(&self) -> Vec<f64> {
        self.state.camera.orientation.transpose().iter().copied().collect()
    }
}

impl WebViewer {
    fn redraw(&mut self) {
        // AppState::render already logs the failure through the console logger
        let _ = self.state.render(&mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_key_bindings() {
        assert_eq!(
            command_for_key("ArrowLeft"),
            Some(Command::Move(Movement::Left))
        );
        assert_eq!(
            command_for_key("ArrowUp"),
            Some(Command::Move(Movement::Forward))
        );
        assert_eq!(command_for_key("i"), Some(Command::Move(Movement::Up)));
        assert_eq!(
            command_for_key("w"),
            Some(Command::Rotate(Rotation::PitchUp))
        );
        assert_eq!(command_for_key("Escape"), None);
        assert_eq!(command_for_key("A"), None);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        assert!(INIT.is_completed());
    }

    #[test]
    fn test_invalid_arc_radius_is_rejected() {
        assert_eq!(arc_radius(5.0), Some(5.0));
        assert_eq!(arc_radius(0.0), Some(0.0));
        assert_eq!(arc_radius(-1.0), None);
        assert_eq!(arc_radius(f64::NAN), None);
        assert_eq!(arc_radius(f64::INFINITY), None);
    }
}
