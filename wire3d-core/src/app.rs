//! Viewer state shared by the front ends: what to draw, from where, and how
//! the camera responds to input.
use log::{error, trace};

use crate::camera::{Camera, Movement, Rotation};
use crate::error::RenderError;
use crate::geometry::Scene;
use crate::painter::{paint_queue, sort_queue, Surface};
use crate::projection::DisplaySettings;
use crate::queue::{compile_scene, DrawQueueItem};

/// How far one input event moves or turns the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// World units per movement command.
    pub step: f64,
    /// Degrees per rotation command.
    pub sensitivity: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            step: 10.0,
            sensitivity: 5.0,
        }
    }
}

/// Input already decoded by a front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Movement),
    Rotate(Rotation),
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub scene: Scene,
    pub camera: Camera,
    pub display: DisplaySettings,
    pub controls: ControlSettings,
}

impl AppState {
    pub fn new(scene: Scene, display: DisplaySettings) -> Self {
        Self {
            scene,
            camera: Camera::default(),
            display,
            controls: ControlSettings::default(),
        }
    }

    pub fn with_controls(mut self, controls: ControlSettings) -> Self {
        self.controls = controls;
        self
    }

    pub fn apply(&mut self, command: Command) {
        trace!("applying {command:?}");
        match command {
            Command::Move(movement) => self.camera.translate(movement, self.controls.step),
            Command::Rotate(rotation) => self.camera.rotate(rotation, self.controls.sensitivity),
            Command::Resize { width, height } => self.display.resize(width, height),
        }
    }

    /// The sorted draw queue for the current state.
    pub fn render_to_queue(&self) -> Result<Vec<DrawQueueItem>, RenderError> {
        let mut queue = compile_scene(&self.scene, &self.camera, &self.display)?;
        sort_queue(&mut queue);
        Ok(queue)
    }

    /// Clears `surface` and paints one frame, returning the number of items
    /// drawn. On error the surface is left cleared.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<usize, RenderError> {
        surface.clear_surface();
        match self.render_to_queue() {
            Ok(queue) => {
                paint_queue(&queue, surface);
                Ok(queue.len())
            }
            Err(e) => {
                error!("frame aborted: {e}");
                Err(e)
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Scene::demo(), DisplaySettings::default())
    }
}
