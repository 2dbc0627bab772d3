//! wire3d core library - stateless 3D to 2D rendering pipeline
//!
//! A scene of points, lines and indexed meshes is moved into camera space,
//! clipped against the near plane, projected onto a canvas and depth sorted
//! into a draw queue. Front ends only implement [`Surface`].

pub mod app;
pub mod camera;
pub mod clip;
pub mod color;
pub mod error;
pub mod geometry;
pub mod math;
pub mod obj;
pub mod painter;
pub mod projection;
pub mod queue;
pub mod solids;

// Re-export commonly used types
pub use app::{AppState, Command, ControlSettings};
pub use camera::{Camera, Movement, Rotation};
pub use color::Color;
pub use error::{PrimitiveRef, RenderError};
pub use geometry::{Object, Scene};
pub use math::{Mat3, Vec2, Vec3};
pub use painter::{DrawCall, DrawLog, Surface};
pub use projection::DisplaySettings;
pub use queue::{compile_scene, DrawQueueItem, DrawShape};
