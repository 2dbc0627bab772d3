/// Example: Load an OBJ file and print the frame it compiles to
///
/// Usage: cargo run --example load_obj -- path/to/file.obj [scale]
use anyhow::{Context, Result};
use std::env;
use wire3d_core::{obj, AppState, DisplaySettings, DrawCall, DrawLog, Scene};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let scene = match args.next() {
        Some(path) => {
            let scale = match args.next() {
                Some(s) => s.parse().context("scale must be a number")?,
                None => 1.0,
            };
            let object = obj::load_obj(&path, scale)
                .with_context(|| format!("failed to load {path}"))?;
            println!(
                "Loaded {} vertices, {} edges, {} triangles",
                object.vertices.len(),
                object.edges.len(),
                object.triangle_mesh.len()
            );
            Scene::axes(200.0).with_object(object)
        }
        None => {
            eprintln!("No OBJ file provided, using the demo scene...");
            Scene::demo()
        }
    };

    let state = AppState::new(scene, DisplaySettings::default());
    let mut log = DrawLog::new();
    let drawn = state.render(&mut log)?;

    let (mut points, mut lines, mut polygons) = (0, 0, 0);
    for call in &log.calls {
        match call {
            DrawCall::Point { .. } => points += 1,
            DrawCall::Line { .. } => lines += 1,
            DrawCall::Triangle { .. } | DrawCall::Quad { .. } => polygons += 1,
            DrawCall::Clear => {}
        }
    }
    println!("{drawn} items: {points} points, {lines} lines, {polygons} polygons");
    Ok(())
}
