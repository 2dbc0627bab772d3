/// wire3d terminal viewer
///
/// Renders the demo scene, a built-in solid or an OBJ mesh in the terminal.
/// Controls:
///   - Arrow keys: move left/right/forward/back
///   - I/K: move up/down
///   - A/D: yaw, W/S: pitch
///   - Q/ESC: Quit
///
/// Log output goes to stderr; redirect it (`2>wire3d.log`) when raising the
/// level above the default `warn`.
use anyhow::{anyhow, bail, Context, Result};
use log::info;
use std::env;
use wire3d_core::{obj, solids, AppState, ControlSettings, DisplaySettings, Scene};
use wire3d_terminal::TerminalApp;

const USAGE: &str = "Usage: wire3d-terminal [--obj <path>] [--scale <f>] [--solid <name>] \
                     [--fov <deg>] [--step <units>] [--sensitivity <deg>] [--log <filter>]";

fn main() -> Result<()> {
    let options = CliOptions::parse(env::args().skip(1))?;
    init_logging(options.log_filter.as_deref());

    let mut scene = Scene::demo();
    if let Some(name) = &options.solid {
        let solid = solids::by_name(name).ok_or_else(|| {
            anyhow!(
                "unknown solid `{name}`; expected one of {}",
                solids::NAMES.join(", ")
            )
        })?;
        scene.objects = vec![solid];
    }
    if let Some(path) = &options.obj {
        let object = obj::load_obj(path, options.scale)
            .with_context(|| format!("failed to load mesh {path}"))?;
        info!(
            "loaded {path}: {} vertices, {} triangles",
            object.vertices.len(),
            object.triangle_mesh.len()
        );
        scene.objects = vec![object];
    }
    scene.validate().context("scene refers to missing vertices")?;

    let mut display = DisplaySettings::default();
    display.fov = options.fov;
    let state = AppState::new(scene, display).with_controls(ControlSettings {
        step: options.step,
        sensitivity: options.sensitivity,
    });

    let mut app = TerminalApp::new(state)?;
    app.run()?;
    Ok(())
}

fn init_logging(filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    if let Some(filter) = filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.init();
}

#[derive(Debug, PartialEq)]
struct CliOptions {
    obj: Option<String>,
    scale: f64,
    solid: Option<String>,
    fov: f64,
    step: f64,
    sensitivity: f64,
    log_filter: Option<String>,
}

impl Default for CliOptions {
    fn default() -> Self {
        let controls = ControlSettings::default();
        Self {
            obj: None,
            scale: 1.0,
            solid: None,
            fov: DisplaySettings::default().fov,
            step: controls.step,
            sensitivity: controls.sensitivity,
            log_filter: None,
        }
    }
}

impl CliOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| anyhow!("{arg} needs a value\n{USAGE}"));
            match arg.as_str() {
                "--obj" => options.obj = Some(value()?),
                "--solid" => options.solid = Some(value()?),
                "--log" => options.log_filter = Some(value()?),
                "--scale" => options.scale = parse_number(&arg, &value()?)?,
                "--fov" => options.fov = parse_number(&arg, &value()?)?,
                "--step" => options.step = parse_number(&arg, &value()?)?,
                "--sensitivity" => options.sensitivity = parse_number(&arg, &value()?)?,
                "-h" | "--help" => bail!("{USAGE}"),
                other => bail!("Unknown argument: {other}\n{USAGE}"),
            }
        }
        if !(options.fov > 0.0 && options.fov < 180.0) {
            bail!("--fov must be between 0 and 180 degrees, got {}", options.fov);
        }
        Ok(options)
    }
}

fn parse_number(flag: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .with_context(|| format!("{flag} expects a number, got `{value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).unwrap();
        assert_eq!(options, CliOptions::default());
        assert_eq!(options.fov, 90.0);
        assert_eq!(options.step, 10.0);
    }

    #[test]
    fn test_all_flags() {
        let options = parse(&[
            "--obj", "teapot.obj", "--scale", "20", "--fov", "60", "--step", "2.5",
            "--sensitivity", "1", "--log", "debug",
        ])
        .unwrap();
        assert_eq!(options.obj.as_deref(), Some("teapot.obj"));
        assert_eq!(options.scale, 20.0);
        assert_eq!(options.fov, 60.0);
        assert_eq!(options.step, 2.5);
        assert_eq!(options.sensitivity, 1.0);
        assert_eq!(options.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&["--scale"]).is_err());
        assert!(parse(&["--scale", "big"]).is_err());
        assert!(parse(&["--fov", "180"]).is_err());
        assert!(parse(&["--wat"]).is_err());
    }
}
