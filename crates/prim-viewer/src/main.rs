use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use prim_core::{PrimError, Result};
use prim_geometry::{GeometryKind, GeometryParams, ParamRange, ParamValue};
use prim_mesh::LineStyle;
use prim_viewer::{App, Tutorial, ViewerConfig};
use tracing::{error, info};

/// Milliseconds between frames of the headless loop.
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Parser)]
#[command(name = "primlab")]
#[command(about = "Parametric primitive viewer")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// JSON configuration file; command-line flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Number of frames to render before exiting
    #[arg(short, long, global = true)]
    frames: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parametric model with surface and line overlay
    Geometry {
        /// Primitive to build (plane, box, circle, ring, sphere, cylinder, cone, torus)
        #[arg(short, long)]
        kind: Option<GeometryKind>,

        /// Panel edit applied after startup, e.g. `radius=1.5`; repeatable
        #[arg(short, long = "set", value_parser = parse_assignment)]
        set: Vec<(String, ParamValue)>,

        /// Line overlay projection
        #[arg(short, long)]
        line_style: Option<LineStyleArg>,

        /// Print the final parameters as JSON
        #[arg(long)]
        dump_params: bool,
    },

    /// Box placed with position, rotation and scale
    Transform,

    /// Sphere drawn as point sprites
    Material {
        /// Sprite size in pixels
        #[arg(short, long)]
        size: Option<f64>,
    },

    /// List the parameters of a primitive with their ranges
    Describe {
        #[arg(short, long, default_value = "plane")]
        kind: GeometryKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LineStyleArg {
    /// Feature edges only
    Edges,
    /// Every triangle edge
    Wireframe,
}

impl From<LineStyleArg> for LineStyle {
    fn from(arg: LineStyleArg) -> Self {
        match arg {
            LineStyleArg::Edges => LineStyle::Edges,
            LineStyleArg::Wireframe => LineStyle::Wireframe,
        }
    }
}

fn parse_assignment(text: &str) -> std::result::Result<(String, ParamValue), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{text}'"))?;
    let value = ParamValue::parse(value)
        .ok_or_else(|| format!("'{value}' is not a number or boolean"))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> ExitCode {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=prim_scene=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "primlab failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }

    let mut edits = Vec::new();
    let mut dump_params = false;
    match cli.command {
        Some(Commands::Describe { kind }) => {
            describe(kind);
            return Ok(());
        }
        Some(Commands::Geometry { kind, set, line_style, dump_params: dump }) => {
            config.tutorial = Tutorial::Geometry;
            if let Some(kind) = kind {
                if kind != config.geometry.kind() {
                    config.geometry = GeometryParams::defaults(kind);
                }
            }
            if let Some(style) = line_style {
                config.line_style = style.into();
            }
            edits = set;
            dump_params = dump;
        }
        Some(Commands::Transform) => config.tutorial = Tutorial::Transform,
        Some(Commands::Material { size }) => {
            config.tutorial = Tutorial::Material;
            if let Some(size) = size {
                config.point_size = size;
            }
        }
        None => {}
    }

    let mut app = App::new(&config)?;
    for (name, value) in &edits {
        let applied = app.edit(name, *value)?;
        info!(name = %name, requested = %value, applied = %applied, "parameter set");
    }

    for i in 0..config.frames {
        app.frame(i as f64 * FRAME_INTERVAL_MS)?;
    }

    if let Some(frame) = app.renderer.last_frame() {
        println!(
            "{:?} tutorial, {} frame(s) at {}x{}",
            app.tutorial(),
            app.renderer.frames_rendered(),
            app.renderer.width,
            app.renderer.height
        );
        for draw in &frame.draws {
            println!("  {:<8} {:?} x{}", draw.name, draw.topology, draw.element_count);
        }
    }
    if let Some(controller) = app.controller() {
        println!(
            "  model {} after {} generation(s)",
            controller.params().kind(),
            controller.generations()
        );
        if dump_params {
            println!("{}", controller.params().to_json()?);
        }
    } else if dump_params {
        return Err(PrimError::InvalidOperation("--dump-params needs the geometry tutorial".into()));
    }

    let stats = app.shutdown()?;
    println!(
        "  gpu: {} uploads, {} disposals, peak {} live",
        stats.uploads, stats.disposals, stats.peak_live
    );
    Ok(())
}

fn describe(kind: GeometryKind) {
    let params = GeometryParams::defaults(kind);
    println!("{kind} parameters:");
    for spec in params.describe_parameters() {
        let value = params.get(spec.name).map(|v| v.to_string()).unwrap_or_default();
        let range = match spec.range {
            ParamRange::Float { min, max, step: Some(step) } => format!("{min}..{max} step {step}"),
            ParamRange::Float { min, max, step: None } => format!("{min}..{max}"),
            ParamRange::Int { min, max, step } => format!("{min}..{max} step {step}"),
            ParamRange::Toggle => "toggle".to_string(),
        };
        println!("  {:<16} {:<8} {:<20} ({:?})", spec.name, value, range, spec.unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("radius=1.5").unwrap(),
            ("radius".to_string(), ParamValue::Float(1.5))
        );
        assert_eq!(parse_assignment("openEnded=true").unwrap().1, ParamValue::Bool(true));
        assert_eq!(parse_assignment("segments=12").unwrap().1, ParamValue::Int(12));
        assert!(parse_assignment("radius").is_err());
        assert!(parse_assignment("radius=big").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "primlab",
            "geometry",
            "--kind",
            "torus",
            "--set",
            "arc=180",
            "--line-style",
            "wireframe",
            "--frames",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.frames, Some(3));
        match cli.command {
            Some(Commands::Geometry { kind, set, line_style, .. }) => {
                assert_eq!(kind, Some(GeometryKind::Torus));
                assert_eq!(set.len(), 1);
                assert!(matches!(line_style, Some(LineStyleArg::Wireframe)));
            }
            _ => panic!("expected geometry command"),
        }
    }
}
