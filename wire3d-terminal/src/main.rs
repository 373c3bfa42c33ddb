/// Wire3D Terminal Demo - Grid and sphere wireframe
///
/// Renders a ground grid and a sphere through a live camera.
/// Controls:
///   - WASD / R / F: Move the camera
///   - IJKL / U / O: Turn the camera
///   - Arrow keys / PgUp / PgDn: Move the sphere
///   - + / -: Grow or shrink the sphere
///   - Q/ESC: Quit
use clap::Parser;
use log::LevelFilter;
use std::{io, process};
use wire3d_core::{
    geometry::MAX_SUBDIVISION, CameraState, GridSpec, Projection, RenderSettings, Scene, Sphere,
    Vec3,
};
use wire3d_terminal::{logger, render_snapshot, TerminalApp};

#[derive(Debug, Parser)]
#[command(name = "wire3d-terminal")]
#[command(version)]
#[command(about = "Real-time wireframe grid and sphere in the terminal.", long_about = None)]
struct Args {
    /// Camera offset added to the base position, as `x,y,z`.
    #[arg(long, value_parser = parse_vec3, default_value = "0,1.9,-6.49", allow_hyphen_values = true)]
    camera_translate: Vec3,
    /// Camera Euler angles in radians, as `x,y,z`.
    #[arg(long, value_parser = parse_vec3, default_value = "0.26,0,0", allow_hyphen_values = true)]
    camera_rotate: Vec3,
    /// Camera base position, as `x,y,z`.
    #[arg(long, value_parser = parse_vec3, default_value = "0,1,-5", allow_hyphen_values = true)]
    camera_position: Vec3,
    /// Sphere center, as `x,y,z`.
    #[arg(long, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
    sphere_center: Vec3,
    /// Sphere radius.
    #[arg(long, default_value_t = 1.0)]
    radius: f32,
    /// Latitude and longitude subdivisions of the sphere.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISION as i64))]
    subdivision: u32,
    /// Half width of the ground grid.
    #[arg(long, default_value_t = 2.0)]
    grid_half_width: f32,
    /// Number of grid cells along each axis.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=MAX_SUBDIVISION as i64))]
    grid_subdivision: u32,
    /// Vertical field of view in radians.
    #[arg(long, default_value_t = 0.45)]
    fov: f32,
    /// Height of a terminal cell relative to its width.
    #[arg(long, default_value_t = 2.0)]
    cell_aspect: f32,
    /// Target frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Print a single frame to stdout and exit.
    #[arg(long)]
    snapshot: bool,
    /// Snapshot width in cells.
    #[arg(long, default_value_t = 100)]
    width: usize,
    /// Snapshot height in cells.
    #[arg(long, default_value_t = 40)]
    height: usize,
    /// Maximum log level shown in the status line.
    #[arg(long, value_parser = parse_level, default_value = "warn")]
    log_level: LevelFilter,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid component in `{s}`: {e}"))?;

    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma-separated values, got `{s}`")),
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("invalid log level `{s}`, expected off, error, warn, info, debug or trace"))
}

impl Args {
    fn scene(&self) -> Scene {
        Scene {
            camera: CameraState::new(
                self.camera_translate,
                self.camera_rotate,
                self.camera_position,
            ),
            sphere: Sphere::new(self.sphere_center, self.radius),
        }
    }

    fn settings(&self) -> RenderSettings {
        let defaults = RenderSettings::default();
        RenderSettings {
            projection: Projection {
                fov_y: self.fov,
                ..defaults.projection
            },
            grid: GridSpec::new(self.grid_half_width, self.grid_subdivision),
            sphere_subdivision: self.subdivision,
            ..defaults
        }
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    if args.snapshot {
        // Nothing else owns the terminal in snapshot mode
        match render_snapshot(
            &args.scene(),
            &args.settings(),
            args.width,
            args.height,
            args.cell_aspect,
        ) {
            Ok(canvas) => {
                println!("{}", canvas.to_text());
                return Ok(());
            }
            Err(err) => {
                eprintln!("error: {err}");
                process::exit(1);
            }
        }
    }

    logger::init(args.log_level)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("failed to install logger: {e}")))?;

    println!("Wire3D Terminal Renderer - Starting (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_millis(500));

    // Run the terminal app
    let mut app = TerminalApp::new(args.scene(), args.settings(), args.cell_aspect, args.fps)?;
    app.run()?;

    let camera = app.scene().camera;
    println!(
        "Final camera: translate ({:.2}, {:.2}, {:.2}) rotate ({:.2}, {:.2}, {:.2})",
        camera.translate.x,
        camera.translate.y,
        camera.translate.z,
        camera.rotate.x,
        camera.rotate.y,
        camera.rotate.z,
    );
    Ok(())
}
