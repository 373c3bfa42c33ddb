/// Per-frame world-to-screen pipeline
use crate::error::FrameError;
use crate::geometry::{GridSpec, Rgba, Segment, Sphere};
use crate::math::{multiply, Mat4, Vec3};
use crate::projection::{CameraState, Projection, Viewport};
use crate::transform::transform_point;

/// Consumer of screen-space line draw commands
pub trait LineSink {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba);
}

/// A recorded draw command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub color: Rgba,
}

impl LineSink for Vec<Line> {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        self.push(Line {
            x0,
            y0,
            x1,
            y1,
            color,
        });
    }
}

/// Caller-held state read at the start of every frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scene {
    pub camera: CameraState,
    pub sphere: Sphere,
}

/// Fixed rendering parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub projection: Projection,
    pub grid: GridSpec,
    pub sphere_subdivision: u32,
    pub sphere_color: Rgba,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            grid: GridSpec::default(),
            sphere_subdivision: 10,
            sphere_color: Rgba::BLACK,
        }
    }
}

/// Matrices for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMatrices {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_projection: Mat4,
    pub viewport: Mat4,
}

impl FrameMatrices {
    pub fn new(
        camera: &CameraState,
        projection: &Projection,
        viewport: &Viewport,
    ) -> Result<Self, FrameError> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(FrameError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let view = camera.view_matrix();
        let projection = projection.projection_matrix(viewport.aspect())?;
        Ok(Self {
            view,
            projection,
            view_projection: multiply(&view, &projection),
            viewport: viewport.viewport_matrix(),
        })
    }

    /// World space to screen space: NDC first, then pixels
    pub fn project(&self, point: &Vec3) -> Option<Vec3> {
        let ndc = transform_point(point, &self.view_projection)?;
        transform_point(&ndc, &self.viewport)
    }
}

/// Counters for one rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Round a screen position to the nearest pixel
fn to_pixel(screen: &Vec3) -> Option<(i32, i32)> {
    let x = screen.x.round();
    let y = screen.y.round();
    // i32::MAX is not representable in f32; it rounds up to 2^31
    let range = i32::MIN as f32..(i32::MAX as f32);
    if range.contains(&x) && range.contains(&y) {
        Some((x as i32, y as i32))
    } else {
        None
    }
}

/// Project segments and hand them to the sink.
///
/// A segment is skipped when either endpoint fails the perspective divide
/// or lands outside the representable pixel range.
pub fn draw_segments<S: LineSink + ?Sized>(
    segments: &[Segment],
    matrices: &FrameMatrices,
    sink: &mut S,
) -> FrameStats {
    let mut stats = FrameStats::default();
    for segment in segments {
        let start = matrices.project(&segment.start).and_then(|p| to_pixel(&p));
        let end = matrices.project(&segment.end).and_then(|p| to_pixel(&p));
        match (start, end) {
            (Some((x0, y0)), Some((x1, y1))) => {
                sink.draw_line(x0, y0, x1, y1, segment.color);
                stats.drawn += 1;
            }
            _ => stats.skipped += 1,
        }
    }
    stats
}

/// Render one frame of the grid and sphere
pub fn render_frame<S: LineSink + ?Sized>(
    scene: &Scene,
    settings: &RenderSettings,
    viewport: &Viewport,
    sink: &mut S,
) -> Result<FrameStats, FrameError> {
    let matrices = FrameMatrices::new(&scene.camera, &settings.projection, viewport)?;

    let mut segments = settings.grid.tessellate();
    segments.extend(
        scene
            .sphere
            .tessellate(settings.sphere_subdivision, settings.sphere_color),
    );

    let stats = draw_segments(&segments, &matrices, sink);
    log::trace!(
        "frame: {} segments drawn, {} skipped",
        stats.drawn,
        stats.skipped
    );
    Ok(stats)
}
