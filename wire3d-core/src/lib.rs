/// Wire3D Core Library - Transform pipeline and wireframe tessellation
///
/// This library provides the stateless core of the wireframe renderer:
/// vector/matrix algebra, transform builders, primitive tessellation and
/// the per-frame world-to-screen pipeline. Drawing is delegated to a
/// caller-supplied `LineSink`.

pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use error::{FrameError, TransformError};
pub use frame::{draw_segments, render_frame, FrameMatrices, FrameStats, Line, LineSink, RenderSettings, Scene};
pub use geometry::{GridSpec, Rgba, Segment, Sphere};
pub use math::{Mat4, Vec3};
pub use projection::{CameraState, Projection, Viewport};
