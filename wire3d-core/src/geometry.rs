/// Geometry primitives and their wireframe tessellation
use std::f32::consts::{FRAC_PI_2, PI};

use crate::math::Vec3;

/// Largest accepted subdivision; a sphere at this size is two million segments
pub const MAX_SUBDIVISION: u32 = 1024;

/// A packed `0xRRGGBBAA` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const BLACK: Rgba = Rgba(0x0000_00FF);
    pub const WHITE: Rgba = Rgba(0xFFFF_FFFF);
    pub const GRID: Rgba = Rgba(0xAAAA_AAFF);

    pub fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn a(self) -> u8 {
        self.0 as u8
    }
}

/// A world-space line segment with its draw color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Rgba,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3, color: Rgba) -> Self {
        Self { start, end, color }
    }
}

/// A sphere owned and mutated by the caller between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Point on the surface at the given latitude and longitude (radians)
    pub fn surface_point(&self, lat: f32, lon: f32) -> Vec3 {
        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        self.center
            + Vec3::new(
                self.radius * cos_lat * cos_lon,
                self.radius * sin_lat,
                self.radius * cos_lat * sin_lon,
            )
    }

    /// Tessellate into a quad lattice of latitude and longitude edges.
    ///
    /// Each of the `subdivision²` cells contributes its longitude edge
    /// followed by its latitude edge. Longitude is cyclic, so the last
    /// step of every band connects back to the first. Cells carry no
    /// diagonals.
    ///
    /// A non-positive or non-finite radius, a non-finite center, or a
    /// subdivision outside `1..=MAX_SUBDIVISION` yields no segments.
    pub fn tessellate(&self, subdivision: u32, color: Rgba) -> Vec<Segment> {
        if !(1..=MAX_SUBDIVISION).contains(&subdivision)
            || !(self.radius.is_finite() && self.radius > 0.0)
            || !self.center.iter().all(|c| c.is_finite())
        {
            log::debug!(
                "rejecting sphere (radius {}, subdivision {})",
                self.radius,
                subdivision
            );
            return Vec::new();
        }

        let n = subdivision;
        let lat_every = PI / n as f32;
        let lon_every = 2.0 * PI / n as f32;
        let lon_at = |j: u32| (j % n) as f32 * lon_every;

        let mut segments = Vec::with_capacity(2 * (n as usize).pow(2));
        for lat_index in 0..n {
            let lat = -FRAC_PI_2 + lat_index as f32 * lat_every;
            let next_lat = lat + lat_every;

            for lon_index in 0..n {
                let lon = lon_at(lon_index);
                let a = self.surface_point(lat, lon);
                let b = self.surface_point(lat, lon_at(lon_index + 1));
                let c = self.surface_point(next_lat, lon);

                segments.push(Segment::new(a, b, color));
                segments.push(Segment::new(a, c, color));
            }
        }
        segments
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 1.0)
    }
}

/// A square lattice in the XZ plane at Y = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub half_width: f32,
    pub subdivision: u32,
    pub color: Rgba,
    pub axis_color: Rgba,
}

impl GridSpec {
    pub fn new(half_width: f32, subdivision: u32) -> Self {
        Self {
            half_width,
            subdivision,
            ..Self::default()
        }
    }

    /// Tessellate into `2 * (subdivision + 1)` segments.
    ///
    /// The first `subdivision + 1` run parallel to Z at increasing X, the
    /// rest run parallel to X at increasing Z. The line through the origin
    /// (index `i` with `2i == subdivision`) takes `axis_color`. A subdivision
    /// outside `1..=MAX_SUBDIVISION` yields no segments.
    pub fn tessellate(&self) -> Vec<Segment> {
        let h = self.half_width;
        if !(1..=MAX_SUBDIVISION).contains(&self.subdivision) || !(h.is_finite() && h > 0.0) {
            log::debug!(
                "rejecting grid (half width {}, subdivision {})",
                h,
                self.subdivision
            );
            return Vec::new();
        }

        let n = self.subdivision;
        let every = 2.0 * h / n as f32;
        let color_for = |i: u32| {
            if 2 * i == n {
                self.axis_color
            } else {
                self.color
            }
        };

        let mut segments = Vec::with_capacity(2 * (n as usize + 1));
        for x_index in 0..=n {
            let x = -h + x_index as f32 * every;
            segments.push(Segment::new(
                Vec3::new(x, 0.0, -h),
                Vec3::new(x, 0.0, h),
                color_for(x_index),
            ));
        }
        for z_index in 0..=n {
            let z = -h + z_index as f32 * every;
            segments.push(Segment::new(
                Vec3::new(-h, 0.0, z),
                Vec3::new(h, 0.0, z),
                color_for(z_index),
            ));
        }
        segments
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            half_width: 2.0,
            subdivision: 10,
            color: Rgba::GRID,
            axis_color: Rgba::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_channels() {
        let c = Rgba(0x1234_56FF);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x12, 0x34, 0x56, 0xFF));
    }

    #[test]
    fn test_grid_segment_count_and_colors() {
        let grid = GridSpec::new(2.0, 10);
        let segments = grid.tessellate();
        assert_eq!(segments.len(), 22);

        for (i, segment) in segments.iter().enumerate() {
            let expected = if i == 5 || i == 16 {
                Rgba::BLACK
            } else {
                Rgba::GRID
            };
            assert_eq!(segment.color, expected, "segment {i}");
        }

        assert_eq!(segments[5].start.x, 0.0);
        assert_eq!(segments[16].start.z, 0.0);
    }

    #[test]
    fn test_grid_endpoints() {
        let segments = GridSpec::new(2.0, 10).tessellate();

        for (i, segment) in segments[..11].iter().enumerate() {
            let x = -2.0 + i as f32 * 0.4;
            assert!((segment.start - Vec3::new(x, 0.0, -2.0)).norm() < 1e-6);
            assert!((segment.end - Vec3::new(x, 0.0, 2.0)).norm() < 1e-6);
        }
        for (i, segment) in segments[11..].iter().enumerate() {
            let z = -2.0 + i as f32 * 0.4;
            assert!((segment.start - Vec3::new(-2.0, 0.0, z)).norm() < 1e-6);
            assert!((segment.end - Vec3::new(2.0, 0.0, z)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_grid_odd_subdivision_has_no_axis_line() {
        let segments = GridSpec::new(1.0, 3).tessellate();
        assert_eq!(segments.len(), 8);
        assert!(segments.iter().all(|s| s.color == Rgba::GRID));
    }

    #[test]
    fn test_grid_rejects_invalid_parameters() {
        assert!(GridSpec::new(2.0, 0).tessellate().is_empty());
        assert!(GridSpec::new(0.0, 10).tessellate().is_empty());
        assert!(GridSpec::new(-1.0, 10).tessellate().is_empty());
        assert!(GridSpec::new(2.0, MAX_SUBDIVISION + 1).tessellate().is_empty());
        assert!(GridSpec::new(2.0, u32::MAX).tessellate().is_empty());
        assert_eq!(
            GridSpec::new(2.0, MAX_SUBDIVISION).tessellate().len(),
            2 * (MAX_SUBDIVISION as usize + 1)
        );
    }

    #[test]
    fn test_sphere_segments_lie_on_surface() {
        let sphere = Sphere::new(Vec3::new(1.0, -2.0, 0.5), 1.5);
        let segments = sphere.tessellate(10, Rgba::BLACK);
        assert_eq!(segments.len(), 200);

        for segment in &segments {
            for p in [segment.start, segment.end] {
                assert!(((p - sphere.center).norm() - sphere.radius).abs() < 1e-4);
            }
            assert_eq!(segment.color, Rgba::BLACK);
        }
    }

    #[test]
    fn test_sphere_longitude_ring_is_closed() {
        let sphere = Sphere::default();
        let n = 10;
        let segments = sphere.tessellate(n, Rgba::BLACK);

        // The longitude edge of the last cell in a band ends at the band's
        // first sample.
        let band = 4;
        let first = segments[(band * n as usize) * 2];
        let last = segments[(band * n as usize + n as usize - 1) * 2];
        assert!((last.end - first.start).norm() < 1e-5);
    }

    #[test]
    fn test_sphere_starts_at_south_pole() {
        let sphere = Sphere::new(Vec3::zeros(), 2.0);
        let segments = sphere.tessellate(10, Rgba::BLACK);
        assert!((segments[0].start - Vec3::new(0.0, -2.0, 0.0)).norm() < 1e-5);

        // Latitude edges of the last band reach the north pole
        let last = segments[segments.len() - 1];
        assert!((last.end - Vec3::new(0.0, 2.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_sphere_rejects_invalid_parameters() {
        assert!(Sphere::new(Vec3::zeros(), 0.0).tessellate(10, Rgba::BLACK).is_empty());
        assert!(Sphere::new(Vec3::zeros(), -1.0).tessellate(10, Rgba::BLACK).is_empty());
        assert!(Sphere::default().tessellate(0, Rgba::BLACK).is_empty());
        assert!(Sphere::default()
            .tessellate(MAX_SUBDIVISION + 1, Rgba::BLACK)
            .is_empty());
        assert!(Sphere::default().tessellate(u32::MAX, Rgba::BLACK).is_empty());
    }
}
