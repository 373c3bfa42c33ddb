use std::f32::consts::FRAC_PI_2;

use wire3d_core::{
    render_frame, CameraState, FrameMatrices, GridSpec, Line, RenderSettings, Rgba, Scene,
    Sphere, Vec3, Viewport,
};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;

fn scene_in_front_of_unit_sphere() -> Scene {
    Scene {
        camera: CameraState::new(Vec3::zeros(), Vec3::zeros(), Vec3::new(0.0, 0.0, -10.0)),
        sphere: Sphere::new(Vec3::zeros(), 1.0),
    }
}

#[test]
fn top_ring_projects_to_center_top() {
    let scene = scene_in_front_of_unit_sphere();
    let settings = RenderSettings::default();
    let viewport = Viewport::new(WIDTH, HEIGHT);
    let matrices = FrameMatrices::new(&scene.camera, &settings.projection, &viewport).unwrap();

    let n = settings.sphere_subdivision as usize;
    let segments = scene.sphere.tessellate(n as u32, Rgba::BLACK);
    let top_lat = -FRAC_PI_2 + (n as f32 - 1.0) * std::f32::consts::PI / n as f32;

    let ring: Vec<Vec3> = segments[(n - 1) * n * 2..]
        .iter()
        .step_by(2)
        .map(|s| s.start)
        .collect();
    assert_eq!(ring.len(), n);
    for p in &ring {
        assert!((p.y - top_lat.sin()).abs() < 1e-5);
    }

    let center = matrices.project(&scene.sphere.center).unwrap();
    for p in &ring {
        let screen = matrices.project(p).unwrap();
        assert!((screen.x - WIDTH as f32 / 2.0).abs() < WIDTH as f32 * 0.1);
        assert!(screen.y > 0.0);
        assert!(screen.y < center.y);
    }
}

#[test]
fn top_ring_sits_at_top_of_sphere_bounds() {
    let scene = scene_in_front_of_unit_sphere();
    let settings = RenderSettings {
        grid: GridSpec::new(2.0, 0),
        ..RenderSettings::default()
    };
    let viewport = Viewport::new(WIDTH, HEIGHT);

    let mut lines: Vec<Line> = Vec::new();
    let stats = render_frame(&scene, &settings, &viewport, &mut lines).unwrap();
    assert_eq!(stats.drawn, 200);
    assert_eq!(stats.skipped, 0);

    let ys = lines.iter().flat_map(|l| [l.y0, l.y1]);
    let top = ys.clone().min().unwrap() as f32;
    let bottom = ys.max().unwrap() as f32;
    assert!(bottom > top);

    let n = settings.sphere_subdivision as usize;
    for line in lines[(n - 1) * n * 2..].iter().step_by(2) {
        let relative = (line.y0 as f32 - top) / (bottom - top);
        assert!(relative < 0.15, "ring point at {relative} of sphere height");
    }
}

#[test]
fn moving_the_camera_back_shrinks_the_sphere() {
    let settings = RenderSettings {
        grid: GridSpec::new(2.0, 0),
        ..RenderSettings::default()
    };
    let viewport = Viewport::new(WIDTH, HEIGHT);

    let height_at = |distance: f32| {
        let mut scene = scene_in_front_of_unit_sphere();
        scene.camera.translate = Vec3::new(0.0, 0.0, 10.0 - distance);
        let mut lines: Vec<Line> = Vec::new();
        render_frame(&scene, &settings, &viewport, &mut lines).unwrap();
        let ys = lines.iter().flat_map(|l| [l.y0, l.y1]);
        ys.clone().max().unwrap() - ys.min().unwrap()
    };

    assert!(height_at(20.0) < height_at(10.0));
}

#[test]
fn frames_are_independent() {
    let scene = Scene::default();
    let settings = RenderSettings::default();
    let viewport = Viewport::new(WIDTH, HEIGHT);

    let mut first: Vec<Line> = Vec::new();
    let mut second: Vec<Line> = Vec::new();
    render_frame(&scene, &settings, &viewport, &mut first).unwrap();
    render_frame(&scene, &settings, &viewport, &mut second).unwrap();
    assert_eq!(first, second);
}
