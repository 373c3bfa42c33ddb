/// Terminal host for the wireframe renderer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wire3d_core::{render_frame, FrameError, RenderSettings, Scene, Viewport};

pub mod logger;
pub mod renderer;

pub use renderer::AsciiCanvas;

/// Translation step per key press
const MOVE_STEP: f32 = 0.1;
/// Rotation step per key press (radians)
const TURN_STEP: f32 = 0.05;

/// Outcome of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply a key press to the scene, the terminal stand-in for drag widgets
pub fn apply_key(scene: &mut Scene, code: KeyCode) -> Control {
    let camera = &mut scene.camera;
    let sphere = &mut scene.sphere;
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
        // Camera translate
        KeyCode::Char('a') => camera.translate_by(-MOVE_STEP, 0.0, 0.0),
        KeyCode::Char('d') => camera.translate_by(MOVE_STEP, 0.0, 0.0),
        KeyCode::Char('f') => camera.translate_by(0.0, -MOVE_STEP, 0.0),
        KeyCode::Char('r') => camera.translate_by(0.0, MOVE_STEP, 0.0),
        KeyCode::Char('s') => camera.translate_by(0.0, 0.0, -MOVE_STEP),
        KeyCode::Char('w') => camera.translate_by(0.0, 0.0, MOVE_STEP),
        // Camera rotate
        KeyCode::Char('i') => camera.rotate_by(-TURN_STEP, 0.0, 0.0),
        KeyCode::Char('k') => camera.rotate_by(TURN_STEP, 0.0, 0.0),
        KeyCode::Char('j') => camera.rotate_by(0.0, -TURN_STEP, 0.0),
        KeyCode::Char('l') => camera.rotate_by(0.0, TURN_STEP, 0.0),
        KeyCode::Char('u') => camera.rotate_by(0.0, 0.0, TURN_STEP),
        KeyCode::Char('o') => camera.rotate_by(0.0, 0.0, -TURN_STEP),
        // Sphere
        KeyCode::Left => sphere.center.x -= MOVE_STEP,
        KeyCode::Right => sphere.center.x += MOVE_STEP,
        KeyCode::Up => sphere.center.y += MOVE_STEP,
        KeyCode::Down => sphere.center.y -= MOVE_STEP,
        KeyCode::PageUp => sphere.center.z += MOVE_STEP,
        KeyCode::PageDown => sphere.center.z -= MOVE_STEP,
        KeyCode::Char('+') | KeyCode::Char('=') => sphere.radius += MOVE_STEP,
        KeyCode::Char('-') => sphere.radius -= MOVE_STEP,
        _ => {}
    }
    Control::Continue
}

/// Render a single frame into a fresh canvas
pub fn render_snapshot(
    scene: &Scene,
    settings: &RenderSettings,
    width: usize,
    height: usize,
    cell_aspect: f32,
) -> Result<AsciiCanvas, FrameError> {
    let mut canvas = AsciiCanvas::new(width, height);
    let viewport = Viewport::new(width as u32, height as u32).with_pixel_aspect(cell_aspect);
    render_frame(scene, settings, &viewport, &mut canvas)?;
    Ok(canvas)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Scene,
    settings: RenderSettings,
    canvas: AsciiCanvas,
    cell_aspect: f32,
    target_frame_time: Duration,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(
        scene: Scene,
        settings: RenderSettings,
        cell_aspect: f32,
        target_fps: u32,
    ) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            settings,
            canvas: AsciiCanvas::new(width as usize, canvas_rows(height)),
            cell_aspect,
            target_frame_time: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?)?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if apply_key(&mut self.scene, code) == Control::Quit {
                    self.running = false;
                }
            }
            Event::Resize(width, height) => {
                log::debug!("resized to {width}x{height}");
                self.canvas.resize(width as usize, canvas_rows(height));
                execute!(stdout(), terminal::Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        // Clear renderer
        self.canvas.clear();

        let viewport = Viewport::new(self.canvas.width() as u32, self.canvas.height() as u32)
            .with_pixel_aspect(self.cell_aspect);
        if let Err(err) = render_frame(&self.scene, &self.settings, &viewport, &mut self.canvas) {
            log::warn!("frame skipped: {err}");
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Draw status overlay below the canvas
        let row = self.canvas.height() as u16;
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(truncate(&self.status_line(), self.canvas.width())),
            cursor::MoveTo(0, row + 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkYellow),
            Print(truncate(
                &logger::last_message().unwrap_or_else(|| CONTROLS.to_string()),
                self.canvas.width()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let camera = &self.scene.camera;
        let sphere = &self.scene.sphere;
        format!(
            "FPS {:.1} | translate ({:.2}, {:.2}, {:.2}) rotate ({:.2}, {:.2}, {:.2}) | sphere ({:.2}, {:.2}, {:.2}) r {:.2}",
            self.fps,
            camera.translate.x,
            camera.translate.y,
            camera.translate.z,
            camera.rotate.x,
            camera.rotate.y,
            camera.rotate.z,
            sphere.center.x,
            sphere.center.y,
            sphere.center.z,
            sphere.radius,
        )
    }
}

const CONTROLS: &str =
    "WASD/R/F=Move IJKL/U/O=Turn Arrows/PgUp/PgDn=Sphere +/-=Radius Q=Quit";

/// Rows left for the canvas after the two status lines
fn canvas_rows(terminal_rows: u16) -> usize {
    (terminal_rows as usize).saturating_sub(2)
}

fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
