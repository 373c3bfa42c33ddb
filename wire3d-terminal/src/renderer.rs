/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{LineSink, Rgba};

const BACKGROUND: Color = Color::Rgb {
    r: 0xF0,
    g: 0xF0,
    b: 0xF0,
};

/// Character canvas that rasterizes line draw commands into terminal cells
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<Rgba>>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(None);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<(char, Option<Rgba>)> {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            Some((self.char_buffer[idx], self.color_buffer[idx]))
        } else {
            None
        }
    }

    fn plot(&mut self, x: i32, y: i32, character: char, color: Rgba) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = Some(color);
    }

    /// Clip a line to the canvas (Liang-Barsky), returning the visible part
    fn clip(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let (fx0, fy0) = (x0 as f64, y0 as f64);
        let dx = x1 as f64 - fx0;
        let dy = y1 as f64 - fy0;
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [(-dx, fx0), (dx, max_x - fx0), (-dy, fy0), (dy, max_y - fy0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (fx0 + t0 * dx).round() as i32,
            (fy0 + t0 * dy).round() as i32,
            (fx0 + t1 * dx).round() as i32,
            (fy0 + t1 * dy).round() as i32,
        ))
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(BACKGROUND))?;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = match self.color_buffer[idx] {
                    Some(c) => Color::Rgb {
                        r: c.r(),
                        g: c.g(),
                        b: c.b(),
                    },
                    None => BACKGROUND,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// The canvas as plain text, one line per row
    pub fn to_text(&self) -> String {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LineSink for AsciiCanvas {
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
        let character = stroke_char(i64::from(x1) - i64::from(x0), i64::from(y1) - i64::from(y0));
        let Some((mut x, mut y, x1, y1)) = self.clip(x0, y0, x1, y1) else {
            return;
        };

        // Bresenham
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x, y, character, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Pick a stroke character from the line's screen direction (Y down)
fn stroke_char(dx: i64, dy: i64) -> char {
    let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());
    if ax == 0 && ay == 0 {
        '+'
    } else if ay * 2 <= ax {
        '-'
    } else if ax * 2 <= ay {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}
