use std::time::Duration;

use minifb::{Key, Window, WindowOptions};

use crate::{
    error::RuntimeError,
    graphics::{Canvas, CanvasFactory, KeyId},
};

/// Frame pacing for `present`, roughly 60 frames per second.
const FRAME_TIME: Duration = Duration::from_micros(16600);

/// Opens [`WindowCanvas`]es. This is the production factory wired up by
/// the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowFactory;

impl CanvasFactory for WindowFactory {
    fn open(&self, width: i64, height: i64, title: &str) -> Result<Box<dyn Canvas>, RuntimeError> {
        WindowCanvas::open(width, height, title).map(|canvas| Box::new(canvas) as Box<dyn Canvas>)
    }
}

/// A minifb window with a CPU-side ARGB framebuffer.
///
/// Drawing primitives write into the buffer; `present` pushes the buffer
/// to the window and drains events. Out-of-range coordinates are clipped.
pub struct WindowCanvas {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    open: bool,
}

impl WindowCanvas {
    /// Opens a `width` x `height` window titled `title`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::WindowCreation`] when minifb refuses the
    /// dimensions or the display is unavailable.
    pub fn open(width: i64, height: i64, title: &str) -> Result<Self, RuntimeError> {
        let width = width.clamp(1, 8192) as usize;
        let height = height.clamp(1, 8192) as usize;

        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|err| RuntimeError::WindowCreation { details: err.to_string() })?;
        window.limit_update_rate(Some(FRAME_TIME));

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
            open: true,
        })
    }

    fn put(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x] = color;
        }
    }

    fn horizontal_span(&mut self, x1: i64, x2: i64, y: i64, color: u32) {
        let (from, to) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        for x in from..=to {
            self.put(x, y, color);
        }
    }

    /// Plots a circle outline with the midpoint algorithm.
    fn outline_circle(&mut self, cx: i64, cy: i64, radius: i64, color: u32) {
        let mut x = 0;
        let mut y = radius;
        let mut d = 3 - 2 * radius;

        while x <= y {
            self.put(cx + x, cy + y, color);
            self.put(cx - x, cy + y, color);
            self.put(cx + x, cy - y, color);
            self.put(cx - x, cy - y, color);
            self.put(cx + y, cy + x, color);
            self.put(cx - y, cy + x, color);
            self.put(cx + y, cy - x, color);
            self.put(cx - y, cy - x, color);

            if d < 0 {
                d += 4 * x + 6;
            } else {
                d += 4 * (x - y) + 10;
                y -= 1;
            }
            x += 1;
        }
    }
}

/// Packs 0–255 channels into minifb's `0RGB` pixel format.
fn pack_color(r: i64, g: i64, b: i64) -> u32 {
    let r = r.clamp(0, 255) as u32;
    let g = g.clamp(0, 255) as u32;
    let b = b.clamp(0, 255) as u32;
    (r << 16) | (g << 8) | b
}

fn map_key(key: KeyId) -> Key {
    match key {
        KeyId::A => Key::A,
        KeyId::D => Key::D,
        KeyId::W => Key::W,
        KeyId::S => Key::S,
        KeyId::Space => Key::Space,
        KeyId::Left => Key::Left,
        KeyId::Right => Key::Right,
        KeyId::Up => Key::Up,
        KeyId::Down => Key::Down,
        KeyId::Escape => Key::Escape,
    }
}

impl Canvas for WindowCanvas {
    fn clear(&mut self, r: i64, g: i64, b: i64) {
        let color = pack_color(r, g, b);
        self.buffer.fill(color);
    }

    fn draw_pixel(&mut self, x: i64, y: i64, r: i64, g: i64, b: i64) {
        self.put(x, y, pack_color(r, g, b));
    }

    fn draw_rect(&mut self, x: i64, y: i64, w: i64, h: i64, r: i64, g: i64, b: i64, filled: i64) {
        if w <= 0 || h <= 0 {
            return;
        }
        let color = pack_color(r, g, b);
        if filled != 0 {
            for row in y..y + h {
                self.horizontal_span(x, x + w - 1, row, color);
            }
        } else {
            self.horizontal_span(x, x + w - 1, y, color);
            self.horizontal_span(x, x + w - 1, y + h - 1, color);
            for row in y..y + h {
                self.put(x, row, color);
                self.put(x + w - 1, row, color);
            }
        }
    }

    /// Bresenham over the integer grid.
    fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, r: i64, g: i64, b: i64) {
        let color = pack_color(r, g, b);
        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x1, y1);

        loop {
            self.put(x, y, color);
            if x == x2 && y == y2 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_circle(&mut self, x: i64, y: i64, radius: i64, r: i64, g: i64, b: i64, filled: i64) {
        if radius < 0 {
            return;
        }
        let color = pack_color(r, g, b);
        if filled != 0 {
            for ry in -radius..=radius {
                let rx = ((radius * radius - ry * ry) as f64).sqrt() as i64;
                self.horizontal_span(x - rx, x + rx, y + ry, color);
            }
        } else {
            self.outline_circle(x, y, radius, color);
        }
    }

    fn handle_events(&mut self) {
        self.window.update();
        if !self.window.is_open() {
            self.open = false;
        }
    }

    fn present(&mut self) {
        if self
            .window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .is_err()
        {
            self.open = false;
        }
        if !self.window.is_open() {
            self.open = false;
        }
    }

    fn is_key_pressed(&self, key: KeyId) -> bool {
        self.window.is_key_down(map_key(key))
    }

    fn should_close(&self) -> bool {
        !self.open
    }
}
