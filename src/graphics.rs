use std::{cell::RefCell, collections::HashSet, rc::Rc};

use crate::error::RuntimeError;

/// The minifb-backed production window.
pub mod window;

pub use window::WindowFactory;

/// The keys `isKeyDown` can query, addressed by the names the language
/// accepts: `a d w s space left right up down escape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyId {
    /// `a`
    A,
    /// `d`
    D,
    /// `w`
    W,
    /// `s`
    S,
    /// `space`
    Space,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `up`
    Up,
    /// `down`
    Down,
    /// `escape`
    Escape,
}

impl KeyId {
    /// Resolves one of the accepted key names; anything else is `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "a" => Some(Self::A),
            "d" => Some(Self::D),
            "w" => Some(Self::W),
            "s" => Some(Self::S),
            "space" => Some(Self::Space),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

/// The window the interpreter draws into.
///
/// This is the full contract between the interpreter and any graphics
/// backend: drawing primitives with 0–255 color channels, event polling,
/// frame presentation, key queries, and the close flag. Coordinates may
/// be out of range; backends clip rather than fail.
pub trait Canvas {
    /// Fills the frame with a color.
    fn clear(&mut self, r: i64, g: i64, b: i64);
    /// Sets a single pixel.
    fn draw_pixel(&mut self, x: i64, y: i64, r: i64, g: i64, b: i64);
    /// Draws a rectangle, outlined when `filled` is 0.
    #[allow(clippy::too_many_arguments)]
    fn draw_rect(&mut self, x: i64, y: i64, w: i64, h: i64, r: i64, g: i64, b: i64, filled: i64);
    /// Draws a line segment.
    #[allow(clippy::too_many_arguments)]
    fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, r: i64, g: i64, b: i64);
    /// Draws a circle, outlined when `filled` is 0.
    #[allow(clippy::too_many_arguments)]
    fn draw_circle(&mut self, x: i64, y: i64, radius: i64, r: i64, g: i64, b: i64, filled: i64);
    /// Drains pending OS events, updating key state and the close flag.
    fn handle_events(&mut self);
    /// Pushes the frame to the screen (also drains events on most
    /// backends).
    fn present(&mut self);
    /// Whether `key` is currently held.
    fn is_key_pressed(&self, key: KeyId) -> bool;
    /// Whether the user closed the window.
    fn should_close(&self) -> bool;
}

/// Opens [`Canvas`]es on demand.
///
/// The interpreter holds a factory instead of a backend so executing
/// `screen(...)` can construct the window lazily, and so tests can
/// substitute a recording stub.
pub trait CanvasFactory {
    /// Opens a window.
    ///
    /// # Errors
    /// Returns [`RuntimeError::WindowCreation`] when the backend cannot
    /// create the window.
    fn open(&self, width: i64, height: i64, title: &str) -> Result<Box<dyn Canvas>, RuntimeError>;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// A `clear` call.
    Clear { r: i64, g: i64, b: i64 },
    /// A `draw_pixel` call.
    Pixel { x: i64, y: i64, r: i64, g: i64, b: i64 },
    /// A `draw_rect` call.
    Rect { x: i64, y: i64, w: i64, h: i64, r: i64, g: i64, b: i64, filled: i64 },
    /// A `draw_line` call.
    Line { x1: i64, y1: i64, x2: i64, y2: i64, r: i64, g: i64, b: i64 },
    /// A `draw_circle` call.
    Circle { x: i64, y: i64, radius: i64, r: i64, g: i64, b: i64, filled: i64 },
}

/// Shared state behind [`RecordingFactory`] and its canvases.
///
/// Tests keep a handle to this and assert on it after the interpreter
/// finishes.
#[derive(Debug, Default)]
pub struct Recording {
    /// Every drawing call, in order.
    pub commands: Vec<DrawCommand>,
    /// `(width, height, title)` of each opened window.
    pub opened: Vec<(i64, i64, String)>,
    /// Number of presented frames.
    pub frames: usize,
    /// Number of event polls.
    pub polls: usize,
    /// Keys reported as held by `is_key_pressed`.
    pub pressed: HashSet<KeyId>,
    /// When set, `should_close` turns true after this many frames.
    pub close_after_frames: Option<usize>,
}

/// A [`CanvasFactory`] producing canvases that log into a shared
/// [`Recording`] instead of touching the OS.
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    /// The shared log.
    pub state: Rc<RefCell<Recording>>,
}

impl RecordingFactory {
    /// Creates a factory whose canvases close after `frames` presented
    /// frames, so frame loops terminate under test.
    #[must_use]
    pub fn closing_after(frames: usize) -> Self {
        let state = Rc::new(RefCell::new(Recording {
            close_after_frames: Some(frames),
            ..Recording::default()
        }));
        Self { state }
    }
}

impl CanvasFactory for RecordingFactory {
    fn open(&self, width: i64, height: i64, title: &str) -> Result<Box<dyn Canvas>, RuntimeError> {
        self.state
            .borrow_mut()
            .opened
            .push((width, height, title.to_string()));
        Ok(Box::new(RecordingCanvas { state: Rc::clone(&self.state) }))
    }
}

/// The canvas side of [`RecordingFactory`].
#[derive(Debug)]
pub struct RecordingCanvas {
    state: Rc<RefCell<Recording>>,
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, r: i64, g: i64, b: i64) {
        self.state.borrow_mut().commands.push(DrawCommand::Clear { r, g, b });
    }

    fn draw_pixel(&mut self, x: i64, y: i64, r: i64, g: i64, b: i64) {
        self.state.borrow_mut().commands.push(DrawCommand::Pixel { x, y, r, g, b });
    }

    fn draw_rect(&mut self, x: i64, y: i64, w: i64, h: i64, r: i64, g: i64, b: i64, filled: i64) {
        self.state
            .borrow_mut()
            .commands
            .push(DrawCommand::Rect { x, y, w, h, r, g, b, filled });
    }

    fn draw_line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, r: i64, g: i64, b: i64) {
        self.state
            .borrow_mut()
            .commands
            .push(DrawCommand::Line { x1, y1, x2, y2, r, g, b });
    }

    fn draw_circle(&mut self, x: i64, y: i64, radius: i64, r: i64, g: i64, b: i64, filled: i64) {
        self.state
            .borrow_mut()
            .commands
            .push(DrawCommand::Circle { x, y, radius, r, g, b, filled });
    }

    fn handle_events(&mut self) {
        self.state.borrow_mut().polls += 1;
    }

    fn present(&mut self) {
        self.state.borrow_mut().frames += 1;
    }

    fn is_key_pressed(&self, key: KeyId) -> bool {
        self.state.borrow().pressed.contains(&key)
    }

    fn should_close(&self) -> bool {
        let state = self.state.borrow();
        state
            .close_after_frames
            .is_some_and(|limit| state.frames >= limit)
    }
}
