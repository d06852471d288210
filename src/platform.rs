//! Window, renderer and input as seen by the frame loop.

use glam::Vec2;
use sfml::graphics::{Color, FloatRect};

use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown { x: f32, y: f32 },
    Quit,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentMode {
    /// Flip without waiting for the vertical blank.
    Async,
    /// Block until the frame reaches the display.
    Sync,
}

pub trait Canvas {
    fn clear(&mut self, color: Color) -> Result<()>;

    /// Stretches the background image over the whole frame.
    fn draw_background(&mut self) -> Result<()>;

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<()>;

    fn fill_rect(&mut self, rect: FloatRect, color: Color) -> Result<()>;

    /// Rasterizes `text` and draws it with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, color: Color) -> Result<()>;

    fn present(&mut self, mode: PresentMode) -> Result<()>;
}

pub trait EventSource {
    /// Next pending event, without blocking.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

pub trait Platform: Canvas + EventSource {
    /// Releases the window and everything rendered through it.
    fn shutdown(&mut self);
}
