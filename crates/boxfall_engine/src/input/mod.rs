//! Input events and their routing into the world

pub mod router;

pub use router::{InputRouter, RouteOutcome};

/// Discrete event delivered by the external event source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a screen position in pixels
    PointerDown {
        /// Horizontal position in pixels
        x: f32,
        /// Vertical position in pixels, growing downwards
        y: f32,
    },

    /// Key pressed
    KeyDown(KeyCode),

    /// The window or user asked to quit
    Quit,
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Printable character key
    Char(char),
    /// Any other key, by platform scan code
    Other(u32),
}
