//! Paint model shared between the clock model and the renderer.
//!
//! Strokes and dots are filled with a single solid color; geometry types
//! remain in `coords`.

mod color;

pub use color::Color;
