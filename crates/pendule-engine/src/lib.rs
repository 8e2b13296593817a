//! Pendule engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by higher layers:
//! a single-window event loop with cooperative deadlines, a retained scene of
//! tagged primitives and the renderer that paints it.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
