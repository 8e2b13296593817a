//! GPU rendering of the retained scene.
//!
//! CPU geometry is in logical pixels (top-left origin, +y down). The stroke
//! shader maps it to NDC with a viewport uniform and antialiases in physical
//! pixels. Renderers create their GPU resources lazily and keep them across
//! frames.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
