//! Retained scene of tagged primitives.
//!
//! Responsibilities:
//! - store renderer-agnostic primitives (lines, dots) behind stable handles
//! - group primitives by tag for selective erase / raise / move
//! - provide deterministic paint order (raise order + insertion order)
//! - own the pan offset that draw callers translate new geometry by
//!
//! Shape-specific payloads and push helpers live per shape under `scene::shapes`.

mod cmd;
mod error;
mod key;
mod list;
mod tags;

pub mod shapes;

pub use cmd::DrawCmd;
pub use error::SceneError;
pub use key::{Handle, SortKey};
pub use list::{Scene, SceneItem};
pub use shapes::dot::DotCmd;
pub use shapes::line::LineCmd;
pub use tags::Tags;
