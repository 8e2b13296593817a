//! Analog clock model.
//!
//! Geometry is precomputed once: every hand owns one endpoint pair per
//! discrete position of its lap, every scale one pair per graduation. At run
//! time the [`Controller`] only moves cursors through those tables and issues
//! line/dot primitives to a [`RenderSurface`]. The [`Interaction`] state
//! machine pans everything tagged draggable and snaps it back on double click.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod hand;
pub mod interaction;
pub mod scale;
pub mod surface;
pub mod time_source;

pub use config::{ClockConfig, HandKind, HandSpec, PinSpec, ScaleSpec};
pub use controller::{Controller, TickReport};
pub use error::{ClockError, ClockResult, SurfaceError, TimeSourceError};
pub use geometry::{CircularPoint, EndpointPair, build_pairs};
pub use hand::Hand;
pub use interaction::{DragState, Interaction};
pub use scale::{Pin, Scale};
pub use surface::RenderSurface;
pub use time_source::{FixedTimeSource, SystemTimeSource, TimeSource};
