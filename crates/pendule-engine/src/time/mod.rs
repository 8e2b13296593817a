//! Time subsystem.
//!
//! Provides testable tick pacing without coupling to the runtime.
//! Intended usage:
//! - one `TickClock` per periodic task
//! - call `begin()` when a tick starts and `finish()` when its work is done
//! - hand `next_deadline()` to the runtime so it can sleep until the next tick

mod tick_clock;

pub use tick_clock::{TickClock, TickTime};
