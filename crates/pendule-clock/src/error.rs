use pendule_engine::scene::SceneError;
use thiserror::Error;

/// Failure of the drawing target.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("render surface is closed")]
    Closed,
}

impl From<SceneError> for SurfaceError {
    fn from(err: SceneError) -> Self {
        match err {
            SceneError::Closed => SurfaceError::Closed,
        }
    }
}

/// Failure to read the wall clock. Transient: the resync is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeSourceError {
    #[error("wall clock unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the clock core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Invalid construction constants; raised before anything is drawn.
    #[error("invalid clock setup: {0}")]
    Setup(String),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

pub type ClockResult<T> = std::result::Result<T, ClockError>;
