use std::fmt;

/// Failure of a scene mutation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SceneError {
    /// The scene was closed (its window is gone); nothing can be drawn anymore.
    Closed,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Closed => write!(f, "scene is closed"),
        }
    }
}

impl std::error::Error for SceneError {}
