/// Convenience result type used across Segue.
pub type SegueResult<T> = Result<T, SegueError>;

/// Boundary error taxonomy.
///
/// Transition bookkeeping itself never fails: unknown names, incomplete records and unmeasurable
/// nodes are ordinary states. Errors only surface where the engine meets its caller (options,
/// capability wiring, shared-handle misuse, script loading).
#[derive(thiserror::Error, Debug)]
pub enum SegueError {
    /// Invalid user-provided options or script data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required host capability is missing or unusable.
    #[error("capability error: {0}")]
    Capability(String),

    /// The shared broker was entered again while already borrowed.
    #[error("reentrancy error: {0}")]
    Reentrant(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SegueError {
    /// Build a [`SegueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SegueError::Capability`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::Capability(msg.into())
    }

    /// Build a [`SegueError::Reentrant`] value.
    pub fn reentrant(msg: impl Into<String>) -> Self {
        Self::Reentrant(msg.into())
    }

    /// Build a [`SegueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
