//! Runtime error types.

use survival_core::TickError;

/// Errors surfaced by session orchestration and persistence.
///
/// Nothing here is fatal to the hosting process; every failure degrades to
/// "no effect this tick" plus a diagnostic for the caller.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("scheduling failed: {0}")]
    Tick(#[from] TickError),
    #[error("content failed to load: {0}")]
    Content(String),
    #[error("session is missing a collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error("repository I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failed: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
