use thiserror::Error;

use crate::core::ticks::Ticks;

/// Errors returned by [`Engine`](crate::Engine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The drawing surface is not attached to a parent control.
    #[error("drawing surface has no parent control")]
    NoRootControl,

    #[error("target elapsed time must be positive, got {0}")]
    InvalidTargetElapsedTime(Ticks),

    #[error("engine is already running")]
    AlreadyRunning,

    #[error("engine has been disposed")]
    Disposed,

    /// A game hook returned an error. The original error is kept intact.
    #[error(transparent)]
    Hook(#[from] anyhow::Error),
}
