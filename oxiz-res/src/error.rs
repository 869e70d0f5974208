//! Error types for frame construction.
//!
//! Only resource failures are recoverable. Broken caller contracts (bad
//! parent components, out-of-order children, foreign monomial handles) are
//! assertions, not variants here.

use thiserror::Error;

/// Errors raised by the monomial arena.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The system allocator refused to reserve a new chunk
    #[error("arena allocation of {words} words failed")]
    AllocationFailed {
        /// Size of the chunk that could not be reserved
        words: usize,
    },
    /// The configured word limit would be exceeded
    #[error("arena capacity exceeded: requested {requested} words with {used} in use (limit: {limit})")]
    CapacityExceeded {
        /// Words asked for
        requested: usize,
        /// Words already handed out
        used: usize,
        /// Configured limit
        limit: usize,
    },
}

/// Errors raised by a [`SchreyerFrame`](crate::SchreyerFrame).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Monomial storage could not be provided
    #[error(transparent)]
    Arena(#[from] ArenaError),
    /// A configuration value is out of range
    #[error("invalid frame configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;
