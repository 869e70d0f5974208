//! Frame and arena configuration.

use crate::error::{FrameError, FrameResult};
use serde::{Deserialize, Serialize};

/// Configuration for the monomial arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Words in the first chunk
    pub initial_chunk_words: usize,
    /// Upper bound on the size of regular chunks
    pub max_chunk_words: usize,
    /// Growth factor between successive chunks
    pub growth_factor: f64,
    /// Hard limit on words handed out (None = unlimited)
    pub max_words: Option<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            initial_chunk_words: 512,       // 4KB of i64
            max_chunk_words: 128 * 1024,    // 1MB of i64
            growth_factor: 2.0,
            max_words: None,
        }
    }
}

impl ArenaConfig {
    /// Set the size of the first chunk.
    #[must_use]
    pub fn with_initial_chunk_words(mut self, words: usize) -> Self {
        self.initial_chunk_words = words;
        self
    }

    /// Set the maximum size of regular chunks.
    #[must_use]
    pub fn with_max_chunk_words(mut self, words: usize) -> Self {
        self.max_chunk_words = words;
        self
    }

    /// Set the chunk growth factor.
    #[must_use]
    pub fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Limit the total number of words the arena may hand out.
    #[must_use]
    pub fn with_max_words(mut self, limit: usize) -> Self {
        self.max_words = Some(limit);
        self
    }

    /// Check that the sizes are usable.
    pub fn validate(&self) -> FrameResult<()> {
        if self.initial_chunk_words == 0 {
            return Err(FrameError::InvalidConfig(
                "initial_chunk_words must be positive".to_string(),
            ));
        }
        if self.max_chunk_words < self.initial_chunk_words {
            return Err(FrameError::InvalidConfig(format!(
                "max_chunk_words ({}) is smaller than initial_chunk_words ({})",
                self.max_chunk_words, self.initial_chunk_words
            )));
        }
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(FrameError::InvalidConfig(format!(
                "growth_factor must be at least 1.0, got {}",
                self.growth_factor
            )));
        }
        Ok(())
    }
}

/// Configuration for a [`SchreyerFrame`](crate::SchreyerFrame).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Highest homological level the frame will build
    pub max_level: usize,
    /// Quotients whose total degree exceeds this are not generated
    pub degree_limit: Option<i64>,
    /// Arena sizing
    pub arena: ArenaConfig,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_level: 8,
            degree_limit: None,
            arena: ArenaConfig::default(),
        }
    }
}

impl FrameConfig {
    /// Create a configuration bounded at `max_level`.
    pub fn new(max_level: usize) -> Self {
        Self {
            max_level,
            ..Self::default()
        }
    }

    /// Set the degree limit used by quotient generation.
    #[must_use]
    pub fn with_degree_limit(mut self, limit: i64) -> Self {
        self.degree_limit = Some(limit);
        self
    }

    /// Replace the arena configuration.
    #[must_use]
    pub fn with_arena(mut self, arena: ArenaConfig) -> Self {
        self.arena = arena;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FrameResult<()> {
        self.arena.validate()
    }
}
