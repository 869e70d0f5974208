//! Arena Allocator for Packed Monomials.
//!
//! Provides append-only word storage with batch deallocation. Chunks are
//! reserved once and never grow, so a slice handed out by the arena keeps its
//! address until the arena itself is dropped.

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::monomial::Word;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique identity of an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(u32);

/// A fixed-capacity chunk of words.
struct Chunk {
    words: Vec<Word>,
}

impl Chunk {
    fn new(size: usize) -> Result<Self, ArenaError> {
        let mut words = Vec::new();
        words
            .try_reserve_exact(size)
            .map_err(|_| ArenaError::AllocationFailed { words: size })?;
        Ok(Self { words })
    }

    fn remaining(&self) -> usize {
        self.words.capacity() - self.words.len()
    }

    /// Copy `src` into the chunk if it fits without reallocating.
    fn allocate(&mut self, src: &[Word]) -> Option<usize> {
        if src.len() > self.remaining() {
            return None;
        }
        let offset = self.words.len();
        self.words.extend_from_slice(src);
        Some(offset)
    }

    fn capacity(&self) -> usize {
        self.words.capacity()
    }
}

/// Location of an allocation inside a [`MonomialArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonomialHandle {
    arena: ArenaId,
    chunk: usize,
    offset: usize,
    len: usize,
}

impl MonomialHandle {
    /// Number of words in the allocation.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the allocation is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The arena this handle belongs to.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }
}

/// Append-only storage for monomial words.
pub struct MonomialArena {
    id: ArenaId,
    config: ArenaConfig,
    chunks: Vec<Chunk>,
    current_chunk_words: usize,
    used_words: usize,
    num_allocations: usize,
}

impl MonomialArena {
    /// Create a new arena with default configuration.
    pub fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    /// Create a new arena with custom configuration.
    pub fn with_config(config: ArenaConfig) -> Self {
        Self {
            id: ArenaId(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed)),
            current_chunk_words: config.initial_chunk_words.max(1),
            config,
            chunks: Vec::new(),
            used_words: 0,
            num_allocations: 0,
        }
    }

    /// Copy `words` into the arena and return a handle to the stored copy.
    pub fn allocate(&mut self, words: &[Word]) -> Result<MonomialHandle, ArenaError> {
        if let Some(limit) = self.config.max_words
            && self.used_words + words.len() > limit
        {
            return Err(ArenaError::CapacityExceeded {
                requested: words.len(),
                used: self.used_words,
                limit,
            });
        }

        let offset = match self.chunks.last_mut().and_then(|chunk| chunk.allocate(words)) {
            Some(offset) => offset,
            None => {
                self.grow(words.len())?;
                self.chunks
                    .last_mut()
                    .and_then(|chunk| chunk.allocate(words))
                    .ok_or(ArenaError::AllocationFailed { words: words.len() })?
            }
        };

        self.used_words += words.len();
        self.num_allocations += 1;

        Ok(MonomialHandle {
            arena: self.id,
            chunk: self.chunks.len() - 1,
            offset,
            len: words.len(),
        })
    }

    /// Grow the arena by adding a new chunk.
    fn grow(&mut self, min_size: usize) -> Result<(), ArenaError> {
        let new_size = self.current_chunk_words.max(min_size);
        let chunk = Chunk::new(new_size)?;
        self.chunks.push(chunk);

        // Grow chunk size for next allocation
        let next_size = (self.current_chunk_words as f64 * self.config.growth_factor) as usize;
        self.current_chunk_words = next_size
            .min(self.config.max_chunk_words)
            .max(self.current_chunk_words);

        Ok(())
    }

    /// Words stored under `handle`.
    ///
    /// # Panics
    /// Panics if the handle was issued by a different arena.
    pub fn get(&self, handle: MonomialHandle) -> &[Word] {
        assert_eq!(
            handle.arena, self.id,
            "monomial handle belongs to a different arena"
        );
        &self.chunks[handle.chunk].words[handle.offset..handle.offset + handle.len]
    }

    /// Whether `handle` was issued by this arena.
    pub fn owns(&self, handle: MonomialHandle) -> bool {
        handle.arena == self.id
    }

    /// Identity of this arena.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Total words handed out.
    pub fn used_words(&self) -> usize {
        self.used_words
    }

    /// Total capacity across all chunks.
    pub fn capacity_words(&self) -> usize {
        self.chunks.iter().map(Chunk::capacity).sum()
    }

    /// Number of chunks.
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Number of successful allocations.
    pub fn num_allocations(&self) -> usize {
        self.num_allocations
    }
}

impl Default for MonomialArena {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MonomialArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonomialArena")
            .field("id", &self.id)
            .field("chunks", &self.chunks.len())
            .field("used_words", &self.used_words)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ArenaConfig {
        ArenaConfig {
            initial_chunk_words: 8,
            max_chunk_words: 32,
            growth_factor: 2.0,
            max_words: None,
        }
    }

    #[test]
    fn test_arena_basic() {
        let mut arena = MonomialArena::new();
        let handle = arena.allocate(&[0, 2, 2, 0]).unwrap();
        assert_eq!(arena.get(handle), &[0, 2, 2, 0]);
        assert_eq!(handle.len(), 4);
    }

    #[test]
    fn test_arena_multiple() {
        let mut arena = MonomialArena::new();
        let h1 = arena.allocate(&[1]).unwrap();
        let h2 = arena.allocate(&[2, 2]).unwrap();
        let h3 = arena.allocate(&[3, 3, 3]).unwrap();

        assert_eq!(arena.get(h1), &[1]);
        assert_eq!(arena.get(h2), &[2, 2]);
        assert_eq!(arena.get(h3), &[3, 3, 3]);
        assert_eq!(arena.used_words(), 6);
        assert_eq!(arena.num_allocations(), 3);
    }

    #[test]
    fn test_arena_growth() {
        let mut arena = MonomialArena::with_config(small_config());

        for i in 0..100 {
            arena.allocate(&[i, i + 1, i + 2]).unwrap();
        }

        assert!(arena.num_chunks() > 1);
        assert!(arena.capacity_words() >= arena.used_words());
    }

    #[test]
    fn test_addresses_stable_across_growth() {
        let mut arena = MonomialArena::with_config(small_config());
        let first = arena.allocate(&[7, 8, 9]).unwrap();
        let ptr = arena.get(first).as_ptr();

        for i in 0..500 {
            arena.allocate(&[i; 5]).unwrap();
        }

        assert_eq!(arena.get(first).as_ptr(), ptr);
        assert_eq!(arena.get(first), &[7, 8, 9]);
    }

    #[test]
    fn test_oversized_request_gets_own_chunk() {
        let mut arena = MonomialArena::with_config(small_config());
        let words: Vec<Word> = (0..100).collect();
        let handle = arena.allocate(&words).unwrap();
        assert_eq!(arena.get(handle), words.as_slice());
    }

    #[test]
    fn test_capacity_limit() {
        let mut arena = MonomialArena::with_config(small_config().with_max_words(6));
        arena.allocate(&[1, 2, 3, 4]).unwrap();
        let err = arena.allocate(&[5, 6, 7]).unwrap_err();
        assert_eq!(
            err,
            ArenaError::CapacityExceeded {
                requested: 3,
                used: 4,
                limit: 6
            }
        );
        // Failed allocation leaves the arena untouched
        assert_eq!(arena.used_words(), 4);
        assert_eq!(arena.num_allocations(), 1);
    }

    #[test]
    fn test_unsatisfiable_chunk_is_reported() {
        let huge = usize::MAX / 4;
        let config = ArenaConfig::default()
            .with_initial_chunk_words(huge)
            .with_max_chunk_words(huge);
        let mut arena = MonomialArena::with_config(config);
        let err = arena.allocate(&[1, 2]).unwrap_err();
        assert_eq!(err, ArenaError::AllocationFailed { words: huge });
        assert_eq!(arena.used_words(), 0);
        assert_eq!(arena.num_allocations(), 0);
        assert_eq!(arena.num_chunks(), 0);
    }

    #[test]
    fn test_foreign_handle_is_not_owned() {
        let mut a = MonomialArena::new();
        let b = MonomialArena::new();
        let handle = a.allocate(&[1]).unwrap();
        assert!(a.owns(handle));
        assert!(!b.owns(handle));
    }

    #[test]
    #[should_panic(expected = "different arena")]
    fn test_foreign_handle_panics() {
        let mut a = MonomialArena::new();
        let b = MonomialArena::new();
        let handle = a.allocate(&[1]).unwrap();
        b.get(handle);
    }
}
