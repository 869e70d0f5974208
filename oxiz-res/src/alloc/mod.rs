//! Monomial storage for frames.
//!
//! Every monomial accepted by a frame is copied into that frame's arena and
//! released only when the frame is dropped.

pub mod arena;

pub use arena::{ArenaId, MonomialArena, MonomialHandle};
