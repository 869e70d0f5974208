//! OxiZ Res - Schreyer Frames for Free Resolutions
//!
//! This crate provides the combinatorial core that resolution algorithms sit
//! on top of:
//! - Packed monomials with a shared, read-only ordering service
//! - An append-only arena that owns every monomial a frame accepts
//! - Leveled frames with parent/child index ranges across levels
//! - Linear divisor search and quotient computation
//! - Quotient generation for whole levels and non-minimal Betti numbers
//!
//! Coefficients, normal forms and the choice of generators stay with the
//! calling algorithm.
//!
//! # Examples
//!
//! ## Driving a Frame by Hand
//!
//! ```
//! use oxiz_res::{BuildState, MonomialInfo, SchreyerFrame};
//! use std::sync::Arc;
//!
//! let info = Arc::new(MonomialInfo::new(2).with_names(["x", "y"]));
//! let mut frame = SchreyerFrame::new(Arc::clone(&info), 2);
//!
//! frame.insert_level_zero(info.from_exponents(&[2, 0]), 2).unwrap();
//! frame.insert_level_zero(info.from_exponents(&[0, 3]), 3).unwrap();
//! assert_eq!(frame.end_level(), BuildState::Building(1));
//!
//! let query = info.from_exponents(&[3, 1]);
//! let divisor = frame.divisor_index(0, &query).unwrap();
//! let quotient = frame.compute_quotient(0, divisor, &query);
//! let child = frame.insert(quotient).unwrap();
//! assert_eq!(frame.degree(1, child), 4);
//! ```
//!
//! ## Building Every Level
//!
//! ```
//! use oxiz_res::{MonomialInfo, SchreyerFrame};
//! use std::sync::Arc;
//!
//! let info = Arc::new(MonomialInfo::new(3));
//! let mut frame = SchreyerFrame::new(Arc::clone(&info), 3);
//! for exps in [[1, 0, 0], [0, 1, 0], [0, 0, 1]] {
//!     frame.insert_level_zero(info.from_exponents(&exps), 1).unwrap();
//! }
//! frame.resolve().unwrap();
//!
//! let betti = frame.betti();
//! assert_eq!((betti.total(0), betti.total(1), betti.total(2)), (3, 3, 1));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alloc;
pub mod config;
pub mod error;
pub mod frame;
pub mod monomial;

pub use alloc::{ArenaId, MonomialArena, MonomialHandle};
pub use config::{ArenaConfig, FrameConfig};
pub use error::{ArenaError, FrameError, FrameResult};
pub use frame::{BettiTable, BuildState, Frame, FrameElement, FrameStats, Level, SchreyerFrame};
pub use monomial::{MonomialInfo, MonomialOrder, PackedMonomial, Word};
