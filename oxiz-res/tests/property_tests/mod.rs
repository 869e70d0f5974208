//! Property-based tests for oxiz-res
//!
//! This module contains property tests for:
//! - Arena address stability and accounting
//! - Frame degree bookkeeping and children ranges
//! - Divisor search and quotient computation

mod arena_properties;
mod frame_properties;
