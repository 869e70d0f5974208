//! Packed monomials.
//!
//! A packed monomial is a fixed-layout run of words shared by the ordering
//! service and the frame:
//!
//! ```text
//! [ component | local degree | e_0 | e_1 | ... | e_{n-1} ]
//! ```
//!
//! The component names the element of the previous level the monomial is
//! attached to. It is ignored at level 0 and by divisibility tests.

mod info;

pub use info::{MonomialDisplay, MonomialInfo, MonomialOrder};

use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// A single word of a packed monomial.
pub type Word = i64;

/// Slot holding the parent component.
pub const COMPONENT_SLOT: usize = 0;
/// Slot holding the local degree.
pub const DEGREE_SLOT: usize = 1;
/// First exponent slot.
pub const EXPONENT_START: usize = 2;

/// An owned packed monomial.
///
/// Build one through [`MonomialInfo::encode`]; moving it into a frame copies
/// the words into the frame's arena.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PackedMonomial {
    words: SmallVec<[Word; 8]>,
}

impl PackedMonomial {
    pub(crate) fn from_words(words: SmallVec<[Word; 8]>) -> Self {
        debug_assert!(words.len() >= EXPONENT_START);
        Self { words }
    }

    /// The raw words.
    #[inline]
    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    /// Parent component.
    #[inline]
    pub fn component(&self) -> usize {
        self.words[COMPONENT_SLOT] as usize
    }

    /// Local degree.
    #[inline]
    pub fn local_degree(&self) -> Word {
        self.words[DEGREE_SLOT]
    }

    /// Exponent vector.
    #[inline]
    pub fn exponents(&self) -> &[Word] {
        &self.words[EXPONENT_START..]
    }
}

impl Deref for PackedMonomial {
    type Target = [Word];

    fn deref(&self) -> &[Word] {
        &self.words
    }
}

impl AsRef<[Word]> for PackedMonomial {
    fn as_ref(&self) -> &[Word] {
        &self.words
    }
}

impl fmt::Debug for PackedMonomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedMonomial")
            .field("component", &self.component())
            .field("local_degree", &self.local_degree())
            .field("exponents", &self.exponents())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let info = MonomialInfo::new(3);
        let m = info.encode(4, &[1, 0, 2]);
        assert_eq!(m.as_slice(), &[4, 3, 1, 0, 2]);
        assert_eq!(m.component(), 4);
        assert_eq!(m.local_degree(), 3);
        assert_eq!(m.exponents(), &[1, 0, 2]);
    }

    #[test]
    fn test_debug_names_fields() {
        let info = MonomialInfo::new(1);
        let m = info.encode(0, &[5]);
        let text = format!("{m:?}");
        assert!(text.contains("local_degree: 5"));
    }
}
