//! Monomial ordering service.
//!
//! [`MonomialInfo`] knows the packed layout for a fixed number of variables
//! and answers the comparisons and divisibility queries the frame needs. It
//! is never mutated after construction, so one instance can be shared by any
//! number of frames through an `Arc`.

use super::{COMPONENT_SLOT, DEGREE_SLOT, EXPONENT_START, PackedMonomial, Word};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// Term order on exponent vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonomialOrder {
    /// Graded reverse lexicographic order.
    #[default]
    DegRevLex,
    /// Graded lexicographic order.
    DegLex,
    /// Lexicographic order.
    Lex,
}

/// Layout and ordering information for packed monomials.
#[derive(Debug, Clone)]
pub struct MonomialInfo {
    nvars: usize,
    order: MonomialOrder,
    weights: SmallVec<[Word; 8]>,
    names: Vec<String>,
}

impl MonomialInfo {
    /// Layout for `nvars` variables with unit weights and grevlex order.
    pub fn new(nvars: usize) -> Self {
        Self {
            nvars,
            order: MonomialOrder::default(),
            weights: SmallVec::from_elem(1, nvars),
            names: (0..nvars).map(|i| format!("x{i}")).collect(),
        }
    }

    /// Use a different term order.
    #[must_use]
    pub fn with_order(mut self, order: MonomialOrder) -> Self {
        self.order = order;
        self
    }

    /// Use positive degree weights, one per variable.
    ///
    /// # Panics
    /// Panics if the weight count does not match or a weight is not positive.
    #[must_use]
    pub fn with_weights(mut self, weights: &[Word]) -> Self {
        assert_eq!(weights.len(), self.nvars, "one weight per variable");
        assert!(weights.iter().all(|&w| w > 0), "weights must be positive");
        self.weights = SmallVec::from_slice(weights);
        self
    }

    /// Use custom variable names for display.
    ///
    /// # Panics
    /// Panics if the name count does not match.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert_eq!(names.len(), self.nvars, "one name per variable");
        self.names = names;
        self
    }

    /// Number of variables.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.nvars
    }

    /// Term order in use.
    #[inline]
    pub fn order(&self) -> MonomialOrder {
        self.order
    }

    /// Degree weights.
    #[inline]
    pub fn weights(&self) -> &[Word] {
        &self.weights
    }

    /// Words in one packed monomial.
    #[inline]
    pub fn monomial_size(&self) -> usize {
        EXPONENT_START + self.nvars
    }

    /// Pack an exponent vector attached to `component`.
    ///
    /// The local degree is the weighted degree of `exponents`.
    ///
    /// # Panics
    /// Panics on a wrong exponent count, a negative exponent, or a local
    /// degree that does not fit in a `Word`.
    pub fn encode(&self, component: usize, exponents: &[Word]) -> PackedMonomial {
        assert_eq!(
            exponents.len(),
            self.nvars,
            "expected {} exponents, got {}",
            self.nvars,
            exponents.len()
        );
        assert!(exponents.iter().all(|&e| e >= 0), "negative exponent");

        let mut words = SmallVec::with_capacity(self.monomial_size());
        words.push(component as Word);
        words.push(self.weighted_degree(exponents));
        words.extend_from_slice(exponents);
        PackedMonomial::from_words(words)
    }

    /// Pack an exponent vector with component 0.
    pub fn from_exponents(&self, exponents: &[Word]) -> PackedMonomial {
        self.encode(0, exponents)
    }

    /// Parent component of `m`.
    #[inline]
    pub fn component(&self, m: &[Word]) -> usize {
        debug_assert_eq!(m.len(), self.monomial_size());
        m[COMPONENT_SLOT] as usize
    }

    /// Local degree of `m`.
    #[inline]
    pub fn local_degree(&self, m: &[Word]) -> Word {
        debug_assert_eq!(m.len(), self.monomial_size());
        m[DEGREE_SLOT]
    }

    /// Exponent vector of `m`.
    #[inline]
    pub fn exponents<'a>(&self, m: &'a [Word]) -> &'a [Word] {
        debug_assert_eq!(m.len(), self.monomial_size());
        &m[EXPONENT_START..]
    }

    /// Weighted degree of an exponent vector.
    ///
    /// # Panics
    /// Panics if the degree does not fit in a `Word`.
    pub fn weighted_degree(&self, exponents: &[Word]) -> Word {
        exponents
            .iter()
            .zip(self.weights.iter())
            .try_fold(0 as Word, |acc, (&e, &w)| e.checked_mul(w)?.checked_add(acc))
            .unwrap_or_else(|| panic!("weighted degree of {exponents:?} overflows i64"))
    }

    /// Check if `a` divides `b` termwise. Components are ignored.
    pub fn divides(&self, a: &[Word], b: &[Word]) -> bool {
        self.exponents(a)
            .iter()
            .zip(self.exponents(b))
            .all(|(ea, eb)| ea <= eb)
    }

    /// `m / divisor`, attached to `component`.
    ///
    /// # Panics
    /// Panics if `divisor` does not divide `m`.
    pub fn quotient(&self, component: usize, m: &[Word], divisor: &[Word]) -> PackedMonomial {
        assert!(self.divides(divisor, m), "quotient by a non-divisor");
        let exps: SmallVec<[Word; 8]> = self
            .exponents(m)
            .iter()
            .zip(self.exponents(divisor))
            .map(|(em, ed)| em - ed)
            .collect();
        self.encode(component, &exps)
    }

    /// Monomial ideal quotient `a : b`, attached to `component`.
    ///
    /// This is `lcm(a, b) / b`.
    pub fn colon(&self, component: usize, a: &[Word], b: &[Word]) -> PackedMonomial {
        let exps: SmallVec<[Word; 8]> = self
            .exponents(a)
            .iter()
            .zip(self.exponents(b))
            .map(|(ea, eb)| (ea - eb).max(0))
            .collect();
        self.encode(component, &exps)
    }

    /// Least common multiple, attached to `component`.
    pub fn lcm(&self, component: usize, a: &[Word], b: &[Word]) -> PackedMonomial {
        let exps: SmallVec<[Word; 8]> = self
            .exponents(a)
            .iter()
            .zip(self.exponents(b))
            .map(|(&ea, &eb)| ea.max(eb))
            .collect();
        self.encode(component, &exps)
    }

    /// Compare two monomials in the term order, breaking ties by component.
    pub fn compare(&self, a: &[Word], b: &[Word]) -> Ordering {
        let ea = self.exponents(a);
        let eb = self.exponents(b);
        let by_exponents = match self.order {
            MonomialOrder::Lex => lex_compare(ea, eb),
            MonomialOrder::DegLex => self
                .weighted_degree(ea)
                .cmp(&self.weighted_degree(eb))
                .then_with(|| lex_compare(ea, eb)),
            MonomialOrder::DegRevLex => self
                .weighted_degree(ea)
                .cmp(&self.weighted_degree(eb))
                .then_with(|| revlex_compare(ea, eb)),
        };
        by_exponents.then_with(|| self.component(a).cmp(&self.component(b)))
    }

    /// Printable view of the exponent part of `m`.
    pub fn display<'a>(&'a self, m: &'a [Word]) -> MonomialDisplay<'a> {
        MonomialDisplay { info: self, m }
    }
}

fn lex_compare(a: &[Word], b: &[Word]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

// The monomial with the smaller exponent in the last differing variable is larger.
fn revlex_compare(a: &[Word], b: &[Word]) -> Ordering {
    a.iter()
        .zip(b)
        .rev()
        .map(|(x, y)| y.cmp(x))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Display adapter returned by [`MonomialInfo::display`].
pub struct MonomialDisplay<'a> {
    info: &'a MonomialInfo,
    m: &'a [Word],
}

impl fmt::Display for MonomialDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, &e) in self.info.names.iter().zip(self.info.exponents(self.m)) {
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if e == 1 {
                write!(f, "{name}")?;
            } else {
                write!(f, "{name}^{e}")?;
            }
        }
        if first {
            write!(f, "1")?;
        }
        Ok(())
    }
}
