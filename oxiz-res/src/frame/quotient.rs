//! Quotient generation for the next level.
//!
//! The children of an element `c` are the minimal generators of the colon
//! ideal `(m_j : m_c)` over the siblings `j` that precede `c` under the same
//! parent. At level 1 all of level 0 counts as one sibling group.

use super::{BuildState, SchreyerFrame};
use crate::error::FrameResult;
use crate::monomial::{MonomialInfo, PackedMonomial};
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info};

impl SchreyerFrame {
    /// Populate the current level from the quotients of the previous one.
    ///
    /// Returns the number of elements inserted. Quotients whose total degree
    /// would exceed the configured degree limit are skipped.
    ///
    /// # Panics
    /// Panics unless the frame is building a level `L >= 1` that is still empty.
    pub fn compute_next_level(&mut self) -> FrameResult<usize> {
        let level = match self.state {
            BuildState::Building(level) if level > 0 => level,
            other => panic!("compute_next_level needs a finalized previous level, frame is {other}"),
        };
        assert!(
            self.level(level).is_empty(),
            "level {level} already has elements"
        );

        let source = level - 1;
        let groups: Vec<Range<usize>> = if source == 0 {
            vec![0..self.len(0)]
        } else {
            self.level(source - 1).iter().map(|e| e.children()).collect()
        };

        let mut inserted = 0;
        for group in groups {
            for current in group.clone() {
                for q in self.sibling_quotients(source, group.start..current, current) {
                    self.insert(q)?;
                    inserted += 1;
                }
            }
        }

        debug!(
            "Generated level {} with {} elements from {} at level {}",
            level,
            inserted,
            self.len(source),
            source
        );
        Ok(inserted)
    }

    /// Minimal colon monomials `m_j : m_current` for `j` in `earlier`,
    /// attached to `current` and sorted by the term order.
    fn sibling_quotients(
        &mut self,
        level: usize,
        earlier: Range<usize>,
        current: usize,
    ) -> Vec<PackedMonomial> {
        let info = Arc::clone(&self.info);
        let m_current = self.monomial(level, current);
        let candidates: Vec<PackedMonomial> = earlier
            .map(|j| info.colon(current, self.monomial(level, j), m_current))
            .collect();

        let computed = candidates.len();
        let mut kept = minimalize(&info, candidates);
        self.stats.quotients_computed += computed;
        self.stats.candidates_pruned += computed - kept.len();

        if let Some(limit) = self.config.degree_limit {
            let base = self.degree(level, current);
            kept.retain(|q| base.checked_add(q.local_degree()).is_some_and(|d| d <= limit));
        }
        kept.sort_by(|a, b| info.compare(a, b));
        kept
    }

    /// Build every level from a populated level 0.
    ///
    /// Ends level 0, then alternates [`compute_next_level`](Self::compute_next_level)
    /// and [`end_level`](Self::end_level) until the frame is complete or a
    /// generated level comes out empty. Returns the number of levels finalized.
    ///
    /// # Panics
    /// Panics if level 0 has already been finalized.
    pub fn resolve(&mut self) -> FrameResult<usize> {
        assert_eq!(
            self.state,
            BuildState::Building(0),
            "resolve starts from an open level 0"
        );
        self.end_level();
        let mut finalized = 1;

        while let BuildState::Building(_) = self.state {
            let generated = self.compute_next_level()?;
            self.end_level();
            finalized += 1;
            if generated == 0 {
                break;
            }
        }

        info!(
            "Resolved frame: {} levels, {} elements",
            finalized,
            self.total_elements()
        );
        Ok(finalized)
    }
}

/// Keep the minimal elements of `candidates` under divisibility, first copy
/// of duplicates wins. Order is preserved.
fn minimalize(info: &MonomialInfo, candidates: Vec<PackedMonomial>) -> Vec<PackedMonomial> {
    let keep: Vec<bool> = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            !candidates.iter().enumerate().any(|(j, d)| {
                j != i && info.divides(d, c) && (j < i || d.exponents() != c.exponents())
            })
        })
        .collect();

    candidates
        .into_iter()
        .zip(keep)
        .filter_map(|(c, k)| k.then_some(c))
        .collect()
}
