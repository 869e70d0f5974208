//! Schreyer Frames for Free Resolutions.
//!
//! A frame holds, level by level, the lead monomials of the generators of a
//! free resolution. Every element at level `L > 0` is attached to exactly one
//! element of level `L - 1` through the component slot of its monomial, which
//! is what makes the induced order on each level a Schreyer order.
//!
//! ## Build Protocol
//!
//! 1. Insert the level 0 generators with [`SchreyerFrame::insert_level_zero`]
//! 2. Call [`SchreyerFrame::end_level`]
//! 3. Insert the next level with [`SchreyerFrame::insert`], children grouped by
//!    non-decreasing parent, or let [`SchreyerFrame::compute_next_level`] do it
//! 4. Call [`SchreyerFrame::end_level`], which fixes the children ranges of
//!    the previous level, and repeat until the frame is complete
//!
//! Broken protocol (wrong level, unknown parent, unordered children) is a bug
//! in the caller and panics. Only arena exhaustion is reported as an error.
//!
//! ## Divisor Search
//!
//! [`SchreyerFrame::divisor_index`] is a linear scan returning the lowest
//! dividing index. A trie or sorted-exponent index would make it sublinear
//! without changing results.

mod betti;
mod quotient;

pub use betti::BettiTable;

use crate::alloc::{MonomialArena, MonomialHandle};
use crate::config::FrameConfig;
use crate::error::FrameResult;
use crate::monomial::{MonomialInfo, PackedMonomial, Word};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// One resolution generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameElement {
    monom: MonomialHandle,
    degree: i64,
    begin: usize,
    end: usize,
}

impl FrameElement {
    fn new(monom: MonomialHandle, degree: i64) -> Self {
        Self {
            monom,
            degree,
            begin: 0,
            end: 0,
        }
    }

    /// Arena location of the monomial.
    pub fn handle(&self) -> MonomialHandle {
        self.monom
    }

    /// Total degree.
    pub fn degree(&self) -> i64 {
        self.degree
    }

    /// Children in the next level. Empty until the next level is finalized.
    pub fn children(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// Elements sharing a homological degree, indexed by position.
#[derive(Debug, Clone, Default)]
pub struct Level {
    elements: Vec<FrameElement>,
}

impl Level {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the level has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&FrameElement> {
        self.elements.get(index)
    }

    /// Iterate over the elements in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, FrameElement> {
        self.elements.iter()
    }

    fn last(&self) -> Option<&FrameElement> {
        self.elements.last()
    }
}

static EMPTY_LEVEL: Level = Level {
    elements: Vec::new(),
};

/// Levels reached so far. A level is added when the build reaches it.
#[derive(Debug, Clone)]
pub struct Frame {
    levels: Vec<Level>,
}

impl Frame {
    fn new() -> Self {
        Self {
            levels: vec![Level::default()],
        }
    }

    /// Number of levels reached so far.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Iterate over the levels.
    pub fn iter(&self) -> std::slice::Iter<'_, Level> {
        self.levels.iter()
    }
}

/// Where a frame is in its build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Elements are being inserted into this level
    Building(usize),
    /// Every level up to the maximum has been finalized
    Complete,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Building(level) => write!(f, "building level {level}"),
            Self::Complete => write!(f, "complete"),
        }
    }
}

/// Frame statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Elements inserted across all levels
    pub elements_inserted: usize,
    /// Levels finalized by `end_level`
    pub levels_finalized: usize,
    /// Colon monomials computed while generating levels
    pub quotients_computed: usize,
    /// Colon monomials dropped as non-minimal
    pub candidates_pruned: usize,
}

/// The frame orchestrator: owns the levels and the arena behind their monomials.
pub struct SchreyerFrame {
    info: Arc<MonomialInfo>,
    config: FrameConfig,
    frame: Frame,
    state: BuildState,
    monomial_space: MonomialArena,
    stats: FrameStats,
}

impl SchreyerFrame {
    /// Create an empty frame bounded by `max_level`.
    pub fn new(info: Arc<MonomialInfo>, max_level: usize) -> Self {
        Self::build(info, FrameConfig::new(max_level))
    }

    /// Create an empty frame from a validated configuration.
    pub fn with_config(info: Arc<MonomialInfo>, config: FrameConfig) -> FrameResult<Self> {
        config.validate()?;
        Ok(Self::build(info, config))
    }

    fn build(info: Arc<MonomialInfo>, config: FrameConfig) -> Self {
        Self {
            frame: Frame::new(),
            monomial_space: MonomialArena::with_config(config.arena.clone()),
            state: BuildState::Building(0),
            stats: FrameStats::default(),
            info,
            config,
        }
    }

    /// Append a level 0 element with an explicit total degree.
    ///
    /// # Panics
    /// Panics if level 0 has already been finalized.
    pub fn insert_level_zero(&mut self, monom: PackedMonomial, degree: i64) -> FrameResult<usize> {
        assert_eq!(
            self.state,
            BuildState::Building(0),
            "level 0 insertion after level 0 was finalized"
        );
        self.push(0, monom, degree)
    }

    /// Append an element to the current level `L >= 1`.
    ///
    /// The total degree is the local degree of `monom` plus the degree of its
    /// parent in level `L - 1`.
    ///
    /// # Panics
    /// Panics if the frame is at level 0 or complete, if the parent does not
    /// exist, if the parent is smaller than that of the previous insertion,
    /// or if the total degree does not fit in an `i64`.
    pub fn insert(&mut self, monom: PackedMonomial) -> FrameResult<usize> {
        let level = match self.state {
            BuildState::Building(level) if level > 0 => level,
            BuildState::Building(_) => panic!("insert at level 0 needs an explicit degree"),
            BuildState::Complete => panic!("insert into a complete frame"),
        };

        let parent = self.info.component(&monom);
        let parents = self.frame.levels[level - 1].len();
        assert!(
            parent < parents,
            "parent component {parent} out of range for level {} with {parents} elements",
            level - 1
        );
        if let Some(last) = self.frame.levels[level].last() {
            let last_parent = self.info.component(self.monomial_space.get(last.monom));
            assert!(
                last_parent <= parent,
                "children must be inserted in non-decreasing parent order ({parent} after {last_parent})"
            );
        }

        let parent_degree = self.degree(level - 1, parent);
        let degree = self
            .info
            .local_degree(&monom)
            .checked_add(parent_degree)
            .unwrap_or_else(|| {
                panic!("total degree overflows i64 (parent {parent} has degree {parent_degree})")
            });
        self.push(level, monom, degree)
    }

    fn push(&mut self, level: usize, monom: PackedMonomial, degree: i64) -> FrameResult<usize> {
        assert_eq!(
            monom.len(),
            self.info.monomial_size(),
            "monomial does not match the frame's layout"
        );
        let handle = self.monomial_space.allocate(&monom).map_err(|e| {
            warn!("Frame arena refused monomial at level {}: {}", level, e);
            e
        })?;

        let elements = &mut self.frame.levels[level].elements;
        elements.push(FrameElement::new(handle, degree));
        self.stats.elements_inserted += 1;

        let index = elements.len() - 1;
        trace!(
            "Inserted element {} at level {} (degree {})",
            index, level, degree
        );
        Ok(index)
    }

    /// Finalize the current level and move to the next.
    ///
    /// For `L > 0` this assigns every element of level `L - 1` the contiguous
    /// range of its children in level `L`.
    ///
    /// # Panics
    /// Panics if the frame is complete or the children of level `L` are not
    /// grouped by non-decreasing parent.
    pub fn end_level(&mut self) -> BuildState {
        let level = match self.state {
            BuildState::Building(level) => level,
            BuildState::Complete => panic!("end_level on a complete frame"),
        };

        if level > 0 {
            let (lower, upper) = self.frame.levels.split_at_mut(level);
            let parents = &mut lower[level - 1].elements;
            let children = &upper[0].elements;

            let mut cursor = 0;
            for (index, parent) in parents.iter_mut().enumerate() {
                parent.begin = cursor;
                while cursor < children.len()
                    && self
                        .info
                        .component(self.monomial_space.get(children[cursor].monom))
                        == index
                {
                    cursor += 1;
                }
                parent.end = cursor;
            }
            assert_eq!(
                cursor,
                children.len(),
                "children of level {level} are not grouped by non-decreasing parent"
            );
        }

        self.stats.levels_finalized += 1;
        debug!(
            "Finalized level {} with {} elements",
            level,
            self.frame.levels[level].len()
        );

        self.state = if level >= self.config.max_level {
            info!(
                "Frame complete: {} elements over {} levels",
                self.total_elements(),
                self.frame.num_levels()
            );
            BuildState::Complete
        } else {
            self.frame.levels.push(Level::default());
            BuildState::Building(level + 1)
        };
        self.state
    }

    /// Lowest index of an element of `level` dividing `query`, or `None`.
    pub fn divisor_index(&self, level: usize, query: &[Word]) -> Option<usize> {
        self.divisor_index_in(level, 0..self.len(level), query)
    }

    /// Lowest index in `range` of an element of `level` dividing `query`.
    pub fn divisor_index_in(
        &self,
        level: usize,
        range: Range<usize>,
        query: &[Word],
    ) -> Option<usize> {
        range
            .into_iter()
            .find(|&i| self.info.divides(self.monomial(level, i), query))
    }

    /// Quotient of `query` by element `divisor` of `level`, attached to `divisor`.
    ///
    /// Inserted at `level + 1`, the quotient gets total degree
    /// `degree(level, divisor) + weighted_degree(query / divisor)`.
    ///
    /// # Panics
    /// Panics if the element does not divide `query`.
    pub fn compute_quotient(&self, level: usize, divisor: usize, query: &[Word]) -> PackedMonomial {
        self.info
            .quotient(divisor, query, self.monomial(level, divisor))
    }

    /// Current build state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Level currently accepting insertions, `None` once complete.
    pub fn current_level(&self) -> Option<usize> {
        match self.state {
            BuildState::Building(level) => Some(level),
            BuildState::Complete => None,
        }
    }

    /// Highest level of the frame.
    pub fn max_level(&self) -> usize {
        self.config.max_level
    }

    /// Configuration in use.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Ordering service shared with the caller.
    pub fn info(&self) -> &Arc<MonomialInfo> {
        &self.info
    }

    /// All levels.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Level `level`, empty if the build has not reached it.
    pub fn level(&self, level: usize) -> &Level {
        self.frame.levels.get(level).unwrap_or(&EMPTY_LEVEL)
    }

    /// Element `index` of `level`.
    pub fn element(&self, level: usize, index: usize) -> &FrameElement {
        &self.frame.levels[level].elements[index]
    }

    /// Packed monomial of element `index` of `level`.
    pub fn monomial(&self, level: usize, index: usize) -> &[Word] {
        self.monomial_space.get(self.element(level, index).monom)
    }

    /// Words stored under `handle`.
    ///
    /// # Panics
    /// Panics if the handle belongs to another frame.
    pub fn monomial_at(&self, handle: MonomialHandle) -> &[Word] {
        self.monomial_space.get(handle)
    }

    /// Total degree of element `index` of `level`.
    pub fn degree(&self, level: usize, index: usize) -> i64 {
        self.element(level, index).degree
    }

    /// Children range of element `index` of `level`.
    pub fn children(&self, level: usize, index: usize) -> Range<usize> {
        self.element(level, index).children()
    }

    /// Number of elements in `level`.
    pub fn len(&self, level: usize) -> usize {
        self.level(level).len()
    }

    /// Number of elements over all levels.
    pub fn total_elements(&self) -> usize {
        self.frame.levels.iter().map(Level::len).sum()
    }

    /// Monomial storage.
    pub fn arena(&self) -> &MonomialArena {
        &self.monomial_space
    }

    /// Statistics.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }
}

impl fmt::Debug for SchreyerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchreyerFrame")
            .field("state", &self.state)
            .field("max_level", &self.config.max_level)
            .field("elements", &self.total_elements())
            .field("arena", &self.monomial_space)
            .finish()
    }
}

impl fmt::Display for SchreyerFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SchreyerFrame (max level {}, {})",
            self.config.max_level, self.state
        )?;
        for (lev, level) in self.frame.levels.iter().enumerate() {
            if level.is_empty() {
                continue;
            }
            writeln!(f, "level {lev}: {} elements", level.len())?;
            for (index, element) in level.iter().enumerate() {
                let m = self.monomial_space.get(element.monom);
                write!(f, "  {index:>4}  deg {:>3}", element.degree)?;
                if lev > 0 {
                    write!(f, "  comp {:>4}", self.info.component(m))?;
                }
                writeln!(
                    f,
                    "  [{}, {})  {}",
                    element.begin,
                    element.end,
                    self.info.display(m)
                )?;
            }
        }
        Ok(())
    }
}
