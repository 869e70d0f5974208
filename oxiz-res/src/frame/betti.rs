//! Betti numbers of a frame.
//!
//! Counting frame elements by level and slanted degree (`degree - level`)
//! gives the non-minimal Betti numbers, an upper bound for the minimal ones.
//! Only slanted degrees that occur get a row, so the table stays small for
//! any spread of degrees.

use super::SchreyerFrame;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// Counts for one slanted degree, indexed by level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct BettiRow {
    /// `degree - level`, widened so every `i64` degree has one
    slanted: i128,
    counts: Vec<usize>,
}

/// Element counts indexed by level and slanted degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BettiTable {
    /// Rows in increasing slanted degree
    rows: Vec<BettiRow>,
    num_levels: usize,
}

impl BettiTable {
    fn from_entries(entries: FxHashMap<i128, Vec<usize>>, num_levels: usize) -> Self {
        let mut rows: Vec<BettiRow> = entries
            .into_iter()
            .map(|(slanted, counts)| BettiRow { slanted, counts })
            .collect();
        rows.sort_unstable_by_key(|row| row.slanted);

        Self { rows, num_levels }
    }

    /// Count at `level` and slanted degree `slanted`.
    pub fn get(&self, level: usize, slanted: i128) -> usize {
        if level >= self.num_levels {
            return 0;
        }
        self.rows
            .binary_search_by_key(&slanted, |row| row.slanted)
            .map_or(0, |r| self.rows[r].counts[level])
    }

    /// Total count at `level`.
    pub fn total(&self, level: usize) -> usize {
        if level >= self.num_levels {
            return 0;
        }
        self.rows.iter().map(|row| row.counts[level]).sum()
    }

    /// Number of levels up to the last non-empty one.
    pub fn len(&self) -> usize {
        self.num_levels
    }

    /// Check if the frame had no elements.
    pub fn is_empty(&self) -> bool {
        self.num_levels == 0
    }

    /// Slanted degrees with a row in the table, increasing.
    pub fn slanted_degrees(&self) -> impl Iterator<Item = i128> + '_ {
        self.rows.iter().map(|row| row.slanted)
    }
}

impl fmt::Display for BettiTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals: Vec<usize> = (0..self.num_levels).map(|l| self.total(l)).collect();
        let width = totals
            .iter()
            .map(|t| t.to_string().len())
            .chain((0..self.num_levels).map(|l| l.to_string().len()))
            .max()
            .unwrap_or(1);
        let label = self
            .slanted_degrees()
            .map(|s| s.to_string().len() + 1)
            .chain(std::iter::once("total:".len()))
            .max()
            .unwrap_or(6);

        write!(f, "{:>label$}", "")?;
        for level in 0..self.num_levels {
            write!(f, " {level:>width$}")?;
        }
        writeln!(f)?;

        write!(f, "{:>label$}", "total:")?;
        for total in &totals {
            write!(f, " {total:>width$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:>label$}", format!("{}:", row.slanted))?;
            for &count in &row.counts {
                if count == 0 {
                    write!(f, " {:>width$}", ".")?;
                } else {
                    write!(f, " {count:>width$}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl SchreyerFrame {
    /// Non-minimal Betti numbers of the levels built so far.
    pub fn betti(&self) -> BettiTable {
        let num_levels = self
            .frame
            .iter()
            .rposition(|level| !level.is_empty())
            .map_or(0, |last| last + 1);

        let mut entries: FxHashMap<i128, Vec<usize>> = FxHashMap::default();
        for (lev, level) in self.frame.iter().enumerate().take(num_levels) {
            for element in level.iter() {
                let slanted = i128::from(element.degree()) - lev as i128;
                entries
                    .entry(slanted)
                    .or_insert_with(|| vec![0; num_levels])[lev] += 1;
            }
        }
        BettiTable::from_entries(entries, num_levels)
    }
}
