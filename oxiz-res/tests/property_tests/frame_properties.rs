//! Property-based tests for Schreyer frames
//!
//! This module tests:
//! - Degree bookkeeping across levels
//! - Children ranges after each level is finalized
//! - Divisor search against a brute-force scan
//! - Quotient arithmetic

use oxiz_res::{MonomialInfo, SchreyerFrame, Word};
use proptest::prelude::*;
use std::sync::Arc;

const NVARS: usize = 3;

/// Strategy for small exponent vectors
fn exponents_strategy() -> impl Strategy<Value = Vec<Word>> {
    prop::collection::vec(0i64..4, NVARS)
}

/// Strategy for level 0 generators
fn generators_strategy() -> impl Strategy<Value = Vec<Vec<Word>>> {
    prop::collection::vec(exponents_strategy(), 1..7)
}

fn info() -> Arc<MonomialInfo> {
    Arc::new(MonomialInfo::new(NVARS).with_weights(&[1, 2, 1]))
}

fn resolved(info: &Arc<MonomialInfo>, gens: &[Vec<Word>]) -> SchreyerFrame {
    let mut frame = SchreyerFrame::new(Arc::clone(info), 4);
    for exps in gens {
        let m = info.from_exponents(exps);
        let degree = m.local_degree();
        frame.insert_level_zero(m, degree).unwrap();
    }
    frame.resolve().unwrap();
    frame
}

proptest! {
    /// degree(L, i) = local degree + degree of the parent
    #[test]
    fn degrees_follow_parents(gens in generators_strategy()) {
        let info = info();
        let frame = resolved(&info, &gens);

        for lev in 1..=frame.max_level() {
            for i in 0..frame.len(lev) {
                let m = frame.monomial(lev, i);
                let parent = info.component(m);
                prop_assert_eq!(
                    frame.degree(lev, i),
                    info.local_degree(m) + frame.degree(lev - 1, parent)
                );
            }
        }
    }

    /// Children ranges tile the next level in order
    #[test]
    fn children_ranges_tile(gens in generators_strategy()) {
        let info = info();
        let frame = resolved(&info, &gens);

        for lev in 0..frame.max_level() {
            let len = frame.len(lev);
            if len == 0 || frame.len(lev + 1) == 0 {
                continue;
            }
            prop_assert_eq!(frame.children(lev, 0).start, 0);
            for i in 0..len - 1 {
                prop_assert_eq!(frame.children(lev, i).end, frame.children(lev, i + 1).start);
            }
            prop_assert_eq!(frame.children(lev, len - 1).end, frame.len(lev + 1));

            for i in 0..len {
                for child in frame.children(lev, i) {
                    prop_assert_eq!(info.component(frame.monomial(lev + 1, child)), i);
                }
            }
        }
    }

    /// divisor_index finds the lowest dividing element
    #[test]
    fn divisor_index_is_lowest(gens in generators_strategy(), query in exponents_strategy()) {
        let info = info();
        let frame = resolved(&info, &gens);
        let query = info.from_exponents(&query);

        let expected = (0..frame.len(0)).find(|&i| {
            let exps = info.exponents(frame.monomial(0, i));
            exps.iter().zip(query.exponents()).all(|(a, b)| a <= b)
        });
        prop_assert_eq!(frame.divisor_index(0, &query), expected);
        prop_assert_eq!(frame.divisor_index(0, &query), expected);
    }

    /// A generator is found by searching for itself
    #[test]
    fn generator_finds_a_divisor(gens in generators_strategy(), pick in 0usize..7) {
        let info = info();
        let frame = resolved(&info, &gens);
        let pick = pick % gens.len();
        let m = info.from_exponents(&gens[pick]);

        let found = frame.divisor_index(0, &m);
        prop_assert!(matches!(found, Some(i) if i <= pick));
    }

    /// divisor + quotient = query, tagged with the divisor
    #[test]
    fn quotient_restores_query(gens in generators_strategy(), query in exponents_strategy()) {
        let info = info();
        let frame = resolved(&info, &gens);
        let query = info.from_exponents(&query);

        if let Some(i) = frame.divisor_index(0, &query) {
            let q = frame.compute_quotient(0, i, &query);
            prop_assert_eq!(q.component(), i);
            let divisor = info.exponents(frame.monomial(0, i));
            for ((d, e), m) in divisor.iter().zip(q.exponents()).zip(query.exponents()) {
                prop_assert_eq!(d + e, *m);
            }
            prop_assert_eq!(
                frame.degree(0, i) + q.local_degree(),
                query.local_degree()
            );
        }
    }

    /// Children of one parent are pairwise incomparable under divisibility
    #[test]
    fn children_are_minimal(gens in generators_strategy()) {
        let info = info();
        let frame = resolved(&info, &gens);

        for lev in 0..frame.max_level() {
            for i in 0..frame.len(lev) {
                let range = frame.children(lev, i);
                for a in range.clone() {
                    for b in range.clone() {
                        if a != b {
                            prop_assert!(!info.divides(
                                frame.monomial(lev + 1, a),
                                frame.monomial(lev + 1, b)
                            ));
                        }
                    }
                }
            }
        }
    }
}
