//! The banded engine against the naive full-matrix oracle.

use std::collections::HashMap;

use band_dl::{Cost, Snapshot, SnapshotBuilder};
use proptest::prelude::*;

fn build(input: &str, candidate: &str, band: usize) -> Snapshot {
    SnapshotBuilder::new()
        .input(input)
        .candidate(candidate)
        .band(band)
        .build()
}

/// Naive Damerau-Levenshtein with a last-occurrence table: insertions,
/// deletions, substitutions, and (possibly separated) transpositions, all
/// at unit cost.
fn oracle_distance(a: &str, b: &str) -> usize {
    let s: Vec<char> = a.chars().collect();
    let t: Vec<char> = b.chars().collect();
    let (m, n) = (s.len(), t.len());
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let inf = m + n;
    let mut d = vec![vec![0usize; n + 2]; m + 2];
    d[0][0] = inf;
    for i in 0..=m {
        d[i + 1][0] = inf;
        d[i + 1][1] = i;
    }
    for j in 0..=n {
        d[0][j + 1] = inf;
        d[1][j + 1] = j;
    }

    let mut last_row: HashMap<char, usize> = HashMap::new();
    for i in 1..=m {
        let mut last_col = 0usize;
        for j in 1..=n {
            let k = *last_row.get(&t[j - 1]).unwrap_or(&0);
            let l = last_col;
            let cost = if s[i - 1] == t[j - 1] {
                last_col = j;
                0
            } else {
                1
            };
            d[i + 1][j + 1] = (d[i][j] + cost)
                .min(d[i + 1][j] + 1)
                .min(d[i][j + 1] + 1)
                .min(d[k][l] + (i - k - 1) + 1 + (j - l - 1));
        }
        last_row.insert(s[i - 1], i);
    }
    d[m + 1][n + 1]
}

proptest! {
    #[test]
    fn final_cost_matches_oracle(a in "[a-d]{0,12}", b in "[a-d]{0,12}") {
        let (cost, _) = build(&a, &b, 1).final_cost();
        prop_assert_eq!(cost, oracle_distance(&a, &b));
    }

    #[test]
    fn heuristic_never_underestimates(
        a in "[a-c]{0,10}",
        b in "[a-c]{0,10}",
        w in 0usize..5,
    ) {
        match build(&a, &b, w).heuristic_final_cost() {
            Cost::Finite(h) => prop_assert!(h >= oracle_distance(&a, &b)),
            Cost::Infinite => {}
        }
    }

    #[test]
    fn threshold_agrees_with_oracle(
        a in "[a-c]{0,10}",
        b in "[a-c]{0,10}",
        t in 0usize..8,
    ) {
        let (hit, _) = build(&a, &b, 1).within_threshold(t);
        prop_assert_eq!(hit, oracle_distance(&a, &b) <= t);
    }

    #[test]
    fn covering_band_heuristic_is_exact(a in "[a-c]{0,8}", b in "[a-c]{0,8}") {
        // Once w >= max(m, n) the band holds the whole table.
        let w = a.len().max(b.len()).max(1);
        let h = build(&a, &b, w).heuristic_final_cost();
        prop_assert_eq!(h, Cost::Finite(oracle_distance(&a, &b)));
    }
}

#[test]
fn empty_string_boundaries() {
    assert_eq!(build("", "", 1).final_cost().0, 0);
    assert_eq!(build("abcde", "", 1).final_cost().0, 5);
    assert_eq!(build("", "abc", 1).final_cost().0, 3);
    assert_eq!(build("", "abc", 0).final_cost().0, 3);
}

#[test]
fn oracle_sanity() {
    assert_eq!(oracle_distance("abc", "cab"), 2);
    assert_eq!(oracle_distance("teh", "the"), 1);
    assert_eq!(oracle_distance("", "xyz"), 3);
    assert_eq!(oracle_distance("same", "same"), 0);
}
