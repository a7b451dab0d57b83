//! Observations over a snapshot: the banded heuristic, the exact distance,
//! and the within-threshold predicate.
//!
//! `final_cost` and `within_threshold` may widen internally; both return
//! the snapshot that resolved the answer alongside the answer itself, so
//! the widening work is published for reuse instead of being discarded.

use crate::cost::Cost;
use crate::snapshot::Snapshot;

impl Snapshot {
    /// The cost stored at the final corner `(m - 1, n - 1)`.
    ///
    /// An *upper bound* on the true Damerau–Levenshtein distance, exact
    /// whenever the optimal alignment never leaves the band. Empty-side
    /// cases fall through to the virtual boundary: both sequences empty
    /// reads 0, one empty reads the other's length.
    pub fn heuristic_final_cost(&self) -> Cost {
        let m = self.input_len() as isize;
        let n = self.candidate_len() as isize;
        self.cell(m - 1, n - 1)
    }

    /// The exact Damerau–Levenshtein distance, widening as needed.
    ///
    /// A banded result `v <= w` cannot be beaten by an alignment leaving
    /// the band (any cell at diagonal offset `d` costs at least `d`), so
    /// the loop stops at the first such value. It always terminates: no
    /// distance exceeds `max(m, n)`, and once `w` reaches that the band
    /// covers the whole table.
    pub fn final_cost(&self) -> (usize, Snapshot) {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "final_cost",
            m = self.input_len(),
            n = self.candidate_len(),
            start_band = self.band()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut current = self.clone();
        loop {
            if let Some(v) = current.heuristic_final_cost().finite() {
                if v <= current.band() {
                    return (v, current);
                }
            }
            current = current.widen();
        }
    }

    /// Decide `distance <= limit` exactly, widening only as far as needed.
    ///
    /// Once the heuristic fits under `limit` the answer is yes. Otherwise
    /// the band grows until either `w >= limit` (an alignment of cost
    /// `<= limit` would have stayed inside such a band, so none exists) or
    /// the band covers the whole table (the heuristic is exact and cannot
    /// improve further).
    pub fn within_threshold(&self, limit: usize) -> (bool, Snapshot) {
        let full = self.input_len().max(self.candidate_len());
        let mut current = self.clone();
        loop {
            if current.heuristic_final_cost() <= Cost::Finite(limit) {
                return (true, current);
            }
            if current.band() >= limit || current.band() >= full {
                return (false, current);
            }
            current = current.widen();
        }
    }
}

/// Resolve many candidates against one base snapshot in parallel.
///
/// Each candidate forks the base (typically an input-only snapshot),
/// appends its characters, and resolves the exact distance — the
/// fork-per-lexicon-entry pattern, spread over the rayon pool. Results are
/// in candidate order and identical to a serial map.
#[cfg(feature = "parallel")]
pub fn batch_final_costs(base: &Snapshot, candidates: &[&str]) -> Vec<usize> {
    use rayon::prelude::*;

    candidates
        .par_iter()
        .map(|cand| {
            let mut snap = base.clone();
            for ch in cand.chars() {
                snap = snap.append_candidate(ch);
            }
            snap.final_cost().0
        })
        .collect()
}
