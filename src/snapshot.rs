//! The immutable calculation snapshot and its grow operations.
//!
//! A [`Snapshot`] carries the two sequences, the band half-width, and the
//! banded cost table. Every operation returns a *new* snapshot; the callee
//! is never mutated and stays safely observable, so snapshots can be forked
//! freely (one per lexicon candidate, say) and shared read-only across
//! threads.
//!
//! Three operations grow a snapshot:
//!
//! 1. [`append_input`](Snapshot::append_input) adds one row and fills its
//!    in-band cells left to right;
//! 2. [`append_candidate`](Snapshot::append_candidate) adds one column and
//!    fills its in-band cells top to bottom;
//! 3. [`widen`](Snapshot::widen) grows the band by one diagonal on each
//!    side. The two new diagonals are computed directly, then a worklist
//!    relaxation carries any resulting improvement back through the
//!    interior until the table is optimal at the new width again.
//!
//! Appends need no relaxation: a fresh cell only ever reads cells with
//! strictly smaller coordinates, so filling in coordinate order is already
//! a topological evaluation of the banded recurrence.

use std::collections::VecDeque;

use crate::cost::Cost;
use crate::matrix::BandMatrix;
use crate::utils::{occurrences_until, prev_occurrence};

/// Band half-width of a freshly created snapshot.
pub const DEFAULT_BAND: usize = 1;

/// An immutable state of the banded Damerau–Levenshtein calculation.
///
/// Typical usage:
/// ```
/// use band_dl::Snapshot;
///
/// let mut snap = Snapshot::new();
/// for ch in "teh".chars() {
///     snap = snap.append_input(ch);
/// }
/// for ch in "the".chars() {
///     snap = snap.append_candidate(ch);
/// }
/// let (distance, _resolved) = snap.final_cost();
/// assert_eq!(distance, 1);
/// ```
#[derive(Clone, Debug)]
pub struct Snapshot {
    input: Vec<char>,
    candidate: Vec<char>,
    matrix: BandMatrix,
}

impl Snapshot {
    /// An empty snapshot at the default half-width.
    pub fn new() -> Snapshot {
        Self::with_band(DEFAULT_BAND)
    }

    /// An empty snapshot at an explicit half-width.
    pub fn with_band(half_width: usize) -> Snapshot {
        Snapshot {
            input: Vec::new(),
            candidate: Vec::new(),
            matrix: BandMatrix::new(half_width),
        }
    }

    /// The input sequence (the growing side, e.g. what has been typed).
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// The candidate sequence the input is measured against.
    pub fn candidate(&self) -> &[char] {
        &self.candidate
    }

    /// The band half-width `w`.
    #[inline]
    pub fn band(&self) -> usize {
        self.matrix.half_width()
    }

    /// Length `m` of the input sequence.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Length `n` of the candidate sequence.
    #[inline]
    pub fn candidate_len(&self) -> usize {
        self.candidate.len()
    }

    /// Raw banded read, virtual boundary included.
    #[inline]
    pub(crate) fn cell(&self, r: isize, c: isize) -> Cost {
        self.matrix.read(r, c)
    }

    /// A snapshot whose input grew by `x`.
    ///
    /// Computes the one new row: cells `(m, c)` for
    /// `c in max(0, m - w) ..= min(n - 1, m + w)`, left to right so the
    /// insertion source is already resolved. O(w) cells.
    pub fn append_input(&self, x: char) -> Snapshot {
        let mut next = self.clone();
        next.input.push(x);
        next.matrix.push_row();

        let r = next.input.len() - 1;
        let w = next.band();
        let lo = r.saturating_sub(w);
        let hi = next.candidate.len().min(r + w + 1);
        for c in lo..hi {
            let v = next.local_cost(r, c);
            next.matrix.write(r, c, v);
        }
        next
    }

    /// A snapshot whose candidate grew by `y`.
    ///
    /// Computes the one new column: cells `(r, n)` for
    /// `r in max(0, n - w) ..= min(m - 1, n + w)`, top to bottom so the
    /// deletion source is already resolved. O(w) cells.
    pub fn append_candidate(&self, y: char) -> Snapshot {
        let mut next = self.clone();
        next.candidate.push(y);

        let c = next.candidate.len() - 1;
        let w = next.band();
        let lo = c.saturating_sub(w);
        let hi = next.input.len().min(c + w + 1);
        for r in lo..hi {
            let v = next.local_cost(r, c);
            next.matrix.write(r, c, v);
        }
        next
    }

    /// A snapshot with the band grown from `w` to `w + 1`.
    ///
    /// Already-resolved cells keep or improve their values; the two new
    /// outer diagonals are populated; improvements discovered on the new
    /// diagonals are relaxed through the interior so the whole table is
    /// band-optimal at the new width.
    pub fn widen(&self) -> Snapshot {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!(
            "widen",
            from = self.band(),
            m = self.input.len(),
            n = self.candidate.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut next = Snapshot {
            input: self.input.clone(),
            candidate: self.candidate.clone(),
            matrix: self.matrix.grow(),
        };
        let w = next.band();
        let n = next.candidate.len();

        // Phase 1: the two new outer diagonals, top to bottom. The
        // band-aware read already reports +inf for the insertion source of
        // a lower-diagonal cell and the deletion source of an upper one
        // (both sit outside even the new band), and supplies the virtual
        // values at the matrix edge, so the ordinary recurrence applies.
        let mut fresh = Vec::new();
        for r in 0..next.input.len() {
            if let Some(c) = r.checked_sub(w) {
                if c < n {
                    let v = next.local_cost(r, c);
                    next.matrix.write(r, c, v);
                    fresh.push((r, c));
                }
            }
            let c = r + w;
            if c < n {
                let v = next.local_cost(r, c);
                next.matrix.write(r, c, v);
                fresh.push((r, c));
            }
        }

        // Phase 2: interior cells that read the new diagonals may improve,
        // and their readers in turn.
        next.propagate(&fresh);
        next
    }

    /// Cost of cell `(r, c)` under the current band: minimum over
    /// substitution, insertion, deletion, and (when both indices are
    /// positive) transposition, saturating at +inf.
    fn local_cost(&self, r: usize, c: usize) -> Cost {
        let (ri, ci) = (r as isize, c as isize);
        let edit = usize::from(self.input[r] != self.candidate[c]);
        let substitution = self.matrix.read(ri - 1, ci - 1).saturating_add(edit);
        let insertion = self.matrix.read(ri, ci - 1).saturating_add(1);
        let deletion = self.matrix.read(ri - 1, ci).saturating_add(1);
        let mut best = substitution.min(insertion).min(deletion);
        if r > 0 && c > 0 {
            best = best.min(self.transposition_cost(r, c));
        }
        best
    }

    /// Transposition candidate for `(r, c)`: anchor one past the previous
    /// occurrence of each partner character, plus the edits needed to walk
    /// the two characters together. +inf when either partner never occurred.
    fn transposition_cost(&self, r: usize, c: usize) -> Cost {
        let anchor_row = prev_occurrence(&self.input, r, self.candidate[c]);
        let anchor_col = prev_occurrence(&self.candidate, c, self.input[r]);
        match (anchor_row, anchor_col) {
            (Some(pr), Some(pc)) => {
                let shuffle = (r - pr - 1) + 1 + (c - pc - 1);
                self.matrix
                    .read(pr as isize - 1, pc as isize - 1)
                    .saturating_add(shuffle)
            }
            _ => Cost::Infinite,
        }
    }

    /// Worklist relaxation: re-evaluate cells that read an updated cell and
    /// keep going while values strictly improve. Terminates because every
    /// accepted write strictly decreases one cell over a finite lattice.
    fn propagate(&mut self, seeds: &[(usize, usize)]) {
        let mut queue = VecDeque::new();
        for &(r, c) in seeds {
            if self.matrix.read(r as isize, c as isize).is_finite() {
                self.push_dependents(r, c, &mut queue);
            }
        }

        let mut relaxed = 0usize;
        while let Some((r, c)) = queue.pop_front() {
            let current = self.matrix.read(r as isize, c as isize);
            let recomputed = self.local_cost(r, c);
            if recomputed < current {
                self.matrix.write(r, c, recomputed);
                relaxed += 1;
                self.push_dependents(r, c, &mut queue);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(seeds = seeds.len(), relaxed, "band propagation settled");
        #[cfg(not(feature = "tracing"))]
        let _ = relaxed;
    }

    /// Enqueue every in-band cell whose recurrence reads `(r, c)`: the
    /// insertion, deletion, and substitution readers, plus the transposition
    /// readers anchored here.
    fn push_dependents(&self, r: usize, c: usize, queue: &mut VecDeque<(usize, usize)>) {
        let w = self.band();
        let m = self.input.len();
        let n = self.candidate.len();

        if c + 1 < n && r.abs_diff(c + 1) <= w {
            queue.push_back((r, c + 1));
        }
        if r + 1 < m && (r + 1).abs_diff(c) <= w {
            queue.push_back((r + 1, c));
        }
        if r + 1 < m && c + 1 < n {
            // Same diagonal offset as (r, c); always in band.
            queue.push_back((r + 1, c + 1));
        }

        // A cell (R, C) reads (r, c) as its transposition anchor exactly
        // when input[R] == candidate[c + 1], candidate[C] == input[r + 1],
        // and neither partner character re-occurs between the anchor and
        // (R, C) — the scans below cut off where the anchor would move.
        if r + 1 < m && c + 1 < n {
            let x = self.input[r + 1];
            let y = self.candidate[c + 1];
            let reader_rows = occurrences_until(&self.input, r + 2, y, x);
            let reader_cols = occurrences_until(&self.candidate, c + 2, x, y);
            for &tr in &reader_rows {
                for &tc in &reader_cols {
                    if tr.abs_diff(tc) <= w {
                        queue.push_back((tr, tc));
                    }
                }
            }
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}
