//! Banded sparse storage for the cost table.
//!
//! Row `r` materializes logical columns `r - w ..= r + w` in a dense array
//! of length `2w + 1`; logical column `c` lives at offset `c - r + w`.
//! Everything outside — the outer sentinel frame as well as the virtual
//! boundary at `r = -1` / `c = -1` — is folded into [`BandMatrix::read`]
//! and never stored.
//!
//! Rows sit behind `Arc` so that snapshots produced by append operations
//! share unchanged rows structurally; a row is deep-copied only at the
//! moment a new snapshot writes into it.

use std::sync::Arc;

use crate::cost::Cost;

/// Banded cost table for one snapshot.
#[derive(Clone, Debug)]
pub struct BandMatrix {
    half_width: usize,
    rows: Vec<Arc<Vec<Cost>>>,
}

impl BandMatrix {
    /// An empty table (no rows yet) at the given band half-width.
    pub fn new(half_width: usize) -> Self {
        Self {
            half_width,
            rows: Vec::new(),
        }
    }

    /// The band half-width `w`.
    #[inline]
    pub fn half_width(&self) -> usize {
        self.half_width
    }

    /// Number of materialized rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    fn row_len(&self) -> usize {
        2 * self.half_width + 1
    }

    /// Read a cell, resolving the virtual boundary frame:
    ///
    /// - `(-1, c)` with `c >= -1` reads `c + 1` and `(r, -1)` with `r >= -1`
    ///   reads `r + 1` (cost of aligning against an empty prefix);
    /// - indices below `-1`, cells outside the band, and unmaterialized or
    ///   unresolved slots read [`Cost::Infinite`].
    ///
    /// Reads are always legal, whatever the indices.
    pub fn read(&self, r: isize, c: isize) -> Cost {
        if r < -1 || c < -1 {
            return Cost::Infinite;
        }
        if r == -1 {
            return Cost::Finite((c + 1) as usize);
        }
        if c == -1 {
            return Cost::Finite((r + 1) as usize);
        }
        let (r, c) = (r as usize, c as usize);
        if r.abs_diff(c) > self.half_width {
            return Cost::Infinite;
        }
        match self.rows.get(r) {
            // In-band offset: c - r + w, rearranged to stay in unsigned space.
            Some(row) => row[c + self.half_width - r],
            None => Cost::Infinite,
        }
    }

    /// Overwrite a resolved cell.
    ///
    /// # Panics
    /// Panics when the cell lies outside the band or its row has not been
    /// materialized; out-of-range writes are programmer errors.
    pub fn write(&mut self, r: usize, c: usize, value: Cost) {
        assert!(
            r.abs_diff(c) <= self.half_width,
            "write outside band: ({r}, {c}) at half-width {}",
            self.half_width
        );
        let w = self.half_width;
        let rows = self.rows.len();
        let row = self
            .rows
            .get_mut(r)
            .unwrap_or_else(|| panic!("write to unmaterialized row {r} of {rows}"));
        Arc::make_mut(row)[c + w - r] = value;
    }

    /// Append a fresh row with every in-band slot unresolved.
    pub fn push_row(&mut self) {
        self.rows.push(Arc::new(vec![Cost::Infinite; self.row_len()]));
    }

    /// Re-lay the table out at half-width `w + 1`.
    ///
    /// Existing values keep their logical positions (each shifts one slot to
    /// the right inside its wider row); the two new outer diagonals start
    /// unresolved.
    pub fn grow(&self) -> BandMatrix {
        let wider_len = self.row_len() + 2;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut wider = vec![Cost::Infinite; wider_len];
                wider[1..=self.row_len()].copy_from_slice(row);
                Arc::new(wider)
            })
            .collect();
        BandMatrix {
            half_width: self.half_width + 1,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BandMatrix;
    use crate::cost::Cost;

    #[test]
    fn virtual_boundary_values() {
        let m = BandMatrix::new(1);
        assert_eq!(m.read(-1, -1), Cost::Finite(0));
        assert_eq!(m.read(-1, 3), Cost::Finite(4));
        assert_eq!(m.read(2, -1), Cost::Finite(3));
        assert_eq!(m.read(-2, 0), Cost::Infinite);
        assert_eq!(m.read(0, -2), Cost::Infinite);
    }

    #[test]
    fn out_of_band_and_unresolved_read_infinite() {
        let mut m = BandMatrix::new(1);
        m.push_row();
        assert_eq!(m.read(0, 2), Cost::Infinite, "outside the band");
        assert_eq!(m.read(0, 1), Cost::Infinite, "in band but unresolved");
        assert_eq!(m.read(5, 5), Cost::Infinite, "row not materialized");
    }

    #[test]
    fn write_then_read_roundtrip() {
        let mut m = BandMatrix::new(2);
        m.push_row();
        m.push_row();
        m.write(1, 3, Cost::Finite(4));
        assert_eq!(m.read(1, 3), Cost::Finite(4));
        // Neighbors in the same row stay unresolved.
        assert_eq!(m.read(1, 2), Cost::Infinite);
    }

    #[test]
    #[should_panic(expected = "outside band")]
    fn out_of_band_write_panics() {
        let mut m = BandMatrix::new(1);
        m.push_row();
        m.write(0, 2, Cost::ZERO);
    }

    #[test]
    #[should_panic(expected = "unmaterialized row")]
    fn write_past_last_row_panics() {
        let mut m = BandMatrix::new(1);
        m.write(0, 0, Cost::ZERO);
    }

    #[test]
    fn grow_preserves_logical_positions() {
        let mut m = BandMatrix::new(1);
        m.push_row();
        m.push_row();
        m.write(0, 0, Cost::Finite(0));
        m.write(0, 1, Cost::Finite(1));
        m.write(1, 0, Cost::Finite(1));

        let g = m.grow();
        assert_eq!(g.half_width(), 2);
        assert_eq!(g.read(0, 0), Cost::Finite(0));
        assert_eq!(g.read(0, 1), Cost::Finite(1));
        assert_eq!(g.read(1, 0), Cost::Finite(1));
        // Newly included diagonal starts unresolved.
        assert_eq!(g.read(0, 2), Cost::Infinite);
        // Copy-on-write: the original is untouched.
        assert_eq!(m.read(0, 2), Cost::Infinite);
        assert_eq!(m.half_width(), 1);
    }

    #[test]
    fn cow_rows_do_not_leak_writes_between_clones() {
        let mut a = BandMatrix::new(1);
        a.push_row();
        a.write(0, 0, Cost::Finite(0));
        let mut b = a.clone();
        b.write(0, 1, Cost::Finite(7));
        assert_eq!(b.read(0, 1), Cost::Finite(7));
        assert_eq!(a.read(0, 1), Cost::Infinite, "published rows never change");
    }
}
