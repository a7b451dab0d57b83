//! Convenience construction of snapshots from whole strings.

use crate::snapshot::{Snapshot, DEFAULT_BAND};

/// Builds a [`Snapshot`] by replaying single-character appends, so the
/// result is exactly what incremental use would have produced.
pub struct SnapshotBuilder {
    input: String,
    candidate: String,
    half_width: Option<usize>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            candidate: String::new(),
            half_width: None,
        }
    }

    /// Append to the input sequence.
    pub fn input(mut self, s: &str) -> Self {
        self.input.push_str(s);
        self
    }

    /// Append to the candidate sequence.
    pub fn candidate(mut self, s: &str) -> Self {
        self.candidate.push_str(s);
        self
    }

    /// Set the band half-width (defaults to [`DEFAULT_BAND`]).
    pub fn band(mut self, half_width: usize) -> Self {
        self.half_width = Some(half_width);
        self
    }

    pub fn build(self) -> Snapshot {
        let mut snap = Snapshot::with_band(self.half_width.unwrap_or(DEFAULT_BAND));
        for ch in self.input.chars() {
            snap = snap.append_input(ch);
        }
        for ch in self.candidate.chars() {
            snap = snap.append_candidate(ch);
        }
        snap
    }
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}
