//! Banded Incremental Damerau–Levenshtein (Band-DL)
//!
//! This crate ranks candidate match strings against a growing input (a
//! typing prefix, say) by maintaining a Damerau–Levenshtein cost table
//! restricted to a narrow band around the main diagonal.
//!
//! ## Core idea
//! 1. Appending one character to either sequence only adds one banded row
//!    or column: O(w) new cells, everything else shared with the previous
//!    snapshot.
//! 2. The banded final-corner value is an upper bound on the true distance;
//!    it is exact whenever the optimal alignment stays inside the band.
//! 3. When a query needs more, [`Snapshot::widen`] grows the band by one
//!    diagonal per side and relaxes only the cells the new diagonals can
//!    improve — never the whole table.
//!
//! Snapshots are immutable values: every operation returns a new snapshot
//! and the callee stays valid, so hosts fork one snapshot per lexicon
//! candidate and proceed independently (in parallel if they like; see the
//! `parallel` feature).
//!
//! ## Quick start
//! ```
//! use band_dl::SnapshotBuilder;
//!
//! let snap = SnapshotBuilder::new()
//!     .input("aadddres")
//!     .candidate("address")
//!     .build();
//!
//! // The narrow band over-estimates; resolving widens just far enough.
//! let (distance, resolved) = snap.final_cost();
//! assert_eq!(distance, 3);
//! assert!(resolved.band() >= 2);
//!
//! // Thresholding stops even earlier.
//! assert!(snap.within_threshold(4).0);
//! ```
//!
//! Distances follow the full Damerau–Levenshtein semantics: adjacent
//! transpositions are one edit, and a transposed pair may be separated by
//! later inserts/deletes (`"abc"` to `"cab"` costs 2).

pub mod builder;
pub mod cost;
pub mod matrix;
pub mod query;
pub mod snapshot;
pub mod utils;

pub use crate::builder::SnapshotBuilder;
pub use crate::cost::Cost;
#[cfg(feature = "parallel")]
pub use crate::query::batch_final_costs;
pub use crate::snapshot::{Snapshot, DEFAULT_BAND};
