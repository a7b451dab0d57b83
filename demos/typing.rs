//! Example: scoring a candidate while the user types.
//!
//! Run with:
//! `cargo run --example typing`
//!
//! Each keystroke appends one input character; the candidate was appended
//! up front. The banded heuristic is read after every keystroke, and the
//! exact distance is resolved once at the end.

use band_dl::{Snapshot, SnapshotBuilder};

fn main() {
    let candidate = "address";
    let typed = "aadddres";

    let mut snap = SnapshotBuilder::new().candidate(candidate).build();
    println!("candidate: {candidate:?}");

    for ch in typed.chars() {
        snap = snap.append_input(ch);
        let prefix: String = snap.input().iter().collect();
        println!(
            "typed {prefix:>9?}  heuristic <= {}  (band {})",
            snap.heuristic_final_cost(),
            snap.band()
        );
    }

    let (distance, resolved) = snap.final_cost();
    println!("exact distance: {distance} (resolved at band {})", resolved.band());

    report_threshold(&snap, 2);
    report_threshold(&snap, 3);
}

fn report_threshold(snap: &Snapshot, limit: usize) {
    let (hit, resolved) = snap.within_threshold(limit);
    println!(
        "within {limit} edits? {hit} (decided at band {})",
        resolved.band()
    );
}
