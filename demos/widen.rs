//! Example: watching the heuristic tighten as the band widens.
//!
//! Run with:
//! `cargo run --example widen`

use band_dl::SnapshotBuilder;

fn main() {
    let input = "abcdefghizx";
    let candidate = "daefhixyz";

    let mut snap = SnapshotBuilder::new()
        .input(input)
        .candidate(candidate)
        .build();

    println!("{input:?} vs {candidate:?}");
    println!("band {} -> heuristic {}", snap.band(), snap.heuristic_final_cost());

    while snap.band() < 4 {
        snap = snap.widen();
        println!("band {} -> heuristic {}", snap.band(), snap.heuristic_final_cost());
    }

    let (distance, resolved) = snap.final_cost();
    println!("exact distance: {distance} (band {})", resolved.band());
}
