use band_dl::SnapshotBuilder;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_text(rng: &mut StdRng, len: usize) -> String {
    const ALPHABET: &[u8] = b"etaoinshrdlu";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// A lexicon of near and far candidates around one input string.
fn candidate_set(rng: &mut StdRng, input: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|k| {
            if k % 2 == 0 {
                // Near: flip a handful of characters.
                let mut chars: Vec<char> = input.chars().collect();
                for _ in 0..3 {
                    let at = rng.gen_range(0..chars.len());
                    chars[at] = 'z';
                }
                chars.into_iter().collect()
            } else {
                random_text(rng, input.len())
            }
        })
        .collect()
}

fn bench_within_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("within_threshold");
    for &len in &[64usize, 256, 1_024] {
        let mut rng = StdRng::seed_from_u64(9);
        let input = random_text(&mut rng, len);
        let candidates = candidate_set(&mut rng, &input, 16);
        let base = SnapshotBuilder::new().input(&input).build();

        group.bench_function(format!("threshold_5_len_{len}"), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for cand in &candidates {
                    let mut snap = base.clone();
                    for ch in cand.chars() {
                        snap = snap.append_candidate(ch);
                    }
                    if snap.within_threshold(5).0 {
                        hits += 1;
                    }
                }
                criterion::black_box(hits)
            })
        });
    }
    group.finish();
}

fn bench_final_cost_near_matches(c: &mut Criterion) {
    let mut group = c.benchmark_group("final_cost_near");
    for &len in &[64usize, 256, 1_024] {
        let mut rng = StdRng::seed_from_u64(11);
        let input = random_text(&mut rng, len);
        let mut chars: Vec<char> = input.chars().collect();
        chars.swap(len / 2, len / 2 + 1);
        let candidate: String = chars.into_iter().collect();
        let snap = SnapshotBuilder::new()
            .input(&input)
            .candidate(&candidate)
            .build();

        group.bench_function(format!("resolve_len_{len}"), |b| {
            b.iter(|| criterion::black_box(snap.final_cost().0))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_within_threshold, bench_final_cost_near_matches);
criterion_main!(benches);
