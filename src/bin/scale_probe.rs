use std::env;
use std::process::ExitCode;
use std::time::Instant;

use band_dl::{Cost, Snapshot, SnapshotBuilder};
use sysinfo::{get_current_pid, ProcessExt, ProcessRefreshKind, System, SystemExt};

const USAGE: &str = "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table>   How to print the result rows (default: table)
  --oracle-limit <N>     Largest sequence length checked against the naive
                         O(mn) oracle (default: 512)
  -h, --help             Show this message
";

fn main() -> ExitCode {
    let config = match ProbeConfig::from_args() {
        Ok(Some(config)) => config,
        Ok(None) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("scale_probe: {err}");
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    eprintln!();
    eprintln!("Band-DL scaling probe");
    eprintln!("Scenarios: incremental typing, widening sweep, threshold queries.");
    eprintln!(
        "Sizes up to {} are cross-checked against the naive O(mn) oracle;",
        config.oracle_limit
    );
    eprintln!("larger sizes only demonstrate that time and memory stay banded.");
    eprintln!();

    let mut sys = System::new();
    let mut rows = Vec::new();

    eprintln!("[1/3] Incremental typing (one append per keystroke, resolve at the end)");
    rows.extend(run_incremental_typing(&config, &mut sys));
    eprintln!("[2/3] Widening sweep (heuristic tightening as the band grows)");
    rows.extend(run_widening_sweep(&config, &mut sys));
    eprintln!("[3/3] Threshold queries (within_threshold over drifting candidates)");
    rows.extend(run_threshold_queries(&config, &mut sys));
    eprintln!();

    match config.format {
        Format::Csv => print_csv(&rows),
        Format::Table => print_table(&rows),
    }

    let mismatches = rows
        .iter()
        .filter(|row| matches!(row.check, Check::Mismatch(_)))
        .count();
    if mismatches > 0 {
        eprintln!("scale_probe: {mismatches} row(s) disagreed with the oracle");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

struct ProbeConfig {
    format: Format,
    oracle_limit: usize,
}

enum Format {
    Csv,
    Table,
}

impl ProbeConfig {
    /// Parse the two knobs this probe has. `Ok(None)` means help was asked
    /// for. Both `--flag value` and `--flag=value` spellings are accepted.
    fn from_args() -> Result<Option<Self>, String> {
        let mut config = ProbeConfig {
            format: Format::Table,
            oracle_limit: 512,
        };
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg.to_string(), None),
            };
            match flag.as_str() {
                "-h" | "--help" => return Ok(None),
                "--format" => {
                    config.format = match value_for(&flag, inline, &mut args)?.as_str() {
                        "csv" => Format::Csv,
                        "table" => Format::Table,
                        other => {
                            return Err(format!("'{other}' is not a format (csv or table)"))
                        }
                    };
                }
                "--oracle-limit" => {
                    let value = value_for(&flag, inline, &mut args)?;
                    config.oracle_limit = value
                        .parse()
                        .map_err(|_| format!("--oracle-limit wants a length, got '{value}'"))?;
                }
                other => return Err(format!("unknown option '{other}'")),
            }
        }
        Ok(Some(config))
    }
}

fn value_for(
    flag: &str,
    inline: Option<String>,
    rest: &mut impl Iterator<Item = String>,
) -> Result<String, String> {
    inline
        .or_else(|| rest.next())
        .ok_or_else(|| format!("{flag} needs a value"))
}

/// One measured scenario size.
struct ProbeRow {
    scenario: &'static str,
    size: String,
    seconds: f64,
    rss_kib: u64,
    check: Check,
}

/// Outcome of the oracle cross-check for one row.
enum Check {
    /// Size was above the oracle limit.
    Skipped,
    Ok,
    Mismatch(String),
}

impl Check {
    fn label(&self) -> &'static str {
        match self {
            Check::Skipped => "skipped",
            Check::Ok => "ok",
            Check::Mismatch(_) => "MISMATCH",
        }
    }

    fn note(&self) -> &str {
        match self {
            Check::Mismatch(why) => why,
            _ => "",
        }
    }
}

fn verdict(want: usize, got: usize) -> Check {
    if want == got {
        Check::Ok
    } else {
        Check::Mismatch(format!("oracle says {want}, engine says {got}"))
    }
}

/// Run `work`, pairing its result with wall-clock seconds and RSS growth.
fn timed<T>(sys: &mut System, work: impl FnOnce() -> T) -> (T, f64, u64) {
    let rss_before = resident_kib(sys);
    let start = Instant::now();
    let out = work();
    let seconds = start.elapsed().as_secs_f64();
    let rss_after = resident_kib(sys);
    (out, seconds, rss_after.saturating_sub(rss_before))
}

fn resident_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory())
}

fn run_incremental_typing(config: &ProbeConfig, sys: &mut System) -> Vec<ProbeRow> {
    const SIZES: &[usize] = &[64, 256, 1024, 4096, 16384];

    let mut rows = Vec::new();
    for &len in SIZES {
        let ((distance, check), seconds, rss_kib) = timed(sys, || {
            let typed = drifting_text(len, 0);
            let target = drifting_text(len, 3);

            // One append per keystroke, interleaved like live input.
            let mut snap = Snapshot::new();
            let mut keys = typed.chars();
            let mut goal = target.chars();
            loop {
                match (keys.next(), goal.next()) {
                    (None, None) => break,
                    (a, b) => {
                        if let Some(ch) = a {
                            snap = snap.append_input(ch);
                        }
                        if let Some(ch) = b {
                            snap = snap.append_candidate(ch);
                        }
                    }
                }
            }
            let distance = snap.final_cost().0;

            let check = if len <= config.oracle_limit {
                verdict(oracle_distance(&typed, &target), distance)
            } else {
                Check::Skipped
            };
            (distance, check)
        });
        eprintln!(
            "      len {len:>6}: distance={distance}, {seconds:.3}s [{}]",
            check.label()
        );
        rows.push(ProbeRow {
            scenario: "incremental_typing",
            size: format!("len={len}"),
            seconds,
            rss_kib,
            check,
        });
    }
    rows
}

fn run_widening_sweep(config: &ProbeConfig, sys: &mut System) -> Vec<ProbeRow> {
    const SIZES: &[usize] = &[64, 256, 1024, 4096];
    const MAX_BAND: usize = 8;

    let mut rows = Vec::new();
    for &len in SIZES {
        let ((sweep, check), seconds, rss_kib) = timed(sys, || {
            let typed = drifting_text(len, 0);
            let target = shifted_text(&typed, 2);

            let mut snap = SnapshotBuilder::new()
                .input(&typed)
                .candidate(&target)
                .build();
            let mut sweep = vec![snap.heuristic_final_cost()];
            while snap.band() < MAX_BAND {
                snap = snap.widen();
                sweep.push(snap.heuristic_final_cost());
            }

            let check = if sweep.windows(2).any(|pair| pair[1] > pair[0]) {
                Check::Mismatch(format!("heuristic loosened while widening: {sweep:?}"))
            } else if len <= config.oracle_limit {
                verdict(oracle_distance(&typed, &target), snap.final_cost().0)
            } else {
                Check::Skipped
            };
            (sweep, check)
        });
        let rendered: Vec<String> = sweep.iter().map(Cost::to_string).collect();
        eprintln!(
            "      len {len:>6}: {} ({seconds:.3}s) [{}]",
            rendered.join(" -> "),
            check.label()
        );
        rows.push(ProbeRow {
            scenario: "widening_sweep",
            size: format!("len={len}"),
            seconds,
            rss_kib,
            check,
        });
    }
    rows
}

fn run_threshold_queries(config: &ProbeConfig, sys: &mut System) -> Vec<ProbeRow> {
    const SIZES: &[usize] = &[64, 256, 1024];
    const CANDIDATES: usize = 32;
    const LIMIT: usize = 6;

    let mut rows = Vec::new();
    for &len in SIZES {
        let ((accepted, check), seconds, rss_kib) = timed(sys, || {
            let typed = drifting_text(len, 0);
            let base = SnapshotBuilder::new().input(&typed).build();

            let mut accepted = 0usize;
            let mut wrong = Vec::new();
            for k in 0..CANDIDATES {
                let cand = drifting_text(len, k);
                let mut snap = base.clone();
                for ch in cand.chars() {
                    snap = snap.append_candidate(ch);
                }
                let hit = snap.within_threshold(LIMIT).0;
                accepted += usize::from(hit);
                if len <= config.oracle_limit && hit != (oracle_distance(&typed, &cand) <= LIMIT)
                {
                    wrong.push(k);
                }
            }

            let check = if len > config.oracle_limit {
                Check::Skipped
            } else if wrong.is_empty() {
                Check::Ok
            } else {
                Check::Mismatch(format!("predicate wrong for candidates {wrong:?}"))
            };
            (accepted, check)
        });
        eprintln!(
            "      len {len:>6}: accepted {accepted}/{CANDIDATES} ({seconds:.3}s) [{}]",
            check.label()
        );
        rows.push(ProbeRow {
            scenario: "threshold_queries",
            size: format!("len={len},candidates={CANDIDATES}"),
            seconds,
            rss_kib,
            check,
        });
    }
    rows
}

fn print_csv(rows: &[ProbeRow]) {
    println!("scenario,size,seconds,rss_kib,check,note");
    for row in rows {
        println!(
            "{},{},{:.3},{},{},{}",
            row.scenario,
            row.size,
            row.seconds,
            row.rss_kib,
            row.check.label(),
            row.check.note().replace(',', ";")
        );
    }
}

fn print_table(rows: &[ProbeRow]) {
    println!(
        "{:<20} {:<26} {:>9} {:>9}  check",
        "scenario", "size", "seconds", "rss_kib"
    );
    for row in rows {
        print!(
            "{:<20} {:<26} {:>9.3} {:>9}  {}",
            row.scenario,
            row.size,
            row.seconds,
            row.rss_kib,
            row.check.label()
        );
        match row.check.note() {
            "" => println!(),
            note => println!(" ({note})"),
        }
    }
}

/// Deterministic lowercase text with a phase offset, so two offsets give
/// mostly-similar strings with periodic disagreements.
fn drifting_text(len: usize, offset: usize) -> String {
    const ALPHABET: &[u8] = b"etaoinshrdlu";
    (0..len)
        .map(|i| {
            let bump = usize::from(i % 97 == 96) * offset;
            ALPHABET[(i + bump) % ALPHABET.len()] as char
        })
        .collect()
}

/// The same text with `swaps` adjacent pairs exchanged near the front.
fn shifted_text(text: &str, swaps: usize) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    for k in 0..swaps {
        let i = k * 7 + 1;
        if i + 1 < chars.len() {
            chars.swap(i, i + 1);
        }
    }
    chars.into_iter().collect()
}

/// Naive full-matrix Damerau-Levenshtein with a last-occurrence table; the
/// behavioral oracle for verification runs.
fn oracle_distance(a: &str, b: &str) -> usize {
    use std::collections::HashMap;

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
