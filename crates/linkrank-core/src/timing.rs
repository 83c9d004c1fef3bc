//! Per-stage wall-clock timing.
//!
//! Pipeline stages (load, adjacency, co-relation, iteration, extraction)
//! wrap their work in [`timed`]. Nothing is recorded unless collection is
//! switched on with [`set_timing_enabled`], so the wrapper costs one
//! atomic load in normal runs. Samples live in a thread-local buffer and
//! are drained by [`collect_report`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde_json::json;

/// Environment variable that turns timing on without the CLI flag.
pub const TIMING_ENV: &str = "LINKRANK_TIMING";

/// Aggregated timings, one entry per stage name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingReport {
    pub stages: Vec<StageTiming>,
}

/// Totals for one named stage across every dataset processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTiming {
    pub stage: String,
    /// Number of times the stage ran.
    pub runs: usize,
    /// Sum of all runs.
    pub total: Duration,
    /// Slowest single run.
    pub slowest: Duration,
}

thread_local! {
    static SAMPLES: RefCell<Vec<(String, Duration)>> = const { RefCell::new(Vec::new()) };
}

static TIMING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Returns true when [`TIMING_ENV`] holds a truthy value
/// (`1`, `true`, `yes`, `on`, case-insensitive).
#[must_use]
pub fn timing_enabled_from_env() -> bool {
    std::env::var(TIMING_ENV)
        .ok()
        .is_some_and(|value| is_truthy(&value))
}

/// Enable or disable collection. Disabling drops pending samples.
pub fn set_timing_enabled(enabled: bool) {
    TIMING_ENABLED.store(enabled, Ordering::Relaxed);
    if !enabled {
        clear_timings();
    }
}

#[must_use]
pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::Relaxed)
}

/// Drop every sample recorded on the current thread.
pub fn clear_timings() {
    SAMPLES.with(|samples| samples.borrow_mut().clear());
}

/// Run `f`, recording its duration under `stage` when timing is enabled.
pub fn timed<R>(stage: &str, f: impl FnOnce() -> R) -> R {
    if !is_timing_enabled() {
        return f();
    }

    let started = Instant::now();
    let result = f();
    record_sample(stage, started.elapsed());
    result
}

/// Drain the current thread's samples into a report ordered by stage name.
#[must_use]
pub fn collect_report() -> TimingReport {
    let samples = SAMPLES.with(|samples| std::mem::take(&mut *samples.borrow_mut()));

    let mut grouped: BTreeMap<String, StageTiming> = BTreeMap::new();
    for (stage, elapsed) in samples {
        let entry = grouped.entry(stage.clone()).or_insert_with(|| StageTiming {
            stage,
            runs: 0,
            total: Duration::ZERO,
            slowest: Duration::ZERO,
        });
        entry.runs += 1;
        entry.total += elapsed;
        entry.slowest = entry.slowest.max(elapsed);
    }

    TimingReport {
        stages: grouped.into_values().collect(),
    }
}

impl TimingReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let stages = self
            .stages
            .iter()
            .map(|s| {
                json!({
                    "stage": s.stage,
                    "runs": s.runs,
                    "total_us": s.total.as_micros(),
                    "slowest_us": s.slowest.as_micros(),
                })
            })
            .collect::<Vec<_>>();

        json!({ "stages": stages })
    }

    /// Render as a fixed-width table for stderr.
    #[must_use]
    pub fn display_table(&self) -> String {
        if self.stages.is_empty() {
            return "No timing samples recorded.".to_string();
        }

        let mut out = String::new();
        out.push_str("stage                  runs        total      slowest\n");
        out.push_str("-----------------------------------------------------\n");
        for s in &self.stages {
            let _ = writeln!(
                out,
                "{:<20} {:>6} {:>12} {:>12}",
                s.stage,
                s.runs,
                format_duration(s.total),
                format_duration(s.slowest)
            );
        }
        out
    }
}

fn record_sample(stage: &str, elapsed: Duration) {
    SAMPLES.with(|samples| samples.borrow_mut().push((stage.to_string(), elapsed)));
}

/// Human-friendly duration: `1.250s`, `3.004ms` or `17µs`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        format!("{}.{:03}s", micros / 1_000_000, (micros % 1_000_000) / 1_000)
    } else if micros >= 1_000 {
        format!("{}.{:03}ms", micros / 1_000, micros % 1_000)
    } else {
        format!("{micros}µs")
    }
}

fn is_truthy(value: &str) -> bool {
    ["1", "true", "yes", "on"]
        .iter()
        .any(|t| value.trim().eq_ignore_ascii_case(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn nothing_recorded_when_disabled() {
        let _guard = TEST_GUARD.lock().expect("test guard lock");
        set_timing_enabled(false);

        assert_eq!(timed("load", || 7_u8), 7);
        assert!(collect_report().is_empty());
    }

    #[test]
    fn stages_are_grouped_and_summed() {
        let _guard = TEST_GUARD.lock().expect("test guard lock");
        clear_timings();

        record_sample("hits", Duration::from_micros(3_000));
        record_sample("hits", Duration::from_micros(1_000));
        record_sample("adjacency", Duration::from_micros(500));

        let report = collect_report();
        assert_eq!(report.stages.len(), 2);
        assert_eq!(report.stages[0].stage, "adjacency");

        let hits = &report.stages[1];
        assert_eq!(hits.runs, 2);
        assert_eq!(hits.total, Duration::from_micros(4_000));
        assert_eq!(hits.slowest, Duration::from_micros(3_000));
    }

    #[test]
    fn timed_records_when_enabled() {
        let _guard = TEST_GUARD.lock().expect("test guard lock");
        set_timing_enabled(true);
        clear_timings();

        assert_eq!(timed("topk", || 42_u8), 42);
        let report = collect_report();
        assert_eq!(report.stages.len(), 1);
        assert_eq!(report.stages[0].runs, 1);

        set_timing_enabled(false);
    }

    #[test]
    fn table_and_json_carry_stage_names() {
        let _guard = TEST_GUARD.lock().expect("test guard lock");
        clear_timings();
        record_sample("corelation", Duration::from_micros(1_500));

        let report = collect_report();
        assert!(report.display_table().contains("corelation"));
        assert_eq!(report.to_json()["stages"][0]["total_us"], 1_500);
    }

    #[test]
    fn durations_format_by_magnitude() {
        assert_eq!(format_duration(Duration::from_micros(17)), "17µs");
        assert_eq!(format_duration(Duration::from_micros(3_004)), "3.004ms");
        assert_eq!(format_duration(Duration::from_millis(1_250)), "1.250s");
    }

    #[test]
    fn truthy_parser_is_case_insensitive() {
        assert!(is_truthy("TrUe"));
        assert!(is_truthy("1"));
        assert!(is_truthy("on"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
    }
}
