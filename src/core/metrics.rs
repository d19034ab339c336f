//! Speedup and efficiency figures derived from per-configuration timings.
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::RunResult;

/// One line of the scaling table printed after a pool benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingRow {
    pub workers: usize,
    pub processed: usize,
    pub elapsed_secs: f64,
    pub speedup: f64,
    /// Percent
    pub efficiency: f64,
}

/// `baseline / measured`; 0.0 when nothing was measured.
pub fn speedup(baseline: Duration, measured: Duration) -> f64 {
    let measured = measured.as_secs_f64();
    if measured <= 0.0 {
        return 0.0;
    }
    baseline.as_secs_f64() / measured
}

/// Speedup per worker, as a percentage.
pub fn efficiency(speedup: f64, workers: usize) -> f64 {
    if workers == 0 {
        return 0.0;
    }
    speedup / workers as f64 * 100.0
}

/// Builds the scaling table. The single-worker result is the baseline; if the
/// benchmark did not include one, the first result is used instead.
pub fn scaling_table(results: &[RunResult]) -> Vec<ScalingRow> {
    let Some(baseline) = results
        .iter()
        .find(|r| r.workers == 1)
        .or_else(|| results.first())
        .map(|r| r.elapsed)
    else {
        return Vec::new();
    };

    results
        .iter()
        .map(|r| {
            let s = speedup(baseline, r.elapsed);
            ScalingRow {
                workers: r.workers,
                processed: r.processed,
                elapsed_secs: r.elapsed.as_secs_f64(),
                speedup: s,
                efficiency: efficiency(s, r.workers),
            }
        })
        .collect()
}

/// Sum of per-node busy time over the wall-clock time of the whole run, i.e. how
/// many times longer the same work would take back to back.
pub fn overlap_factor(nodes: &[RunResult], wall: Duration) -> f64 {
    let busy: Duration = nodes.iter().map(|r| r.elapsed).sum();
    speedup(busy, wall)
}
