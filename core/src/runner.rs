//! Benchmark runner: drives the record generator through one strategy
//! while sampling the heap at a fixed cadence.

use crate::generator::{HeavyRecord, HeavyRecords};
use crate::heap::HeapSampler;
use crate::stats::summarize;
use log::info;
use serde::Serialize;
use std::hint::black_box;
use std::time::Instant;

/// What happens to each produced record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Inspect a cheap property of the record, then let it drop. Nothing
    /// accumulates beyond the record currently in flight.
    Stream,
    /// Append every record to one in-memory collection that lives for the
    /// whole run, so all records are held simultaneously at the end.
    Dump,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Stream => "stream",
            Strategy::Dump => "dump",
        }
    }

    fn progress_verb(self) -> &'static str {
        match self {
            Strategy::Stream => "Processed",
            Strategy::Dump => "Stored",
        }
    }
}

/// Timing and heap statistics for a single run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunResult {
    #[serde(rename = "timeMs")]
    pub time_ms: f64,
    #[serde(rename = "peakMemoryMB")]
    pub peak_memory_mb: f64,
    #[serde(rename = "avgMemoryMB")]
    pub avg_memory_mb: f64,
}

/// Run one strategy over `record_count` freshly generated records,
/// sampling the heap every `sample_interval` records.
///
/// A trailing sample is always taken after the loop completes, so a run
/// produces `record_count / sample_interval + 1` samples: at least one
/// even when the count never reaches the cadence, and a post-completion
/// reading even when it divides evenly.
pub fn run_strategy(
    strategy: Strategy,
    record_count: usize,
    sample_interval: usize,
    sampler: &dyn HeapSampler,
) -> RunResult {
    info!("Starting {} run over {} records", strategy.name(), record_count);

    let start = Instant::now();
    let mut samples: Vec<f64> = Vec::new();
    let mut retained: Vec<HeavyRecord> = Vec::new();
    let mut produced = 0usize;

    for record in HeavyRecords::new(record_count) {
        match strategy {
            Strategy::Dump => retained.push(record),
            // black_box keeps the read from being optimized away; the
            // record itself drops at the end of this arm.
            Strategy::Stream => {
                black_box(record.name.len());
            }
        }

        produced += 1;
        if produced % sample_interval == 0 {
            let mb = sampler.sample_mb();
            info!(
                "{} {} records | heap: {:.2} MB",
                strategy.progress_verb(),
                produced,
                mb
            );
            samples.push(mb);
        }
    }

    let elapsed = start.elapsed();
    // Mandatory trailing sample, taken while the dump run's retained
    // records are still alive.
    samples.push(sampler.sample_mb());

    let summary = summarize(&samples);
    info!(
        "Finished {} run: {:.1} ms, peak {:.2} MB over {} samples ({} records retained)",
        strategy.name(),
        elapsed.as_secs_f64() * 1_000.0,
        summary.peak,
        samples.len(),
        retained.len()
    );

    RunResult {
        time_ms: elapsed.as_secs_f64() * 1_000.0,
        peak_memory_mb: summary.peak,
        avg_memory_mb: summary.avg,
    }
}
