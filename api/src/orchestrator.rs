//! Benchmark cycle sequencing: stream run, optional compaction + settle,
//! dump run.

use crate::types::BenchmarkReport;
use log::{info, warn};
use membench_core::heap::HeapSampler;
use membench_core::runner::{run_strategy, RunResult, Strategy};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinError;

/// Optional host capability to compact the heap between runs. Injected so
/// its presence or absence is explicit instead of a process global.
pub type CompactionHook = Box<dyn Fn() + Send + Sync>;

/// Drives one full benchmark cycle per invocation.
///
/// Constructed once at startup and shared behind an `Arc`; holds no
/// per-request state beyond the in-flight guard.
pub struct Orchestrator {
    record_count: usize,
    sample_interval: usize,
    settle: Duration,
    sampler: Arc<dyn HeapSampler + Send + Sync>,
    compaction: Option<CompactionHook>,
    /// Two overlapping cycles would observe each other's heap pressure;
    /// concurrent requests queue here instead.
    in_flight: Mutex<()>,
}

impl Orchestrator {
    pub fn new(
        record_count: usize,
        sample_interval: usize,
        settle: Duration,
        sampler: Arc<dyn HeapSampler + Send + Sync>,
        compaction: Option<CompactionHook>,
    ) -> Self {
        Self {
            record_count,
            sample_interval,
            settle,
            sampler,
            compaction,
            in_flight: Mutex::new(()),
        }
    }

    /// Runs the stream strategy, compacts and settles when a hook is
    /// wired, then runs the dump strategy.
    ///
    /// The stream run executes first so the dump run's retained
    /// allocations cannot inflate the baseline it is measured against.
    /// A join failure from a run propagates to the caller; no retries.
    pub async fn run_cycle(&self) -> Result<BenchmarkReport, JoinError> {
        let _guard = self.in_flight.lock().await;

        info!(
            "Starting benchmark cycle: {} records per run, sampling every {}",
            self.record_count, self.sample_interval
        );
        let baseline_mb = self.sampler.sample_mb();
        info!("Heap in use before cycle: {:.2} MB", baseline_mb);

        let stream = self.execute(Strategy::Stream).await?;

        match &self.compaction {
            Some(compact) => {
                info!(
                    "Requesting heap compaction, settling for {} ms",
                    self.settle.as_millis()
                );
                compact();
                tokio::time::sleep(self.settle).await;
            }
            None => warn!("No heap compaction hook available; continuing without one"),
        }

        let dump = self.execute(Strategy::Dump).await?;

        info!("Benchmark cycle finished");
        Ok(BenchmarkReport { stream, dump })
    }

    /// The runs are synchronous and CPU-bound; keep them off the reactor.
    async fn execute(&self, strategy: Strategy) -> Result<RunResult, JoinError> {
        let sampler = Arc::clone(&self.sampler);
        let count = self.record_count;
        let interval = self.sample_interval;
        tokio::task::spawn_blocking(move || run_strategy(strategy, count, interval, sampler.as_ref()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{CompactionHook, Orchestrator};
    use membench_core::heap::HeapSampler;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Sample,
        Compact,
    }

    /// Sampler that records every consultation, shared with the
    /// compaction hook so the cycle's ordering is observable.
    struct ProbeSampler {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl HeapSampler for ProbeSampler {
        fn sample_mb(&self) -> f64 {
            let mut events = self.events.lock().unwrap();
            events.push(Event::Sample);
            events.len() as f64
        }
    }

    fn probed_orchestrator(
        with_hook: bool,
    ) -> (Arc<Orchestrator>, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));

        let hook: Option<CompactionHook> = if with_hook {
            let hook_events = Arc::clone(&events);
            Some(Box::new(move || {
                hook_events.lock().unwrap().push(Event::Compact);
            }))
        } else {
            None
        };

        let orchestrator = Arc::new(Orchestrator::new(
            100,
            50,
            Duration::ZERO,
            Arc::new(ProbeSampler {
                events: Arc::clone(&events),
            }),
            hook,
        ));

        (orchestrator, events)
    }

    #[tokio::test]
    async fn cycle_runs_stream_then_compaction_then_dump() {
        let (orchestrator, events) = probed_orchestrator(true);

        let report = orchestrator.run_cycle().await.expect("cycle");

        // Baseline sample, three stream samples (two periodic plus the
        // trailing one), the compaction, three dump samples.
        let recorded = events.lock().unwrap().clone();
        assert_eq!(recorded.len(), 8);
        assert_eq!(
            recorded.iter().filter(|e| **e == Event::Compact).count(),
            1
        );
        assert_eq!(
            recorded.iter().position(|e| *e == Event::Compact),
            Some(4),
            "compaction must separate the stream samples from the dump samples"
        );

        assert!(report.stream.time_ms > 0.0);
        assert!(report.dump.time_ms > 0.0);
    }

    #[tokio::test]
    async fn missing_compaction_hook_is_not_fatal() {
        let (orchestrator, events) = probed_orchestrator(false);

        let report = orchestrator.run_cycle().await.expect("cycle");

        let recorded = events.lock().unwrap().clone();
        assert_eq!(recorded.len(), 7);
        assert!(recorded.iter().all(|e| *e == Event::Sample));
        assert!(report.stream.time_ms > 0.0);
        assert!(report.dump.time_ms > 0.0);
    }

    #[tokio::test]
    async fn concurrent_cycles_are_serialized_by_the_guard() {
        let (orchestrator, events) = probed_orchestrator(true);

        let first = orchestrator.run_cycle();
        let second = orchestrator.run_cycle();
        let (a, b) = tokio::join!(first, second);
        a.expect("first cycle");
        b.expect("second cycle");

        // Each cycle's event pattern stays contiguous: the compactions
        // land at the same offsets they have when the cycles run alone.
        let recorded = events.lock().unwrap().clone();
        assert_eq!(recorded.len(), 16);
        let compact_positions: Vec<usize> = recorded
            .iter()
            .enumerate()
            .filter(|(_, e)| **e == Event::Compact)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(compact_positions, vec![4, 12]);
    }
}
