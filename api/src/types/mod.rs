use membench_core::runner::RunResult;
use serde::Serialize;

/// Combined output of one benchmark cycle.
///
/// The stream run always executes first, so its baseline is unaffected by
/// the dump run's retained records.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BenchmarkReport {
    pub stream: RunResult,
    pub dump: RunResult,
}
