//! Constants module - the fixed benchmark workload and service defaults

// =============================================================================
// Workload shape
// =============================================================================

/// Records generated per benchmark run. Large enough that the dump
/// strategy's retained set dominates the heap profile.
pub const DATA_SIZE: usize = 15_000_000;

/// Sampling cadence: one heap reading every this many records.
pub const SAMPLE_INTERVAL: usize = 100_000;

/// Length of a record's `name` field.
pub const NAME_LEN: usize = 500;
/// Length of a record's `description` field.
pub const DESCRIPTION_LEN: usize = 500;

/// Fill content for the two payload fields. Constant within a run so the
/// strategies allocate identical byte counts per record.
pub const NAME_FILL: &str = "x";
pub const DESCRIPTION_FILL: &str = "y";

// =============================================================================
// Orchestration
// =============================================================================

/// Pause after a compaction request, letting reclamation finish before the
/// dump run starts. Empirical, tunable.
pub const SETTLE_MS: u64 = 2_000;

// =============================================================================
// Service defaults
// =============================================================================

/// Default HTTP port when `BENCH_PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Default public-assets directory when `BENCH_PUBLIC_DIR` is not set.
pub const DEFAULT_PUBLIC_DIR: &str = "public";
