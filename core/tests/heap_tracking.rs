//! Integration tests with the counting allocator installed, exercising the
//! sampler and the two run strategies against real heap movement.

use membench_core::heap::{used_heap_bytes, CountingAllocator, LiveHeapSampler};
use membench_core::runner::{run_strategy, Strategy};
use std::sync::Mutex;

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

// The live-byte counter is process-wide; serialize the tests that read it
// so they don't observe each other's allocations.
static HEAP_LOCK: Mutex<()> = Mutex::new(());

#[test]
fn sampler_observes_allocation_growth_and_release() {
    let _guard = HEAP_LOCK.lock().unwrap();

    let before = used_heap_bytes();
    let block: Vec<u8> = vec![0u8; 32 * 1024 * 1024];
    let during = used_heap_bytes();
    assert!(
        during >= before + block.len(),
        "expected the counter to grow by at least {} bytes (before={before}, during={during})",
        block.len()
    );

    drop(block);
    let after = used_heap_bytes();
    assert!(
        after < during,
        "expected the counter to shrink after the drop (during={during}, after={after})"
    );
}

#[test]
fn dump_run_peaks_above_stream_run_for_the_same_workload() {
    let _guard = HEAP_LOCK.lock().unwrap();

    // 20,000 records at roughly a kilobyte each: the dump run retains
    // ~20 MB that the stream run never holds.
    let stream = run_strategy(Strategy::Stream, 20_000, 5_000, &LiveHeapSampler);
    let dump = run_strategy(Strategy::Dump, 20_000, 5_000, &LiveHeapSampler);

    assert!(
        dump.peak_memory_mb > stream.peak_memory_mb,
        "dump peak {:.2} MB should exceed stream peak {:.2} MB",
        dump.peak_memory_mb,
        stream.peak_memory_mb
    );
    assert!(stream.time_ms > 0.0);
    assert!(dump.time_ms > 0.0);
}

#[test]
fn live_run_statistics_are_ordered_and_non_negative() {
    let _guard = HEAP_LOCK.lock().unwrap();

    let result = run_strategy(Strategy::Stream, 50_000, 100_000, &LiveHeapSampler);

    // The cadence is never reached, so the single trailing sample is both
    // peak and avg.
    assert_eq!(result.peak_memory_mb, result.avg_memory_mb);
    assert!(result.peak_memory_mb >= 0.0);
    assert!(result.time_ms > 0.0);
}
