use log::{info, LevelFilter};
use membench_api::orchestrator::Orchestrator;
use membench_api::{app, AppState};
use membench_core::constants::{
    DATA_SIZE, DEFAULT_PORT, DEFAULT_PUBLIC_DIR, SAMPLE_INTERVAL, SETTLE_MS,
};
use membench_core::heap::{CountingAllocator, LiveHeapSampler};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// Without this the sampler has nothing to read: the counter only moves
// when the tracking allocator serves this binary's allocations.
#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

fn parse_log_level(value: &str) -> Option<LevelFilter> {
    match value.to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

fn resolve_log_level() -> LevelFilter {
    env::var("BENCH_LOG_LEVEL")
        .ok()
        .as_deref()
        .and_then(parse_log_level)
        .unwrap_or(LevelFilter::Info)
}

fn resolve_log_file() -> Option<String> {
    match env::var("BENCH_LOG_FILE") {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => Some("membench.log".to_string()),
    }
}

fn resolve_bind_addr() -> String {
    env::var("BENCH_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string())
}

fn resolve_port() -> u16 {
    env::var("BENCH_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn resolve_public_dir() -> PathBuf {
    env::var("BENCH_PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_PUBLIC_DIR))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
        return;
    }
    info!("Got signal to terminate. Shutdown initiated...");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_level = resolve_log_level();
    let log_file = resolve_log_file();
    membench_core::initialize_logger(log_level, log_file.as_deref())?;

    info!(
        "Benchmark service starting (level={}, logfile={})",
        log_level,
        log_file.as_deref().unwrap_or("none")
    );
    info!(
        "Workload: {} records per run, one heap sample every {} records",
        DATA_SIZE, SAMPLE_INTERVAL
    );

    // This runtime exposes no on-demand collector, so the compaction hook
    // stays empty; the orchestrator logs the degraded-mode warning per
    // cycle.
    let orchestrator = Arc::new(Orchestrator::new(
        DATA_SIZE,
        SAMPLE_INTERVAL,
        Duration::from_millis(SETTLE_MS),
        Arc::new(LiveHeapSampler),
        None,
    ));

    let state = AppState {
        orchestrator,
        public_dir: Arc::new(resolve_public_dir()),
    };
    let router = app(state);

    let bind_address = format!("{}:{}", resolve_bind_addr(), resolve_port());
    info!("Listening on {}", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown");
    Ok(())
}
