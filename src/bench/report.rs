//! Benchmark report persistence

use std::io;
use std::path::Path;

use super::PerformanceResult;

/// CSV header row. The column set is part of the report contract.
const HEADER: &str = "Culling Mode,Average Frame Time (ms),FPS";

/// Write the results table as CSV, one row per completed mode in completion
/// order, overwriting any prior file at `path`.
pub fn save(path: &Path, results: &[PerformanceResult]) -> io::Result<()> {
    let mut out = String::with_capacity(64 + results.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for result in results {
        out.push_str(&format!(
            "{},{:.4},{:.1}\n",
            result.mode.name(),
            result.average_frame_time_ms,
            result.fps
        ));
    }
    std::fs::write(path, out)
}

/// Echo the results table to the console
pub fn print(results: &[PerformanceResult]) {
    log::info!("=== PERFORMANCE RESULTS ===");
    log::info!("{:>15} {:>20} {:>10}", "Mode", "Avg Frame Time (ms)", "FPS");
    log::info!("{}", "-".repeat(46));
    for result in results {
        log::info!(
            "{:>15} {:>20.4} {:>10.1}",
            result.mode.name(),
            result.average_frame_time_ms,
            result.fps
        );
    }
    log::info!("==========================");
}
