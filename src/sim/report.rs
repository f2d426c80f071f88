use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::stats::RunResult;

pub fn render_table(result: &RunResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "elapsed cycles        {:>12}", result.elapsed);
    let _ = writeln!(out, "completed processes   {:>12}", result.completed);
    let _ = writeln!(out, "throughput (proc/cyc) {:>12.6}", result.throughput);
    let _ = writeln!(out, "avg service time      {:>12.4}", result.average_service_time);
    let _ = writeln!(out, "core acquire retries  {:>12}", result.acquire_retries);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>4} {:>10} {:>10} {:>8} {:>8} {:>8}",
        "core", "busy", "util %", "L1 hit", "L2 hit", "miss"
    );
    for (id, util) in result.per_core_utilization.iter().enumerate() {
        let busy = result.busy_time.get(id).copied().unwrap_or(0);
        let cache = result.cache_stats.get(id).copied().unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>4} {:>10} {:>10.4} {:>8} {:>8} {:>8}",
            id,
            busy,
            util,
            cache.l1_hits(),
            cache.l2_hits(),
            cache.misses()
        );
    }
    let total = result.total_cache_stats();
    let _ = writeln!(
        out,
        "{:>4} {:>10} {:>10} {:>8} {:>8} {:>8}",
        "all",
        result.busy_time.iter().sum::<u64>(),
        "",
        total.l1_hits(),
        total.l2_hits(),
        total.misses()
    );
    out
}

pub fn render_json(result: &RunResult) -> anyhow::Result<String> {
    serde_json::to_string_pretty(result).context("cannot serialize run result")
}

pub fn write_summary(result: &RunResult, path: &Path) -> anyhow::Result<()> {
    let payload = render_json(result)?;
    fs::write(path, payload).with_context(|| format!("cannot write {}", path.display()))
}
