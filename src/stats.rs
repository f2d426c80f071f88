use crate::cpu::{CacheStats, CoreId};
use crate::timeq::Cycle;
use serde::Serialize;

const UTILIZATION_DIGITS: i32 = 4;

/// Span a process held a core, from acquisition to release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceWindow {
    pub process_id: usize,
    pub core_id: CoreId,
    pub start: Cycle,
    pub end: Cycle,
}

impl ServiceWindow {
    pub fn duration(&self) -> Cycle {
        self.end.saturating_sub(self.start)
    }

    pub fn overlaps(&self, other: &ServiceWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    completed: u64,
    retired: u64,
    total_service_time: Cycle,
    busy_time: Vec<Cycle>,
    acquire_retries: u64,
    windows: Vec<ServiceWindow>,
}

impl StatsCollector {
    pub fn new(num_cores: usize) -> Self {
        Self {
            busy_time: vec![0; num_cores],
            ..Self::default()
        }
    }

    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn retired(&self) -> u64 {
        self.retired
    }

    pub fn total_service_time(&self) -> Cycle {
        self.total_service_time
    }

    pub fn busy_time(&self, core_id: CoreId) -> Cycle {
        self.busy_time[core_id]
    }

    pub fn acquire_retries(&self) -> u64 {
        self.acquire_retries
    }

    pub fn windows(&self) -> &[ServiceWindow] {
        &self.windows
    }

    pub fn record_completion(&mut self, core_id: CoreId, service_time: Cycle) {
        self.completed = self.completed.saturating_add(1);
        self.total_service_time = self.total_service_time.saturating_add(service_time);
        self.busy_time[core_id] = self.busy_time[core_id].saturating_add(service_time);
    }

    pub fn record_window(&mut self, window: ServiceWindow) {
        self.windows.push(window);
    }

    pub fn record_retry(&mut self) {
        self.acquire_retries = self.acquire_retries.saturating_add(1);
    }

    pub fn record_retirement(&mut self) {
        self.retired = self.retired.saturating_add(1);
    }

    pub fn summarize(&self, now: Cycle, total_processes: usize) -> RunResult {
        let throughput = if now == 0 {
            0.0
        } else {
            self.completed as f64 / now as f64
        };
        let average_service_time = if total_processes == 0 {
            0.0
        } else {
            self.total_service_time as f64 / total_processes as f64
        };
        let per_core_utilization = self
            .busy_time
            .iter()
            .map(|&busy| utilization_percent(busy, now))
            .collect();

        RunResult {
            elapsed: now,
            completed: self.completed,
            throughput,
            average_service_time,
            per_core_utilization,
            busy_time: self.busy_time.clone(),
            acquire_retries: self.acquire_retries,
            cache_stats: Vec::new(),
            windows: self.windows.clone(),
        }
    }
}

fn utilization_percent(busy: Cycle, now: Cycle) -> f64 {
    if now == 0 {
        return 0.0;
    }
    round_to(busy as f64 / now as f64 * 100.0, UTILIZATION_DIGITS)
}

fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Read-only snapshot of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub elapsed: Cycle,
    pub completed: u64,
    /// completed processes per simulated cycle
    pub throughput: f64,
    pub average_service_time: f64,
    /// busy share of the elapsed time per core, in percent
    pub per_core_utilization: Vec<f64>,
    pub busy_time: Vec<Cycle>,
    pub acquire_retries: u64,
    pub cache_stats: Vec<CacheStats>,
    pub windows: Vec<ServiceWindow>,
}

impl RunResult {
    pub fn total_cache_stats(&self) -> CacheStats {
        let mut total = CacheStats::default();
        for stats in &self.cache_stats {
            total += stats;
        }
        total
    }

    pub fn window_for(&self, process_id: usize) -> Option<&ServiceWindow> {
        self.windows.iter().find(|w| w.process_id == process_id)
    }
}
