use std::sync::Arc;

use log::info;
use thiserror::Error;

use crate::cpu::CorePool;
use crate::sim::config::{CpuConfig, SimConfig};
use crate::sim::log::Logger;
use crate::sim::machine::Machine;
use crate::stats::RunResult;
use crate::timeq::{Cycle, Scheduler};
use crate::workload::config::WorkloadConfig;
use crate::workload::driver::ProcessDriver;
use crate::workload::generator::WorkloadGenerator;
use crate::workload::process::Process;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("simulation still running at cycle {at} (timeout), {pending} processes unfinished")]
    Timeout { at: Cycle, pending: usize },
}

/// One simulation run. Every process is spawned at cycle 0 in id order; the run ends when the
/// last one retires.
pub struct Sim {
    pub config: SimConfig,
    pub cpu_config: CpuConfig,
    scheduler: Scheduler<Machine>,
    machine: Machine,
    num_processes: usize,
}

impl Sim {
    /// Build a run whose processes are drawn from `workload_config`. Configs are assumed valid.
    pub fn new(
        config: SimConfig,
        cpu_config: CpuConfig,
        workload_config: &WorkloadConfig,
        logger: Arc<Logger>,
    ) -> Self {
        let mut generator = WorkloadGenerator::new(workload_config, config.seed);
        let processes = generator.generate_all(cpu_config.process_count);
        Self::with_processes(config, cpu_config, processes, logger)
    }

    pub fn with_processes(
        config: SimConfig,
        cpu_config: CpuConfig,
        processes: Vec<Process>,
        logger: Arc<Logger>,
    ) -> Self {
        let pool = CorePool::new(
            cpu_config.core_count,
            cpu_config.l1_capacity,
            cpu_config.l2_capacity,
            cpu_config.timing,
            cpu_config.strict_capacity,
        );
        info!(
            "sim instantiated with {} processes on {} cores (L1 {}, L2 {})",
            processes.len(),
            cpu_config.core_count,
            cpu_config.l1_capacity,
            cpu_config.l2_capacity
        );

        let num_processes = processes.len();
        let mut scheduler = Scheduler::new();
        for process in processes {
            scheduler.spawn(Box::new(ProcessDriver::new(process)));
        }
        Sim {
            config,
            cpu_config,
            scheduler,
            machine: Machine::new(pool, logger),
            num_processes,
        }
    }

    pub fn num_processes(&self) -> usize {
        self.num_processes
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn now(&self) -> Cycle {
        self.scheduler.now()
    }

    pub fn finished(&self) -> bool {
        self.scheduler.is_idle()
    }

    pub fn simulate(&mut self) -> Result<RunResult, SimError> {
        match self.config.timeout {
            Some(timeout) => {
                if !self.scheduler.run_until(&mut self.machine, timeout) {
                    return Err(SimError::Timeout {
                        at: timeout,
                        pending: self.num_processes - self.machine.stats.retired() as usize,
                    });
                }
            }
            None => {
                self.scheduler.run(&mut self.machine);
            }
        }
        info!("simulation finished at cycle {}", self.now());
        Ok(self.result())
    }

    // Snapshot of the statistics as of the current cycle.
    pub fn result(&self) -> RunResult {
        let mut result = self
            .machine
            .stats
            .summarize(self.scheduler.now(), self.num_processes);
        result.cache_stats = self.machine.pool.cache_stats();
        result
    }
}
