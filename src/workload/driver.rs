use crate::cpu::{CoreId, Symbol};
use crate::sim::machine::Machine;
use crate::stats::ServiceWindow;
use crate::timeq::{Cycle, Step, Task};
use crate::workload::process::Process;
use crate::{sim_debug, sim_info};

// Backoff before retrying when every core is taken.
pub const ACQUIRE_RETRY_CYCLES: Cycle = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Created,
    Arriving,
    WaitingForCore,
    InService { core: CoreId, next: usize },
    Completing,
    Retired,
}

/// Drives one process from creation to retirement. Each data access runs as a child
/// `AccessTask`; the driver resumes when the access latency has elapsed.
#[derive(Debug)]
pub struct ProcessDriver {
    process: Process,
    state: Lifecycle,
}

impl ProcessDriver {
    pub fn new(process: Process) -> Self {
        Self {
            process,
            state: Lifecycle::Created,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn process(&self) -> &Process {
        &self.process
    }

    fn finish_service(&mut self, core: CoreId, now: Cycle, machine: &mut Machine) -> Step<Machine> {
        let start = self.process.service_start.unwrap_or(now);
        self.process.service_end = Some(now);
        let service_time = now - start;

        machine.stats.record_completion(core, service_time);
        machine.stats.record_window(ServiceWindow {
            process_id: self.process.id,
            core_id: core,
            start,
            end: now,
        });
        machine.pool.release(core);
        sim_info!(
            machine.logger,
            now,
            "process {} released core {} after {} cycles",
            self.process.id,
            core,
            service_time
        );

        self.state = Lifecycle::Completing;
        Step::Sleep(self.process.completion_delay)
    }
}

impl Task<Machine> for ProcessDriver {
    fn resume(&mut self, now: Cycle, machine: &mut Machine) -> Step<Machine> {
        loop {
            match self.state {
                Lifecycle::Created => {
                    sim_debug!(
                        machine.logger,
                        now,
                        "process {} created with {} accesses",
                        self.process.id,
                        self.process.accesses.len()
                    );
                    self.state = Lifecycle::Arriving;
                    return Step::Sleep(self.process.arrival_delay);
                }
                Lifecycle::Arriving => {
                    sim_debug!(machine.logger, now, "process {} arrived", self.process.id);
                    self.state = Lifecycle::WaitingForCore;
                }
                Lifecycle::WaitingForCore => match machine.pool.acquire() {
                    Some(core) => {
                        sim_info!(
                            machine.logger,
                            now,
                            "process {} acquired core {}",
                            self.process.id,
                            core
                        );
                        self.process.service_start = Some(now);
                        self.state = Lifecycle::InService { core, next: 0 };
                    }
                    None => {
                        machine.stats.record_retry();
                        sim_debug!(
                            machine.logger,
                            now,
                            "process {} waiting for a core",
                            self.process.id
                        );
                        return Step::Sleep(ACQUIRE_RETRY_CYCLES);
                    }
                },
                Lifecycle::InService { core, next } => {
                    let Some(&symbol) = self.process.accesses.get(next) else {
                        return self.finish_service(core, now, machine);
                    };
                    self.state = Lifecycle::InService {
                        core,
                        next: next + 1,
                    };
                    return Step::Join(Box::new(AccessTask::new(self.process.id, core, symbol)));
                }
                Lifecycle::Completing => {
                    sim_debug!(machine.logger, now, "process {} retired", self.process.id);
                    machine.stats.record_retirement();
                    self.state = Lifecycle::Retired;
                    return Step::Done;
                }
                Lifecycle::Retired => return Step::Done,
            }
        }
    }
}

/// One data access on a held core: classify it, then wait out its latency.
#[derive(Debug)]
pub struct AccessTask {
    process_id: usize,
    core: CoreId,
    symbol: Symbol,
    issued: bool,
}

impl AccessTask {
    pub fn new(process_id: usize, core: CoreId, symbol: Symbol) -> Self {
        Self {
            process_id,
            core,
            symbol,
            issued: false,
        }
    }
}

impl Task<Machine> for AccessTask {
    fn resume(&mut self, now: Cycle, machine: &mut Machine) -> Step<Machine> {
        if self.issued {
            return Step::Done;
        }
        self.issued = true;
        let outcome = machine.pool.access(self.core, self.symbol);
        sim_debug!(
            machine.logger,
            now,
            "process {} core {} access '{}': {} ({} cycles)",
            self.process_id,
            self.core,
            self.symbol,
            outcome.kind.short(),
            outcome.latency
        );
        Step::Sleep(outcome.latency)
    }
}
