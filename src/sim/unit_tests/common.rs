use crate::cpu::Symbol;
use crate::sim::config::{CpuConfig, SimConfig};
use crate::sim::log::Logger;
use crate::sim::top::Sim;
use crate::workload::process::Process;
use std::sync::Arc;

pub(crate) fn cpu(processes: usize, cores: usize, l1: usize, l2: usize) -> CpuConfig {
    CpuConfig {
        process_count: processes,
        core_count: cores,
        l1_capacity: l1,
        l2_capacity: l2,
        ..CpuConfig::default()
    }
}

pub(crate) fn seeded(seed: u64) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        ..SimConfig::default()
    }
}

pub(crate) fn procs(lists: &[&[Symbol]]) -> Vec<Process> {
    lists
        .iter()
        .enumerate()
        .map(|(id, accesses)| Process::new(id, accesses.to_vec()))
        .collect()
}

pub(crate) fn fixed_sim(cpu_config: CpuConfig, processes: Vec<Process>) -> Sim {
    Sim::with_processes(seeded(0), cpu_config, processes, Arc::new(Logger::silent()))
}
