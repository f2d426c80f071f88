use crate::cpu::Symbol;
use crate::timeq::Cycle;

/// One simulated workload: an ordered list of data accesses plus the waits around its service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: usize,
    pub accesses: Vec<Symbol>,
    pub arrival_delay: Cycle,
    pub completion_delay: Cycle,
    pub service_start: Option<Cycle>,
    pub service_end: Option<Cycle>,
}

impl Process {
    pub fn new(id: usize, accesses: Vec<Symbol>) -> Self {
        Self {
            id,
            accesses,
            arrival_delay: 0,
            completion_delay: 0,
            service_start: None,
            service_end: None,
        }
    }

    pub fn with_delays(mut self, arrival_delay: Cycle, completion_delay: Cycle) -> Self {
        self.arrival_delay = arrival_delay;
        self.completion_delay = completion_delay;
        self
    }

    pub fn service_time(&self) -> Option<Cycle> {
        match (self.service_start, self.service_end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
