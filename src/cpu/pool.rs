use crate::cpu::cache::{AccessOutcome, CacheHierarchy, CacheStats, CacheTiming, Symbol};
use crate::cpu::core::{Core, CoreId};

#[derive(Debug, Clone)]
pub struct CorePool {
    cores: Vec<Core>,
}

impl CorePool {
    pub fn new(
        num_cores: usize,
        l1_capacity: usize,
        l2_capacity: usize,
        timing: CacheTiming,
        strict_capacity: bool,
    ) -> Self {
        let cores = (0..num_cores)
            .map(|id| {
                Core::new(
                    id,
                    CacheHierarchy::new(l1_capacity, l2_capacity, timing, strict_capacity),
                )
            })
            .collect();
        Self { cores }
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// First-fit: hand out the lowest-numbered idle core, or `None` if every core is taken.
    /// Callers are expected to back off and try again.
    pub fn acquire(&mut self) -> Option<CoreId> {
        let core = self.cores.iter_mut().find(|core| !core.is_busy())?;
        core.set_busy(true);
        Some(core.id())
    }

    pub fn release(&mut self, id: CoreId) {
        let core = &mut self.cores[id];
        assert!(core.is_busy(), "released core {id}, which was not assigned");
        core.set_busy(false);
    }

    // Run one data access on a core the caller holds.
    pub fn access(&mut self, id: CoreId, symbol: Symbol) -> AccessOutcome {
        let core = &mut self.cores[id];
        debug_assert!(core.is_busy(), "access on unassigned core {id}");
        core.access(symbol)
    }

    pub fn busy_count(&self) -> usize {
        self.cores.iter().filter(|core| core.is_busy()).count()
    }

    pub fn core(&self, id: CoreId) -> &Core {
        &self.cores[id]
    }

    pub fn cores(&self) -> &[Core] {
        &self.cores
    }

    pub fn cache_stats(&self) -> Vec<CacheStats> {
        self.cores.iter().map(Core::cache_stats).collect()
    }
}
