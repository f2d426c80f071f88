use crate::cpu::cache::{AccessOutcome, CacheHierarchy, CacheStats, Symbol};

pub type CoreId = usize;

/// One execution unit with its private L1/L2. The busy flag is only ever flipped by the pool.
#[derive(Debug, Clone)]
pub struct Core {
    id: CoreId,
    cache: CacheHierarchy,
    busy: bool,
}

impl Core {
    pub fn new(id: CoreId, cache: CacheHierarchy) -> Self {
        Self {
            id,
            cache,
            busy: false,
        }
    }

    pub fn id(&self) -> CoreId {
        self.id
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn access(&mut self, symbol: Symbol) -> AccessOutcome {
        self.cache.access(symbol)
    }

    pub fn cache(&self) -> &CacheHierarchy {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
