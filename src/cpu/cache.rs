use crate::timeq::Cycle;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::ops::AddAssign;

/// A data item a process touches. Workloads draw these from a small alphabet.
pub type Symbol = char;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheTiming {
    pub l1: Cycle,
    pub l2: Cycle,
    pub ram: Cycle,
}

impl Default for CacheTiming {
    fn default() -> Self {
        Self {
            l1: 4,
            l2: 10,
            ram: 200,
        }
    }
}

impl CacheTiming {
    pub fn latency(&self, kind: AccessKind) -> Cycle {
        match kind {
            AccessKind::L1Hit => self.l1,
            AccessKind::L2Hit => self.l1 + self.l2,
            AccessKind::Miss => self.l1 + self.l2 + self.ram,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessKind {
    L1Hit,
    L2Hit,
    Miss,
}

impl AccessKind {
    pub fn short(self) -> &'static str {
        match self {
            Self::L1Hit => "L1 hit",
            Self::L2Hit => "L2 hit",
            Self::Miss => "miss",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    pub kind: AccessKind,
    pub latency: Cycle,
}

/// FIFO retention sequence for one cache level, oldest entry at the front.
#[derive(Debug, Clone)]
pub(crate) struct RetentionSeq {
    capacity: usize,
    lines: VecDeque<Symbol>,
}

impl RetentionSeq {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity + 1),
        }
    }

    // Drop the oldest entry if the sequence is over capacity. At most one entry goes per call.
    pub(crate) fn trim_one(&mut self) -> Option<Symbol> {
        if self.lines.len() > self.capacity {
            return self.lines.pop_front();
        }
        None
    }

    pub(crate) fn trim_all(&mut self) {
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub(crate) fn contains(&self, symbol: Symbol) -> bool {
        self.lines.contains(&symbol)
    }

    pub(crate) fn push(&mut self, symbol: Symbol) {
        self.lines.push_back(symbol);
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<Symbol> {
        self.lines.iter().copied().collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    l1_hits: u64,
    l2_hits: u64,
    misses: u64,
}

impl CacheStats {
    pub fn l1_hits(&self) -> u64 {
        self.l1_hits
    }

    pub fn l2_hits(&self) -> u64 {
        self.l2_hits
    }

    // Every miss is one fetch from RAM.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn accesses(&self) -> u64 {
        self.l1_hits + self.l2_hits + self.misses
    }

    pub fn record(&mut self, kind: AccessKind) {
        let counter = match kind {
            AccessKind::L1Hit => &mut self.l1_hits,
            AccessKind::L2Hit => &mut self.l2_hits,
            AccessKind::Miss => &mut self.misses,
        };
        *counter = counter.saturating_add(1);
    }
}

impl AddAssign<&CacheStats> for CacheStats {
    fn add_assign(&mut self, other: &CacheStats) {
        self.l1_hits = self.l1_hits.saturating_add(other.l1_hits);
        self.l2_hits = self.l2_hits.saturating_add(other.l2_hits);
        self.misses = self.misses.saturating_add(other.misses);
    }
}

/// Inclusive two-level cache owned by a single core.
///
/// Each access first trims every over-capacity level by one entry, then tests L1, then L2. A
/// miss appends the symbol to both levels, so between accesses a level can hold one entry more
/// than its capacity. With `strict` set, the levels are trimmed right after the append instead
/// and never exceed capacity.
#[derive(Debug, Clone)]
pub struct CacheHierarchy {
    l1: RetentionSeq,
    l2: RetentionSeq,
    timing: CacheTiming,
    strict: bool,
    stats: CacheStats,
}

impl CacheHierarchy {
    pub fn new(l1_capacity: usize, l2_capacity: usize, timing: CacheTiming, strict: bool) -> Self {
        Self {
            l1: RetentionSeq::new(l1_capacity),
            l2: RetentionSeq::new(l2_capacity),
            timing,
            strict,
            stats: CacheStats::default(),
        }
    }

    pub fn access(&mut self, symbol: Symbol) -> AccessOutcome {
        self.l1.trim_one();
        self.l2.trim_one();

        let kind = if self.l1.contains(symbol) {
            AccessKind::L1Hit
        } else if self.l2.contains(symbol) {
            AccessKind::L2Hit
        } else {
            self.l1.push(symbol);
            self.l2.push(symbol);
            if self.strict {
                self.l1.trim_all();
                self.l2.trim_all();
            }
            AccessKind::Miss
        };

        self.stats.record(kind);
        AccessOutcome {
            kind,
            latency: self.timing.latency(kind),
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn l1_contents(&self) -> Vec<Symbol> {
        self.l1.snapshot()
    }

    pub fn l2_contents(&self) -> Vec<Symbol> {
        self.l2.snapshot()
    }

    pub fn l1_len(&self) -> usize {
        self.l1.len()
    }

    pub fn l2_len(&self) -> usize {
        self.l2.len()
    }
}
