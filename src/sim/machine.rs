use std::sync::Arc;

use crate::cpu::CorePool;
use crate::sim::log::Logger;
use crate::stats::StatsCollector;

/// State shared by every process on the timeline: the cores and the statistics they feed.
#[derive(Debug)]
pub struct Machine {
    pub pool: CorePool,
    pub stats: StatsCollector,
    pub logger: Arc<Logger>,
}

impl Machine {
    pub fn new(pool: CorePool, logger: Arc<Logger>) -> Self {
        let stats = StatsCollector::new(pool.len());
        Self {
            pool,
            stats,
            logger,
        }
    }
}
