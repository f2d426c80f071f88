use std::collections::HashSet;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use toml::Value;

use crate::cpu::CacheTiming;
use crate::workload::config::WorkloadConfig;

pub const MAX_CORES: usize = 64;
pub const MAX_CACHE_CAPACITY: usize = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is an invalid number of processes, must be at least 1")]
    ProcessCount(usize),
    #[error("{0} is an invalid number of cores, i.e. [1, 2, 4, 6, ..., 64]")]
    CoreCount(usize),
    #[error("{level} capacity {value} is invalid, must be between 1 and 25")]
    CacheCapacity { level: &'static str, value: usize },
    #[error("L1 capacity ({l1}) must be smaller than L2 capacity ({l2})")]
    CacheOrdering { l1: usize, l2: usize },
    #[error("access count range [{min}, {max}] is invalid")]
    AccessRange { min: usize, max: usize },
    #[error("alphabet must be non-empty and free of duplicate symbols")]
    Alphabet,
    #[error("{0} delay has min greater than max")]
    Delay(&'static str),
    #[error("cannot parse config: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimConfig {
    pub log_level: u64,
    // cycle cap on the run; unset runs until every process retires
    pub timeout: Option<u64>,
    pub seed: Option<u64>,
}

pub trait Config: DeserializeOwned + Default {
    fn from_section(section: Option<&Value>) -> Result<Self, ConfigError> {
        match section {
            Some(value) => value
                .clone()
                .try_into()
                .map_err(|err: toml::de::Error| ConfigError::Parse(err.to_string())),
            None => {
                warn!("config section not found");
                Ok(Self::default())
            }
        }
    }
}

impl Config for SimConfig {}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            log_level: 0,
            timeout: None,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct CpuConfig {
    pub process_count: usize,
    pub core_count: usize,
    pub l1_capacity: usize,
    pub l2_capacity: usize,
    pub strict_capacity: bool,
    pub timing: CacheTiming,
}

impl Config for CpuConfig {}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            process_count: 1,
            core_count: 2,
            l1_capacity: 2,
            l2_capacity: 4,
            strict_capacity: false,
            timing: CacheTiming::default(),
        }
    }
}

impl CpuConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.process_count < 1 {
            return Err(ConfigError::ProcessCount(self.process_count));
        }
        let cores = self.core_count;
        if cores < 1 || cores > MAX_CORES || (cores != 1 && cores % 2 != 0) {
            return Err(ConfigError::CoreCount(cores));
        }
        for (level, value) in [("L1", self.l1_capacity), ("L2", self.l2_capacity)] {
            if value < 1 || value > MAX_CACHE_CAPACITY {
                return Err(ConfigError::CacheCapacity { level, value });
            }
        }
        if self.l1_capacity >= self.l2_capacity {
            return Err(ConfigError::CacheOrdering {
                l1: self.l1_capacity,
                l2: self.l2_capacity,
            });
        }
        Ok(())
    }
}

impl WorkloadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_accesses < 1 || self.min_accesses > self.max_accesses {
            return Err(ConfigError::AccessRange {
                min: self.min_accesses,
                max: self.max_accesses,
            });
        }
        let mut seen = HashSet::new();
        if self.alphabet.is_empty() || !self.alphabet.chars().all(|c| seen.insert(c)) {
            return Err(ConfigError::Alphabet);
        }
        if !self.arrival_delay.is_valid() {
            return Err(ConfigError::Delay("arrival"));
        }
        if !self.completion_delay.is_valid() {
            return Err(ConfigError::Delay("completion"));
        }
        Ok(())
    }
}
