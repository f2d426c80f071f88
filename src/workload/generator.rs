use crate::cpu::Symbol;
use crate::workload::config::WorkloadConfig;
use crate::workload::process::Process;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Draws processes from a seedable source. Same seed and config, same workload.
#[derive(Debug)]
pub struct WorkloadGenerator {
    rng: StdRng,
    alphabet: Vec<Symbol>,
    config: WorkloadConfig,
}

impl WorkloadGenerator {
    pub fn new(config: &WorkloadConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            alphabet: config.alphabet.chars().collect(),
            config: config.clone(),
        }
    }

    pub fn generate(&mut self, id: usize) -> Process {
        // access lists never repeat a symbol, so they are capped at the alphabet size
        let max = self.config.max_accesses.min(self.alphabet.len());
        let min = self.config.min_accesses.min(max);
        let count = self.rng.gen_range(min..=max);
        let accesses = self
            .alphabet
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        let arrival = self.config.arrival_delay.sample(&mut self.rng);
        let completion = self.config.completion_delay.sample(&mut self.rng);
        Process::new(id, accesses).with_delays(arrival, completion)
    }

    pub fn generate_all(&mut self, count: usize) -> Vec<Process> {
        (0..count).map(|id| self.generate(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::WorkloadGenerator;
    use crate::workload::config::{Delay, WorkloadConfig};
    use std::collections::HashSet;

    #[test]
    fn access_counts_stay_in_range() {
        let config = WorkloadConfig::default();
        let mut gen = WorkloadGenerator::new(&config, Some(1));
        for process in gen.generate_all(500) {
            assert!((1..=24).contains(&process.accesses.len()));
        }
    }

    #[test]
    fn accesses_are_distinct_alphabet_symbols() {
        let config = WorkloadConfig::default();
        let mut gen = WorkloadGenerator::new(&config, Some(2));
        for process in gen.generate_all(200) {
            let unique: HashSet<_> = process.accesses.iter().collect();
            assert_eq!(unique.len(), process.accesses.len());
            assert!(process.accesses.iter().all(|s| s.is_ascii_lowercase()));
        }
    }

    #[test]
    fn same_seed_same_workload() {
        let config = WorkloadConfig::default();
        let a = WorkloadGenerator::new(&config, Some(42)).generate_all(20);
        let b = WorkloadGenerator::new(&config, Some(42)).generate_all(20);
        assert_eq!(a, b);
    }

    #[test]
    fn ids_follow_creation_order() {
        let config = WorkloadConfig::default();
        let procs = WorkloadGenerator::new(&config, Some(3)).generate_all(5);
        let ids: Vec<_> = procs.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn max_accesses_capped_by_alphabet() {
        let config = WorkloadConfig {
            min_accesses: 5,
            max_accesses: 10,
            alphabet: "xyz".to_string(),
            ..WorkloadConfig::default()
        };
        let mut gen = WorkloadGenerator::new(&config, Some(4));
        for process in gen.generate_all(50) {
            assert_eq!(process.accesses.len(), 3);
        }
    }

    #[test]
    fn delays_are_sampled_from_config() {
        let config = WorkloadConfig {
            arrival_delay: Delay::Uniform { min: 10, max: 20 },
            completion_delay: Delay::Fixed { cycles: 7 },
            ..WorkloadConfig::default()
        };
        let mut gen = WorkloadGenerator::new(&config, Some(5));
        for process in gen.generate_all(50) {
            assert!((10..=20).contains(&process.arrival_delay));
            assert_eq!(process.completion_delay, 7);
        }
    }
}
