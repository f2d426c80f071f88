use rand::Rng;
use serde::Deserialize;

use crate::sim::config::Config;
use crate::timeq::Cycle;

/// Delay law for the arrival and post-completion waits of a process.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delay {
    Fixed { cycles: Cycle },
    Uniform { min: Cycle, max: Cycle },
}

impl Default for Delay {
    fn default() -> Self {
        Delay::Fixed { cycles: 0 }
    }
}

impl Delay {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Cycle {
        match *self {
            Delay::Fixed { cycles } => cycles,
            Delay::Uniform { min, max } if max <= min => min,
            Delay::Uniform { min, max } => rng.gen_range(min..=max),
        }
    }

    pub fn is_valid(&self) -> bool {
        match *self {
            Delay::Fixed { .. } => true,
            Delay::Uniform { min, max } => min <= max,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct WorkloadConfig {
    pub min_accesses: usize,
    pub max_accesses: usize,
    pub alphabet: String,
    pub arrival_delay: Delay,
    pub completion_delay: Delay,
}

impl Config for WorkloadConfig {}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            min_accesses: 1,
            max_accesses: 24,
            alphabet: ('a'..='z').collect(),
            arrival_delay: Delay::default(),
            completion_delay: Delay::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Delay, WorkloadConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_alphabet_has_26_symbols() {
        let config = WorkloadConfig::default();
        assert_eq!(config.alphabet.chars().count(), 26);
        assert_eq!(config.arrival_delay, Delay::Fixed { cycles: 0 });
    }

    #[test]
    fn uniform_delay_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let delay = Delay::Uniform { min: 3, max: 9 };
        for _ in 0..200 {
            let d = delay.sample(&mut rng);
            assert!((3..=9).contains(&d));
        }
    }

    #[test]
    fn delay_parses_from_toml() {
        let fixed: Delay = toml::from_str("kind = \"fixed\"\ncycles = 5").unwrap();
        assert_eq!(fixed, Delay::Fixed { cycles: 5 });
        let uniform: Delay = toml::from_str("kind = \"uniform\"\nmin = 1\nmax = 4").unwrap();
        assert_eq!(uniform, Delay::Uniform { min: 1, max: 4 });
        assert!(!Delay::Uniform { min: 4, max: 1 }.is_valid());
    }
}
