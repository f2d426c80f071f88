use anyhow::Context;
use clap::Parser;
use crate::sim::config::{Config, ConfigError, CpuConfig, SimConfig};
use crate::sim::log::Logger;
use crate::sim::top::Sim;
use crate::workload::config::WorkloadConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use toml::Table;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Multi-core processor simulator with per-core L1/L2 caches")]
pub struct YacsArgs {
    #[arg(help = "Path to config.toml")]
    pub config_path: Option<PathBuf>,
    #[arg(long, help = "Number of processes to simulate")]
    pub processes: Option<usize>,
    #[arg(long, help = "Number of cores (1 or an even number up to 64)")]
    pub cores: Option<usize>,
    #[arg(long = "l1", help = "L1 capacity per core, in symbols (1-25)")]
    pub l1: Option<usize>,
    #[arg(long = "l2", help = "L2 capacity per core, in symbols (1-25, above L1)")]
    pub l2: Option<usize>,
    #[arg(long, help = "Seed for workload generation")]
    pub seed: Option<u64>,
    #[arg(long, help = "Enable trace at level (0:none, 1:info, 2:debug)")]
    pub log: Option<u64>,
    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,
    #[arg(long, help = "Also write the JSON result to this file")]
    pub summary: Option<PathBuf>,
}

/// Fully resolved and validated run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sim: SimConfig,
    pub cpu: CpuConfig,
    pub workload: WorkloadConfig,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cpu.validate()?;
        self.workload.validate()
    }
}

pub fn read_toml(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))
}

/// Resolve the run configuration from TOML. If `cli_args` is given, override TOML options with
/// CLI arguments. Validation happens here, before any engine state exists.
pub fn make_config(toml_string: &str, cli_args: Option<&YacsArgs>) -> Result<RunConfig, ConfigError> {
    let config_table: Table =
        toml::from_str(toml_string).map_err(|err| ConfigError::Parse(err.to_string()))?;
    let mut sim_config = SimConfig::from_section(config_table.get("sim"))?;
    let mut cpu_config = CpuConfig::from_section(config_table.get("cpu"))?;
    let workload_config = WorkloadConfig::from_section(config_table.get("workload"))?;

    if let Some(args) = cli_args {
        sim_config.log_level = args.log.unwrap_or(sim_config.log_level);
        sim_config.seed = args.seed.or(sim_config.seed);
        cpu_config.process_count = args.processes.unwrap_or(cpu_config.process_count);
        cpu_config.core_count = args.cores.unwrap_or(cpu_config.core_count);
        cpu_config.l1_capacity = args.l1.unwrap_or(cpu_config.l1_capacity);
        cpu_config.l2_capacity = args.l2.unwrap_or(cpu_config.l2_capacity);
    }

    let config = RunConfig {
        sim: sim_config,
        cpu: cpu_config,
        workload: workload_config,
    };
    config.validate()?;
    Ok(config)
}

/// Make a Sim object from the TOML configuration, tracing to stdout at the configured level.
pub fn make_sim(toml_string: &str, cli_args: Option<&YacsArgs>) -> Result<Sim, ConfigError> {
    let config = make_config(toml_string, cli_args)?;
    let logger = Arc::new(Logger::new(config.sim.log_level));
    Ok(Sim::new(config.sim, config.cpu, &config.workload, logger))
}
