use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use yacs::sim::report;
use yacs::ui::{make_sim, read_toml, YacsArgs};

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let argv = YacsArgs::parse();
    let config = match &argv.config_path {
        Some(path) => read_toml(path)?,
        None => String::new(),
    };

    let mut sim = make_sim(&config, Some(&argv)).context("invalid configuration")?;
    let started = Instant::now();
    let result = sim.simulate()?;
    info!("simulated {} cycles in {:?}", result.elapsed, started.elapsed());

    if argv.json {
        println!("{}", report::render_json(&result)?);
    } else {
        print!("{}", report::render_table(&result));
    }
    if let Some(path) = &argv.summary {
        report::write_summary(&result, path)?;
    }
    Ok(())
}
