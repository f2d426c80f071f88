pub mod config;
pub mod driver;
pub mod generator;
pub mod process;

pub use config::{Delay, WorkloadConfig};
pub use process::Process;
