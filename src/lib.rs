pub mod cpu;
pub mod sim;
pub mod stats;
pub mod timeq;
pub mod ui;
pub mod workload;
