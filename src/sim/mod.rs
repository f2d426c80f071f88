pub mod config;
pub mod log;
pub mod machine;
pub mod report;
pub mod top;

#[cfg(test)]
mod unit_tests;
