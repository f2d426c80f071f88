use std::sync::{Mutex, PoisonError};

use crate::timeq::Cycle;

#[derive(PartialEq, PartialOrd, Debug, Default, Clone, Copy)]
pub enum LogLevel {
    #[default]
    NONE,
    INFO,
    DEBUG,
}

impl LogLevel {
    fn to_string(&self) -> &str {
        match self {
            LogLevel::NONE => "NONE",
            LogLevel::INFO => "INFO",
            LogLevel::DEBUG => "DEBUG",
        }
    }
}

pub fn to_loglevel(ulevel: u64) -> LogLevel {
    match ulevel {
        0 => LogLevel::NONE,
        1 => LogLevel::INFO,
        2 => LogLevel::DEBUG,
        _ => LogLevel::NONE,
    }
}

#[derive(Debug)]
enum Sink {
    Stdout,
    Capture(Mutex<Vec<String>>),
}

/// Trace sink for simulation events. Each line is stamped with the simulated cycle it
/// happened at. Handed to the machine at construction, never global.
#[derive(Debug)]
pub struct Logger {
    level: LogLevel,
    sink: Sink,
}

impl Logger {
    pub fn new(ulevel: u64) -> Self {
        let level = to_loglevel(ulevel);
        Logger {
            level,
            sink: Sink::Stdout,
        }
    }

    pub fn silent() -> Self {
        Logger {
            level: LogLevel::NONE,
            sink: Sink::Stdout,
        }
    }

    // Keep lines in memory instead of printing them.
    pub fn capture(ulevel: u64) -> Self {
        Logger {
            level: to_loglevel(ulevel),
            sink: Sink::Capture(Mutex::new(Vec::new())),
        }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level != LogLevel::NONE && level <= self.level
    }

    pub fn log(&self, level: LogLevel, now: Cycle, args: std::fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let line = format!("{:>10}: [{}] {}", now, level.to_string(), args);
        match &self.sink {
            Sink::Stdout => println!("{line}"),
            Sink::Capture(lines) => {
                lines
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(line);
            }
        }
    }

    // Captured lines so far. Always empty for the stdout sink.
    pub fn lines(&self) -> Vec<String> {
        match &self.sink {
            Sink::Stdout => Vec::new(),
            Sink::Capture(lines) => lines.lock().unwrap_or_else(PoisonError::into_inner).clone(),
        }
    }
}

#[macro_export]
macro_rules! sim_log {
    // usage: sim_log!(logger, level, now, "a {} event", "clock")
    ($logger:expr, $level:expr, $now:expr, $($arg:tt)+) => {{
        $logger.log($level, $now, format_args!($($arg)+));
    }};
}
#[macro_export]
macro_rules! sim_info {
    ($logger:expr, $now:expr, $($arg:tt)+) => ( $crate::sim_log!($logger, $crate::sim::log::LogLevel::INFO, $now, $($arg)+); )
}
#[macro_export]
macro_rules! sim_debug {
    ($logger:expr, $now:expr, $($arg:tt)+) => ( $crate::sim_log!($logger, $crate::sim::log::LogLevel::DEBUG, $now, $($arg)+); )
}
