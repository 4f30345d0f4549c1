//! Logging setup for hosts embedding the compute core.
//!
//! The library only emits `tracing` events. Hosts that want them printed call
//! [`init_logging`] once at startup.

use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::new(format!("swimlog_compute={}", self.to_tracing_level()))
    }
}

/// Install a compact fmt subscriber for this crate's events.
///
/// Returns `false` when a global subscriber was already set.
pub fn init_logging(level: LogLevel) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(level.filter())
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
