use chrono::{DateTime, Utc};
use tracing::Level;
use crate::domain::TraceError;

pub const AT_ENV: &str = "CERT_TRACE_AT";
pub const LOG_ENV: &str = "CERT_TRACE_LOG";

/// Runtime settings. Flags override the environment, which overrides the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Instant used for the validity check; `None` means wall-clock now.
    pub at: Option<DateTime<Utc>>,
    pub log_level: Level,
}

impl Config {
    /// `at_flag` is the `--at` value; when given, `CERT_TRACE_AT` is not read.
    pub fn from_env(at_flag: Option<&str>) -> Result<Self, TraceError> {
        let at = resolve_at(at_flag, std::env::var(AT_ENV).ok().as_deref())?;
        let log_level = std::env::var(LOG_ENV).ok().and_then(|v| parse_level(&v)).unwrap_or(Level::WARN);
        Ok(Self { at, log_level })
    }

    /// `-v` raises the level to info, `-vv` to debug, `-vvv` to trace.
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.log_level = match verbose {
            0 => self.log_level,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { at: None, log_level: Level::WARN }
    }
}

fn resolve_at(flag: Option<&str>, env: Option<&str>) -> Result<Option<DateTime<Utc>>, TraceError> {
    match (flag, env) {
        (Some(v), _) => parse_instant(v).map(Some),
        (None, Some(v)) if !v.trim().is_empty() => parse_instant(v).map(Some),
        _ => Ok(None),
    }
}

pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, TraceError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TraceError::usage(format!("invalid instant '{}', expected RFC 3339: {}", value.trim(), e)))
}

fn parse_level(value: &str) -> Option<Level> {
    value.trim().parse().ok()
}
