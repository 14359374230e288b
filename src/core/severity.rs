//! Host-side severity scale and the collapsed GELF level

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity as reported by the host logging pipeline.
///
/// This is the finer-grained scale log records arrive with; it is collapsed
/// to a [`GelfLevel`] during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Severity {
    Trace = 0,
    ProfileBegin = 1,
    ProfileEnd = 2,
    #[default]
    Info = 3,
    Warning = 4,
    Error = 5,
}

impl Severity {
    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::ProfileBegin => "PROFILE_BEGIN",
            Severity::ProfileEnd => "PROFILE_END",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(Severity::Trace),
            "PROFILE_BEGIN" => Ok(Severity::ProfileBegin),
            "PROFILE_END" => Ok(Severity::ProfileEnd),
            "INFO" => Ok(Severity::Info),
            "WARN" | "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

/// Levels a GELF collector understands.
///
/// The numeric values are the syslog severities GELF uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GelfLevel {
    Error = 3,
    Warning = 4,
    Info = 6,
    Debug = 7,
}

impl GelfLevel {
    /// Syslog severity number carried in the GELF `level` field
    pub fn priority(&self) -> u8 {
        *self as u8
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            GelfLevel::Error => "ERROR",
            GelfLevel::Warning => "WARNING",
            GelfLevel::Info => "INFO",
            GelfLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for GelfLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl From<Severity> for GelfLevel {
    /// Collapse the host severity scale to the four GELF levels.
    ///
    /// Trace and the profiling severities map to DEBUG; everything else maps
    /// to its namesake. The mapping is total, so an unknown severity can
    /// never abort normalization.
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Trace | Severity::ProfileBegin | Severity::ProfileEnd => GelfLevel::Debug,
            Severity::Info => GelfLevel::Info,
            Severity::Warning => GelfLevel::Warning,
            Severity::Error => GelfLevel::Error,
        }
    }
}
