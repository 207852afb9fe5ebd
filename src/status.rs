use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use crate::error::ParseStatusError;

/// Severity of a check outcome, as understood by the monitoring supervisor.
/// Equality and hashing go through `code()`, so `Other(2)` is `Critical`.
#[derive(Debug, Clone, Copy, Default)]
pub enum StatusCode {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
    /// Any raw exit value outside the four known ones.
    Other(i32),
}

impl StatusCode {
    pub fn name(&self) -> String {
        match StatusCode::from(self.code()) {
            StatusCode::Ok => String::from("OK"),
            StatusCode::Warning => String::from("Warning"),
            StatusCode::Critical => String::from("Critical"),
            StatusCode::Unknown => String::from("Unknown"),
            StatusCode::Other(n) => format!("ExitCode({})", n),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            StatusCode::Ok => 0,
            StatusCode::Warning => 1,
            StatusCode::Critical => 2,
            StatusCode::Unknown => 3,
            StatusCode::Other(n) => *n,
        }
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        match code {
            0 => StatusCode::Ok,
            1 => StatusCode::Warning,
            2 => StatusCode::Critical,
            3 => StatusCode::Unknown,
            n => StatusCode::Other(n),
        }
    }
}

impl PartialEq for StatusCode {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for StatusCode {}

impl Hash for StatusCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

/// Accepts a status name in any case or a raw integer exit value.
impl FromStr for StatusCode {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ok" => Ok(StatusCode::Ok),
            "warning" | "warn" => Ok(StatusCode::Warning),
            "critical" | "crit" => Ok(StatusCode::Critical),
            "unknown" => Ok(StatusCode::Unknown),
            other => other
                .parse::<i32>()
                .map(StatusCode::from)
                .map_err(|_| ParseStatusError(s.to_string())),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
