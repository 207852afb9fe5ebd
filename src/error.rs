use std::io;
use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write check report: {0}")]
    Write(#[from] io::Error),
}

/// A `--metric` argument that does not follow `name=value[unit][;warn;crit;min;max]`.
#[derive(Debug, Error)]
pub enum MetricArgError {
    #[error("metric {0:?} is not of the form name=value[unit][;warn;crit;min;max]")]
    Malformed(String),
    #[error("metric {metric:?} has an invalid {field}: {source}")]
    InvalidNumber {
        metric: String,
        field: &'static str,
        #[source]
        source: ParseFloatError,
    },
}

#[derive(Debug, Error)]
#[error("invalid status {0:?}, expected ok, warning, critical, unknown or an integer")]
pub struct ParseStatusError(pub String);
