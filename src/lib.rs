//! Builds monitoring plugin reports: a status, a message and ordered
//! performance metrics rendered as one line, then exits with the status
//! exit code.
//!
//! ```
//! use check_report::{CheckReport, Metric, StatusCode};
//!
//! let mut report = CheckReport::new();
//! report.set_result(StatusCode::Ok, "Everything is fine");
//! report.add_metric(
//!     "response_time",
//!     Metric::new(1.23).with_thresholds(1.0, 2.0).with_range(0.0, 10.0).with_unit("ms"),
//! );
//! assert_eq!(
//!     report.render(),
//!     "OK - Everything is fine | 'response_time'=1.23ms;1.00;2.00;0.00;10.00 "
//! );
//! ```
pub mod checker;
pub mod config;
pub mod error;
pub mod metric;
pub mod output;
pub mod output_print;
pub mod status;

pub use crate::checker::{CheckReport, DEFAULT_FORMAT};
pub use crate::error::{EmitError, MetricArgError, ParseStatusError};
pub use crate::metric::Metric;
pub use crate::output::Sink;
pub use crate::output_print::StdoutSink;
pub use crate::status::StatusCode;
