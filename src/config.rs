use clap::{Arg, ArgAction, Command};
use log::debug;
use regex::Regex;
use std::ffi::OsString;
use std::sync::OnceLock;
use crate::checker::CheckReport;
use crate::error::MetricArgError;
use crate::metric::Metric;
use crate::status::StatusCode;

const METRIC_PATTERN: &str = concat!(
    r"^(?P<name>[^=]+)=",
    r"(?P<value>[-+]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?)",
    r"(?P<unit>[^;]*)",
    r"(?P<rest>(?:;[^;]*){0,4})$",
);

#[derive(Debug, Clone, PartialEq)]
pub struct CmdOptions {
    pub status: StatusCode,
    pub message: String,
    pub format: Option<String>,
    pub metrics: Vec<(String, Metric)>,
    pub delete: Vec<String>,
    pub dry_run: bool,
}

impl CmdOptions {
    /// Builds the report: metrics are added in argument order, then the
    /// deletions are applied.
    pub fn into_report(self) -> CheckReport {
        let mut report = CheckReport::new();
        if let Some(format) = self.format {
            report.set_format(format);
        }
        report.set_result(self.status, self.message);
        for (name, metric) in self.metrics {
            report.add_metric(name, metric);
        }
        for name in &self.delete {
            report.delete_metric(name);
        }
        report
    }
}

pub fn command() -> Command {
    Command::new("check-report")
        .about("Print a monitoring plugin report line and exit with its status code")
        .arg(
            Arg::new("status")
                .short('s')
                .long("status")
                .value_name("STATUS")
                .default_value("ok")
                .value_parser(|s: &str| s.parse::<StatusCode>())
                .help("ok, warning, critical, unknown or a raw exit code"),
        )
        .arg(
            Arg::new("message")
                .short('m')
                .long("message")
                .value_name("MESSAGE")
                .help("Message shown after the status name"),
        )
        .arg(
            Arg::new("metric")
                .short('p')
                .long("metric")
                .value_name("SPEC")
                .action(ArgAction::Append)
                .value_parser(parse_metric)
                .help("Performance metric as name=value[unit][;warn;crit;min;max]"),
        )
        .arg(
            Arg::new("delete")
                .short('d')
                .long("delete")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Remove a metric after all metrics are added"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("TEMPLATE")
                .help("Message template, {} is replaced by the status then the message"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the report without exiting with its status code"),
        )
}

pub fn load_options<I, T>(args: I) -> Result<CmdOptions, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    let options = CmdOptions {
        status: matches.get_one::<StatusCode>("status").copied().unwrap_or_default(),
        message: matches.get_one::<String>("message").cloned().unwrap_or_default(),
        format: matches.get_one::<String>("format").cloned(),
        metrics: matches
            .get_many::<(String, Metric)>("metric")
            .map(|m| m.cloned().collect())
            .unwrap_or_default(),
        delete: matches
            .get_many::<String>("delete")
            .map(|d| d.cloned().collect())
            .unwrap_or_default(),
        dry_run: matches.get_flag("dry_run"),
    };
    debug!("{:?}", options);
    Ok(options)
}

fn metric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(METRIC_PATTERN).expect("metric pattern is valid"))
}

/// Parses `name=value[unit][;warn;crit;min;max]`. Missing or empty
/// trailing fields are zero.
pub fn parse_metric(spec: &str) -> Result<(String, Metric), MetricArgError> {
    let caps = match metric_pattern().captures(spec) {
        Some(caps) => caps,
        None => return Err(MetricArgError::Malformed(spec.to_string())),
    };
    let number = |field: &'static str, raw: &str| -> Result<f64, MetricArgError> {
        if raw.is_empty() {
            return Ok(0.0);
        }
        raw.parse::<f64>().map_err(|source| MetricArgError::InvalidNumber {
            metric: spec.to_string(),
            field,
            source,
        })
    };

    let name = caps["name"].to_string();
    let mut metric = Metric::new(number("value", &caps["value"])?).with_unit(&caps["unit"]);
    let rest: Vec<&str> = caps["rest"].split(';').skip(1).collect();
    let fields = ["warn", "crit", "min", "max"];
    let mut parsed = [0.0; 4];
    for (i, raw) in rest.iter().enumerate() {
        parsed[i] = number(fields[i], raw.trim())?;
    }
    metric = metric
        .with_thresholds(parsed[0], parsed[1])
        .with_range(parsed[2], parsed[3]);
    Ok((name, metric))
}
