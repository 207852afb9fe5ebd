use log::debug;
use std::collections::HashMap;
use std::fmt::Write;
use crate::metric::Metric;
use crate::status::StatusCode;

pub const DEFAULT_FORMAT: &str = "{} - {}";

/// Result of one monitoring check: a status, a message and an ordered set
/// of performance metrics.
///
/// Metrics keep the position of their first insertion. `order` and
/// `metrics` always hold the same names.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    status: StatusCode,
    message: String,
    order: Vec<String>,
    metrics: HashMap<String, Metric>,
    format: String,
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckReport {
    pub fn new() -> Self {
        Self {
            status: StatusCode::Ok,
            message: String::new(),
            order: Vec::new(),
            metrics: HashMap::new(),
            format: String::from(DEFAULT_FORMAT),
        }
    }

    /// Replaces the message template. The first `{}` receives the status
    /// name and the second one the message; `{{` and `}}` are literal braces.
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.set_format(format);
        self
    }

    pub fn set_format<S: Into<String>>(&mut self, format: S) {
        self.format = format.into();
    }

    pub fn set_result<S: Into<String>>(&mut self, status: StatusCode, message: S) {
        self.status = status;
        self.message = message.into();
        debug!("check result set to {} ({})", self.status, self.status.code());
    }

    /// Inserts `name` at the end of the metric order, or replaces its value
    /// in place if it is already present.
    pub fn add_metric<S: Into<String>>(&mut self, name: S, metric: Metric) {
        let name = name.into();
        if !self.metrics.contains_key(&name) {
            debug!("adding metric {}", name);
            self.order.push(name.clone());
        }
        self.metrics.insert(name, metric);
    }

    /// Overwrites the value stored for `name`. An unknown name is inserted
    /// at the end, exactly like `add_metric`.
    pub fn update_metric<S: Into<String>>(&mut self, name: S, metric: Metric) {
        let name = name.into();
        match self.metrics.get_mut(&name) {
            Some(stored) => {
                debug!("updating metric {}", name);
                *stored = metric;
            },
            None => self.add_metric(name, metric),
        }
    }

    /// Removes `name` while keeping every other metric at its relative
    /// position. Unknown names are ignored.
    pub fn delete_metric(&mut self, name: &str) {
        if self.metrics.remove(name).is_none() {
            return;
        }
        debug!("deleting metric {}", name);
        self.order.retain(|n| n != name);
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.get(name)
    }

    pub fn metric_names(&self) -> &[String] {
        &self.order
    }

    pub fn metrics(&self) -> impl Iterator<Item = (&str, &Metric)> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.metrics.get(name).map(|m| (name.as_str(), m)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Builds the report line without any side effect. Infinite values are
    /// spelled `+Inf`/`-Inf`, as plugin parsers expect.
    ///
    /// ```
    /// use check_report::{CheckReport, Metric, StatusCode};
    ///
    /// let mut report = CheckReport::new();
    /// report.set_result(StatusCode::Warning, "slow");
    /// report.add_metric("rtt", Metric::new(12.5).with_unit("ms"));
    /// assert_eq!(report.render(), "Warning - slow | 'rtt'=12.50ms;0.00;0.00;0.00;0.00 ");
    /// ```
    pub fn render(&self) -> String {
        let mut output = apply_format(&self.format, &self.status.name(), &self.message);
        if self.is_empty() {
            return output;
        }
        output.push_str(" | ");
        for (name, metric) in self.metrics() {
            // Writing into a String cannot fail.
            let _ = write!(
                output,
                "'{}'={}{};{};{};{};{} ",
                name,
                fixed(metric.value),
                metric.unit,
                fixed(metric.warn),
                fixed(metric.crit),
                fixed(metric.min),
                fixed(metric.max)
            );
        }
        output
    }
}

fn fixed(value: f64) -> String {
    if value.is_infinite() {
        let sign = if value > 0.0 { '+' } else { '-' };
        format!("{}Inf", sign)
    } else {
        format!("{:.2}", value)
    }
}

fn apply_format(format: &str, status: &str, message: &str) -> String {
    let mut output = String::with_capacity(format.len() + status.len() + message.len());
    let mut slots = [status, message].into_iter();
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        match (c, next) {
            ('{', Some('{')) => {
                chars.next();
                output.push('{');
            },
            ('}', Some('}')) => {
                chars.next();
                output.push('}');
            },
            ('{', Some('}')) => {
                chars.next();
                match slots.next() {
                    Some(value) => output.push_str(value),
                    None => output.push_str("{}"),
                }
            },
            (c, _) => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_time() -> Metric {
        Metric::new(1.23)
            .with_thresholds(1.0, 2.0)
            .with_range(0.0, 10.0)
            .with_unit("ms")
    }

    fn names(report: &CheckReport) -> Vec<&str> {
        report.metric_names().iter().map(String::as_str).collect()
    }

    #[test]
    fn new_report_defaults() {
        let report = CheckReport::new();
        assert_eq!(report.status(), StatusCode::Ok);
        assert_eq!(report.message(), "");
        assert_eq!(report.format(), DEFAULT_FORMAT);
        assert!(report.is_empty());
        assert_eq!(report, CheckReport::default());
    }

    #[test]
    fn set_result_overwrites_status_and_message() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Warning, "Test message");
        assert_eq!(report.status(), StatusCode::Warning);
        assert_eq!(report.message(), "Test message");

        report.set_result(StatusCode::Critical, "");
        assert_eq!(report.status(), StatusCode::Critical);
        assert_eq!(report.message(), "");
    }

    #[test]
    fn add_on_default_report_works() {
        let mut report = CheckReport::default();
        report.add_metric("test", response_time());
        assert_eq!(report.metric("test"), Some(&response_time()));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn re_adding_keeps_position_and_takes_new_value() {
        let mut report = CheckReport::new();
        report.add_metric("a", Metric::new(1.0));
        report.add_metric("b", Metric::new(2.0));
        report.add_metric("c", Metric::new(3.0));
        report.add_metric("a", Metric::new(9.0));

        assert_eq!(names(&report), ["a", "b", "c"]);
        assert_eq!(report.metric("a").map(|m| m.value), Some(9.0));
    }

    #[test]
    fn update_overwrites_existing_metric() {
        let mut report = CheckReport::new();
        report.add_metric("test", response_time());
        report.add_metric("other", Metric::new(0.5));
        let updated = Metric::new(2.34)
            .with_thresholds(2.0, 3.0)
            .with_range(1.0, 20.0)
            .with_unit("s");
        report.update_metric("test", updated.clone());

        assert_eq!(report.metric("test"), Some(&updated));
        assert_eq!(names(&report), ["test", "other"]);
    }

    #[test]
    fn update_of_unknown_name_inserts_at_end() {
        let mut report = CheckReport::new();
        report.add_metric("a", Metric::new(1.0));
        report.update_metric("z", Metric::new(26.0));
        assert_eq!(names(&report), ["a", "z"]);
        assert_eq!(report.metric("z").map(|m| m.value), Some(26.0));
    }

    #[test]
    fn delete_keeps_order_of_survivors() {
        let mut report = CheckReport::new();
        for name in ["a", "b", "c", "d"] {
            report.add_metric(name, Metric::new(1.0));
        }
        report.delete_metric("b");
        assert_eq!(names(&report), ["a", "c", "d"]);
        assert!(report.metric("b").is_none());

        report.delete_metric("a");
        assert_eq!(names(&report), ["c", "d"]);
    }

    #[test]
    fn delete_of_unknown_name_is_noop() {
        let mut report = CheckReport::new();
        report.add_metric("a", Metric::new(1.0));
        let before = report.clone();
        report.delete_metric("missing");
        assert_eq!(report, before);

        let mut empty = CheckReport::default();
        empty.delete_metric("missing");
        assert!(empty.is_empty());
    }

    #[test]
    fn re_add_after_delete_goes_to_the_end() {
        let mut report = CheckReport::new();
        for name in ["a", "b", "c"] {
            report.add_metric(name, Metric::new(1.0));
        }
        report.delete_metric("a");
        report.add_metric("a", Metric::new(2.0));
        assert_eq!(names(&report), ["b", "c", "a"]);
    }

    #[test]
    fn render_without_metrics_has_no_pipe() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Ok, "Everything is fine");
        assert_eq!(report.render(), "OK - Everything is fine");
    }

    #[test]
    fn render_single_metric() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Ok, "Everything is fine");
        report.add_metric("response_time", response_time());
        assert_eq!(
            report.render(),
            "OK - Everything is fine | 'response_time'=1.23ms;1.00;2.00;0.00;10.00 "
        );
    }

    #[test]
    fn render_multiple_metrics_in_insertion_order() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Critical, "CPU overloaded");
        report.add_metric(
            "cpu_usage",
            Metric::new(95.0).with_thresholds(80.0, 90.0).with_range(0.0, 100.0),
        );
        report.add_metric(
            "memory_usage",
            Metric::new(88.5).with_thresholds(85.0, 95.0).with_range(0.0, 100.0),
        );
        assert_eq!(
            report.render(),
            "Critical - CPU overloaded | 'cpu_usage'=95.00;80.00;90.00;0.00;100.00 \
             'memory_usage'=88.50;85.00;95.00;0.00;100.00 "
        );
    }

    #[test]
    fn render_percent_unit_and_inverted_range() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Other(7), "odd");
        report.add_metric("load", Metric::new(-1.005).with_range(10.0, -10.0).with_unit("%"));
        assert_eq!(
            report.render(),
            "ExitCode(7) - odd | 'load'=-1.00%;0.00;0.00;10.00;-10.00 "
        );
    }

    #[test]
    fn render_spells_infinity_like_plugin_parsers() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Ok, "edge");
        let metric = Metric::new(f64::INFINITY)
            .with_thresholds(f64::NEG_INFINITY, f64::NAN)
            .with_range(0.125, 2.675);
        report.add_metric("x", metric);
        assert_eq!(report.render(), "OK - edge | 'x'=+Inf;-Inf;NaN;0.12;2.67 ");
    }

    #[test]
    fn render_is_idempotent() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Warning, "High latency detected");
        report.add_metric("response_time", response_time());
        assert_eq!(report.render(), report.render());
    }

    #[test]
    fn render_after_deleting_every_metric_drops_perfdata() {
        let mut report = CheckReport::new();
        report.set_result(StatusCode::Ok, "fine");
        report.add_metric("a", Metric::new(1.0));
        report.delete_metric("a");
        assert_eq!(report.render(), "OK - fine");
    }

    #[test]
    fn custom_format_with_escaped_braces() {
        let mut report = CheckReport::new().with_format("[{}] {} (details: {{}})");
        report.set_result(StatusCode::Unknown, "Plugin unable to determine status");
        assert_eq!(
            report.render(),
            "[Unknown] Plugin unable to determine status (details: {})"
        );
    }

    #[test]
    fn format_slots_are_not_validated() {
        assert_eq!(apply_format("{}", "OK", "msg"), "OK");
        assert_eq!(apply_format("{}: {} {}", "OK", "msg"), "OK: msg {}");
        assert_eq!(apply_format("static", "OK", "msg"), "static");
        assert_eq!(apply_format("{ {} }", "OK", "msg"), "{ OK }");
        assert_eq!(apply_format("{} - {}", "OK", "{}"), "OK - {}");
    }
}
