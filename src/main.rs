use log::{error, info};
use std::env;
use check_report::config::load_options;
use check_report::{CheckReport, Sink, StatusCode, StdoutSink};

fn main() {
    env_logger::init();
    let options = match load_options(env::args_os()) {
        Ok(options) => options,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            let message = err.to_string();
            let summary = message
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            error!("Failed to parse arguments: {}", summary);
            let mut report = CheckReport::new();
            report.set_result(StatusCode::Unknown, summary);
            report.emit();
        }
    };
    let dry_run = options.dry_run;
    let report = options.into_report();
    if dry_run {
        info!("Dry run, exit code would be {}", report.status().code());
        if let Err(err) = StdoutSink::new().write_line(&report.render()) {
            error!("Failed to write check report: {}", err);
        }
        return;
    }
    report.emit();
}
