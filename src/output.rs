use log::{debug, error};
use std::io;
use std::process;
use crate::checker::CheckReport;
use crate::error::EmitError;
use crate::output_print::StdoutSink;

/// Destination of an emitted report: where the line goes and how the
/// process ends afterwards.
pub trait Sink {
    /// Writes `line` followed by a newline. Everything must be flushed
    /// before returning.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
    /// Ends the check with `code`. The production sink never returns.
    fn terminate(&mut self, code: i32);
}

impl CheckReport {
    /// Renders the report into `sink`, then terminates it with the status
    /// exit code. A failed write is logged and still terminates.
    pub fn emit_to<S: Sink>(&self, sink: &mut S) -> Result<(), EmitError> {
        let line = self.render();
        let code = self.status().code();
        debug!("emitting check report, exit code {}", code);
        let written = sink.write_line(&line);
        if let Err(ref err) = written {
            error!("Failed to write check report: {}", err);
        }
        sink.terminate(code);
        written.map_err(EmitError::from)
    }

    /// Prints the report on stdout and exits the process with the status
    /// exit code.
    pub fn emit(&self) -> ! {
        let mut sink = StdoutSink::new();
        if let Err(err) = self.emit_to(&mut sink) {
            debug!("exiting after failed write: {}", err);
        }
        process::exit(self.status().code())
    }
}
