/// Receives one line per decoded element, in parse order.
pub trait Trace {
    fn line(&mut self, line: String);
}

/// Forwards every line to the `log` facade at debug level.
pub struct LogTrace;

impl Trace for LogTrace {
    fn line(&mut self, line: String) {
        debug!("{}", line);
    }
}

impl Trace for Vec<String> {
    fn line(&mut self, line: String) {
        self.push(line);
    }
}
