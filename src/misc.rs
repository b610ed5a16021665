use crate::{Error, Result};
use slog::Logger;

/// Sets the logger for the log records emitted via `log` crate.
///
/// The logger is installed as the `slog_scope` global logger for the rest of
/// the process, and `log` records are routed to it through `slog_stdlog`.
/// Like `log::set_logger`, this only succeeds once per process.
pub fn set_stdlog_logger(logger: Logger) -> Result<()> {
    slog_scope::set_global_logger(logger).cancel_reset();
    track!(slog_stdlog::init().map_err(Error::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSink;
    use crate::{ErrorKind, Facility, Severity};
    use slog::Drain;

    #[test]
    fn routes_log_records() {
        let sink = MockSink::new();
        let logger = crate::Logger::new(sink.clone(), Facility::Local5 | Severity::Info, "std");
        set_stdlog_logger(slog::Logger::root(logger.fuse(), o!())).unwrap();

        log::warn!("from the log crate");
        log::debug!("filtered");

        let emitted = sink.emitted();
        assert_eq!(emitted.len(), 1);
        assert!(emitted[0].message.starts_with("from the log crate"), "{:?}", emitted[0].message);
        assert_eq!(emitted[0].priority, (Facility::Local5 | Severity::Warning).bits());

        // A second installation is refused by the `log` crate.
        let e = set_stdlog_logger(slog::Logger::root(slog::Discard, o!())).unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::Other);
    }
}
