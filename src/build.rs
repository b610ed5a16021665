use crate::destination::Destination;
use crate::logger::Logger;
use crate::priority::Priority;
use crate::types::{Severity, TimeZone};
use crate::Result;
use std::time::Duration;

/// This trait allows to build a logger instance.
pub trait Build {
    /// Builds a logger.
    fn build(&self) -> Result<Logger>;
}

/// A builder of [`Logger`]s.
///
/// # Examples
///
/// ```
/// use flog::{Build, Destination, Facility, LoggerBuilder, Severity};
///
/// let logger = LoggerBuilder::new()
///     .destination(Destination::Stderr)
///     .priority(Facility::Daemon | Severity::Info)
///     .filter(Severity::Debug)
///     .tag("example")
///     .build()
///     .unwrap();
/// logger.debug("Hello World!").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    destination: Destination,
    priority: Priority,
    filter: Option<Severity>,
    tag: Option<String>,
    tick: Option<Duration>,
    timezone: TimeZone,
}
impl LoggerBuilder {
    /// Makes a new `LoggerBuilder` writing `user:info` lines to stderr.
    pub fn new() -> Self {
        LoggerBuilder {
            destination: Destination::default(),
            priority: Priority::default(),
            filter: None,
            tag: None,
            tick: None,
            timezone: TimeZone::default(),
        }
    }

    /// Sets the destination.
    pub fn destination(&mut self, destination: Destination) -> &mut Self {
        self.destination = destination;
        self
    }

    /// Sets the default priority.
    ///
    /// Unless [`filter`](LoggerBuilder::filter) is called, its severity is
    /// also the filter.
    pub fn priority(&mut self, priority: Priority) -> &mut Self {
        self.priority = priority;
        self
    }

    /// Sets the least severe level that is still written.
    pub fn filter(&mut self, filter: Severity) -> &mut Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the tag of every line.
    ///
    /// The default is the file stem of the current executable.
    pub fn tag(&mut self, tag: &str) -> &mut Self {
        self.tag = Some(tag.to_owned());
        self
    }

    /// Enables the cached timestamp, refreshed every `interval`.
    pub fn tick(&mut self, interval: Duration) -> &mut Self {
        self.tick = if interval == Duration::from_secs(0) {
            None
        } else {
            Some(interval)
        };
        self
    }

    /// Sets the time zone of timestamps.
    pub fn timezone(&mut self, timezone: TimeZone) -> &mut Self {
        self.timezone = timezone;
        self
    }
}
impl Default for LoggerBuilder {
    fn default() -> Self {
        LoggerBuilder::new()
    }
}
impl Build for LoggerBuilder {
    fn build(&self) -> Result<Logger> {
        let tag = match self.tag {
            Some(ref tag) => tag.clone(),
            None => default_tag(),
        };
        let logger = track!(Logger::to_destination(
            &self.destination,
            self.priority,
            &tag,
            self.timezone
        ))?;
        if let Some(filter) = self.filter {
            logger.set_priority(self.priority, filter);
        }
        if let Some(interval) = self.tick {
            track!(logger.set_tick(interval))?;
        }
        Ok(logger)
    }
}

fn default_tag() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Facility;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let logger = LoggerBuilder::new().build().unwrap();
        assert_eq!(logger.priority(), Facility::User | Severity::Info);
        assert_eq!(logger.filter(), Severity::Info);
        assert!(!logger.tag().is_empty());
        assert_eq!(logger.tick(), None);
        assert_eq!(logger.active_tickers(), 0);
    }

    #[test]
    fn file_logger_with_explicit_filter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("built.log");

        let logger = LoggerBuilder::new()
            .destination(Destination::File(path.clone()))
            .priority(Facility::Local7 | Severity::Warning)
            .filter(Severity::Debug)
            .tag("built")
            .timezone(TimeZone::Utc)
            .tick(Duration::from_millis(100))
            .build()
            .unwrap();
        assert_eq!(logger.tick(), Some(Duration::from_millis(100)));
        assert_eq!(logger.active_tickers(), 1);

        logger.debug("kept").unwrap();
        logger.close().unwrap();
        assert_eq!(logger.active_tickers(), 0);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<191>"), "{:?}", text);
        assert!(text.ends_with(&format!(" built[{}]: kept\n", std::process::id())));
    }

    #[test]
    fn zero_tick_disables_the_cache() {
        let logger = LoggerBuilder::new()
            .tick(Duration::from_secs(1))
            .tick(Duration::from_secs(0))
            .build()
            .unwrap();
        assert_eq!(logger.tick(), None);
    }
}
