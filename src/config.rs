use crate::destination::Destination;
use crate::logger::Logger;
use crate::priority::Priority;
use crate::types::{Severity, TimeZone};
use crate::{Build, LoggerBuilder, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration of a logger builder.
pub trait Config {
    /// Logger builder.
    type Builder: Build;

    /// Makes a logger builder associated with this configuration.
    fn try_to_builder(&self) -> Result<Self::Builder>;

    /// Builds a logger with this configuration.
    fn build_logger(&self) -> Result<Logger> {
        let builder = track!(self.try_to_builder())?;
        let logger = track!(builder.build())?;
        Ok(logger)
    }
}

/// The configuration of `LoggerBuilder`.
///
/// Every field is optional.
///
/// # Examples
///
/// Standard error.
///
/// ```
/// extern crate flog;
/// extern crate serdeconv;
///
/// use flog::LoggerConfig;
///
/// let toml = r#"
/// priority = "local0:warning"
/// "#;
/// let _config: LoggerConfig = serdeconv::from_toml_str(toml).unwrap();
/// ```
///
/// File with a cached timestamp.
///
/// ```
/// extern crate flog;
/// extern crate serdeconv;
///
/// use flog::LoggerConfig;
///
/// let toml = r#"
/// destination = "/path/to/file.log"
/// priority = "daemon:info"
/// filter = "debug"
/// tag = "myapp"
/// tick_ms = 1000
/// timezone = "utc"
/// "#;
/// let _config: LoggerConfig = serdeconv::from_toml_str(toml).unwrap();
/// ```
///
/// Remote syslog daemon.
///
/// ```
/// extern crate flog;
/// extern crate serdeconv;
///
/// use flog::LoggerConfig;
///
/// let toml = r#"
/// destination = "udp://loghost:514"
/// "#;
/// let _config: LoggerConfig = serdeconv::from_toml_str(toml).unwrap();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Destination descriptor, such as `<stderr>`, `udp://host` or a path.
    pub destination: Destination,

    /// Default priority, as `facility:severity`.
    pub priority: Priority,

    /// Least severe level still written. Defaults to the priority's severity.
    pub filter: Option<Severity>,

    /// Tag of every line. Defaults to the executable's file stem.
    pub tag: Option<String>,

    /// Refresh interval of the cached timestamp in milliseconds; 0 disables it.
    pub tick_ms: u64,

    /// Time zone of timestamps.
    pub timezone: TimeZone,
}
impl LoggerConfig {
    /// Sets the filter of this logger.
    pub fn set_filter(&mut self, filter: Severity) {
        self.filter = Some(filter);
    }
}
impl Config for LoggerConfig {
    type Builder = LoggerBuilder;
    fn try_to_builder(&self) -> Result<Self::Builder> {
        let mut builder = LoggerBuilder::new();
        builder.destination(self.destination.clone());
        builder.priority(self.priority);
        builder.timezone(self.timezone);
        builder.tick(Duration::from_millis(self.tick_ms));
        if let Some(filter) = self.filter {
            builder.filter(filter);
        }
        if let Some(ref tag) = self.tag {
            builder.tag(tag);
        }
        Ok(builder)
    }
}
