//! A minimal syslog-compatible logger.
//!
//! Messages are formatted as `<PRI>Jan _2 15:04:05 TAG[PID]: MESSAGE` lines,
//! filtered by severity, and written to standard error, a local file or a
//! syslog daemon.
//!
//! # Examples
//!
//! Logs to a file:
//!
//! ```
//! use flog::{Facility, Logger, Severity};
//!
//! # fn main() -> Result<(), flog::Error> {
//! # let dir = tempfile::tempdir().unwrap();
//! # let path = dir.path().join("app.log");
//! let logger = Logger::file(&path, Facility::Local0 | Severity::Info, "app")?;
//! logger.info("Hello World!")?;
//! logger.debug("dropped")?;
//! logger.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! Creates a logger from descriptor strings:
//!
//! ```
//! use flog::Logger;
//!
//! let logger = Logger::open("<stderr>", "daemon:notice", "app").unwrap();
//! logger.warning("Hello World!").unwrap();
//! ```
//!
//! Creates a logger from configuration text (TOML) and uses it with `slog`:
//!
//! ```
//! #[macro_use]
//! extern crate slog;
//! extern crate flog;
//! extern crate serdeconv;
//!
//! use flog::{Config, LoggerConfig};
//!
//! # fn main() {
//! let config: LoggerConfig = serdeconv::from_toml_str(r#"
//! destination = "<stderr>"
//! priority = "local3:debug"
//! tick_ms = 1000
//! "#).unwrap();
//!
//! let logger = config.build_logger().unwrap().into_slog();
//! info!(logger, "Hello World!");
//! # }
//! ```
#![warn(missing_docs)]
#[macro_use]
extern crate slog;
#[macro_use]
extern crate trackable;

pub use crate::build::{Build, LoggerBuilder};
pub use crate::config::{Config, LoggerConfig};
pub use crate::daemon::SyslogSink;
pub use crate::destination::{Destination, SyslogAddr, DEFAULT_SYSLOG_PORT};
pub use crate::error::{Error, ErrorKind};
pub use crate::facility::Facility;
pub use crate::file::FileSink;
pub use crate::logger::Logger;
pub use crate::misc::set_stdlog_logger;
pub use crate::priority::{Priority, FACILITY_MASK, SEVERITY_MASK};
pub use crate::sink::{Entry, Sink, WriterSink};
pub use crate::types::{Severity, TimeZone};

pub mod types;

mod build;
mod config;
mod daemon;
mod destination;
mod drain;
mod error;
mod facility;
mod file;
mod logger;
mod misc;
mod priority;
mod sink;
mod tick;

#[cfg(test)]
mod mock;

/// A specialized `Result` type for this crate.
pub type Result<T> = ::std::result::Result<T, Error>;
