//! `slog` integration.
use crate::logger::Logger;
use crate::types::Severity;
use crate::Error;
use slog::{Drain, Level, OwnedKVList, Record, KV};
use slog_async::Async;
use std::fmt::{self, Write};
use std::result::Result as StdResult;

/// Capacity of the channel between an `into_slog` logger and its worker.
const ASYNC_CHANNEL_SIZE: usize = 1024;

impl Logger {
    /// Converts this logger into an asynchronous `slog::Logger`.
    ///
    /// Records are handed to a `slog_async` worker thread, which writes them
    /// through this logger. Errors raised by the sink are discarded.
    ///
    /// ```
    /// #[macro_use]
    /// extern crate slog;
    /// extern crate flog;
    ///
    /// use flog::{Facility, Logger, Severity};
    ///
    /// # fn main() {
    /// let logger = Logger::stderr(Facility::Local1 | Severity::Debug, "example").into_slog();
    /// info!(logger, "Hello World!"; "answer" => 42);
    /// # }
    /// ```
    pub fn into_slog(self) -> slog::Logger {
        let drain = Async::new(self.ignore_res())
            .chan_size(ASYNC_CHANNEL_SIZE)
            .build()
            .fuse();
        slog::Logger::root(drain, o!())
    }
}

impl Drain for Logger {
    type Ok = ();
    type Err = Error;

    fn log(&self, record: &Record, values: &OwnedKVList) -> StdResult<(), Error> {
        let severity = level_to_severity(record.level());
        let mut msg = String::new();
        if let Err(e) = format_msg(&mut msg, record, values) {
            // Keep whatever part of the message was formatted.
            msg.push_str(&format!(" (formatting error: {})", e));
        }
        track!(Logger::log(self, severity, &msg))?;
        Ok(())
    }

    fn is_enabled(&self, level: Level) -> bool {
        self.enabled(level_to_severity(level))
    }
}

fn level_to_severity(level: Level) -> Severity {
    match level {
        Level::Critical => Severity::Critical,
        Level::Error => Severity::Error,
        Level::Warning => Severity::Warning,
        Level::Info => Severity::Info,
        Level::Debug | Level::Trace => Severity::Debug,
    }
}

/// Writes the message of `record` followed by its key-value pairs as
/// ` [key1="value1" key2="value2"]`.
fn format_msg(out: &mut String, record: &Record, values: &OwnedKVList) -> slog::Result {
    write!(out, "{}", record.msg())?;

    let mut serializer = KvSerializer::new(out);
    values.serialize(record, &mut serializer)?;
    record.kv().serialize(record, &mut serializer)?;
    serializer.finish()
}

struct KvSerializer<'a> {
    out: &'a mut String,
    is_first_kv: bool,
}
impl<'a> KvSerializer<'a> {
    fn new(out: &'a mut String) -> Self {
        KvSerializer {
            out,
            is_first_kv: true,
        }
    }

    fn finish(&mut self) -> slog::Result {
        if !self.is_first_kv {
            self.out.push(']');
        }
        Ok(())
    }
}
impl<'a> slog::Serializer for KvSerializer<'a> {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments) -> slog::Result {
        self.out.push_str(if self.is_first_kv { " [" } else { " " });
        self.is_first_kv = false;

        // Keys are written as is; only values are escaped.
        write!(self.out, "{}=\"", key)?;
        write!(ValueEscaper(&mut *self.out), "{}", val)?;
        self.out.push('"');
        Ok(())
    }
}

/// Escapes `\`, `"` and `]` with a backslash.
struct ValueEscaper<W: Write>(W);
impl<W: Write> Write for ValueEscaper<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.write_char(c)?;
        }
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        match c {
            '\\' | '"' | ']' => {
                self.0.write_char('\\')?;
                self.0.write_char(c)
            }
            _ => self.0.write_char(c),
        }
    }
}
