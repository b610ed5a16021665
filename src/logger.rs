//! The syslog-style logger.
use crate::daemon::SyslogSink;
use crate::destination::{Destination, SyslogAddr};
use crate::file::FileSink;
use crate::priority::{Priority, SEVERITY_MASK};
use crate::sink::{Entry, Sink, WriterSink};
use crate::tick::{Ticker, TimestampCache};
use crate::types::{Severity, TimeZone};
use crate::{ErrorKind, Result};
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A logger writing syslog-style lines to a single [`Sink`].
///
/// Every line looks like `<PRI>Jan _2 15:04:05 TAG[PID]: MESSAGE`. Messages
/// less severe than the logger's filter are silently dropped; the facility
/// of every line is the logger's own, whichever severity method was called.
///
/// A `Logger` is `Send + Sync`. Writes, reconfiguration and `close` are
/// serialized by one lock, so lines never interleave and a write never sees
/// half of a `set_priority`.
///
/// # Examples
///
/// ```
/// use flog::{Facility, Logger, Severity};
///
/// # fn main() -> Result<(), flog::Error> {
/// let logger = Logger::stderr(Facility::Local0 | Severity::Notice, "example");
/// logger.notice("written")?;
/// logger.info("dropped: less severe than notice")?;
/// logger.close()?;
/// # Ok(())
/// # }
/// ```
pub struct Logger {
    inner: Mutex<Inner>,
    cache: Arc<TimestampCache>,
    ticker: Mutex<Option<Ticker>>,
    tickers: Arc<AtomicUsize>,
    pid: u32,
}

struct Inner {
    sink: Option<Box<dyn Sink>>,
    priority: Priority,
    filter: Severity,
    tag: String,
}

impl Logger {
    /// Makes a logger writing to `sink`.
    ///
    /// The filter is the severity of `priority`.
    pub fn new<S>(sink: S, priority: Priority, tag: &str) -> Self
    where
        S: Sink + 'static,
    {
        Logger::with_timezone(Box::new(sink), priority, tag, TimeZone::default())
    }

    pub(crate) fn with_timezone(
        sink: Box<dyn Sink>,
        priority: Priority,
        tag: &str,
        timezone: TimeZone,
    ) -> Self {
        Logger {
            inner: Mutex::new(Inner {
                sink: Some(sink),
                priority,
                filter: priority.severity(),
                tag: tag.to_owned(),
            }),
            cache: Arc::new(TimestampCache::new(timezone)),
            ticker: Mutex::new(None),
            tickers: Arc::new(AtomicUsize::new(0)),
            pid: std::process::id(),
        }
    }

    /// Makes a logger writing to any `io::Write`, one `write_all` per line.
    pub fn from_writer<W>(writer: W, priority: Priority, tag: &str) -> Self
    where
        W: Write + Send + 'static,
    {
        Logger::new(WriterSink::new(writer), priority, tag)
    }

    /// Makes a logger writing to the standard error stream.
    ///
    /// Closing it flushes the stream but leaves it open.
    pub fn stderr(priority: Priority, tag: &str) -> Self {
        Logger::new(WriterSink::stderr(), priority, tag)
    }

    /// Makes a logger appending to the file at `path`, creating it if absent.
    pub fn file<P: AsRef<Path>>(path: P, priority: Priority, tag: &str) -> Result<Self> {
        let sink = track!(FileSink::open(path.as_ref()).map_err(crate::Error::from))?;
        Ok(Logger::new(sink, priority, tag))
    }

    /// Makes a logger sending to the syslog daemon at `addr`.
    pub fn dial(addr: &SyslogAddr, priority: Priority, tag: &str) -> Result<Self> {
        let sink = track!(SyslogSink::connect(addr, priority, tag))?;
        Ok(Logger::new(sink, priority, tag))
    }

    /// Makes a logger from a destination descriptor and a priority string.
    ///
    /// See [`Destination`] for the descriptor syntax and [`Priority`] for
    /// the `"facility:severity"` syntax. Nothing is opened if either string
    /// is invalid.
    ///
    /// ```
    /// use flog::{ErrorKind, Logger};
    ///
    /// let logger = Logger::open("<stderr>", "local0:debug", "example").unwrap();
    /// assert_eq!(logger.priority().bits(), 135);
    ///
    /// let e = Logger::open("<stderr>", "local0:loud", "example").err().unwrap();
    /// assert_eq!(*e.kind(), ErrorKind::Invalid);
    /// ```
    pub fn open(destination: &str, priority: &str, tag: &str) -> Result<Self> {
        let priority: Priority = track!(priority.parse())?;
        let destination: Destination = track!(destination.parse())?;
        track!(Logger::to_destination(&destination, priority, tag, TimeZone::default()))
    }

    pub(crate) fn to_destination(
        destination: &Destination,
        priority: Priority,
        tag: &str,
        timezone: TimeZone,
    ) -> Result<Self> {
        let sink: Box<dyn Sink> = match *destination {
            Destination::Stderr => Box::new(WriterSink::stderr()),
            Destination::File(ref path) => {
                Box::new(track!(FileSink::open(path).map_err(crate::Error::from))?)
            }
            Destination::Syslog(ref addr) => {
                Box::new(track!(SyslogSink::connect(addr, priority, tag))?)
            }
        };
        Ok(Logger::with_timezone(sink, priority, tag, timezone))
    }

    /// Sets the tag embedded in every subsequent line.
    pub fn set_tag(&self, tag: &str) {
        self.lock().tag = tag.to_owned();
    }

    /// Sets the default priority and the filter together.
    ///
    /// The facility of `priority` is used for every subsequent line; its
    /// severity is the one used by [`Logger::write`].
    pub fn set_priority(&self, priority: Priority, filter: Severity) {
        let mut inner = self.lock();
        inner.priority = priority;
        inner.filter = filter;
    }

    /// Returns the current tag.
    pub fn tag(&self) -> String {
        self.lock().tag.clone()
    }

    /// Returns the current default priority.
    pub fn priority(&self) -> Priority {
        self.lock().priority
    }

    /// Returns the least severe level that is still written.
    pub fn filter(&self) -> Severity {
        self.lock().filter
    }

    /// Returns `true` if a message of `severity` would be written.
    pub fn enabled(&self, severity: Severity) -> bool {
        severity.is_at_least(self.lock().filter)
    }

    /// Caches the formatted timestamp, refreshed every `interval` by a
    /// background thread, instead of formatting it on every write.
    ///
    /// Any previously started thread is stopped and joined first. A zero
    /// interval disables the cache. Fails with `ErrorKind::Closed` once the
    /// logger is closed.
    pub fn set_tick(&self, interval: Duration) -> Result<()> {
        let mut ticker = self.lock_ticker();
        track_assert!(!self.is_closed(), ErrorKind::Closed, "Logger is closed");
        if let Some(Err(e)) = ticker.take().map(Ticker::stop) {
            self.cache.disable();
            return Err(track!(crate::Error::from(e)));
        }
        if interval == Duration::from_secs(0) {
            self.cache.disable();
            return Ok(());
        }
        let started = Ticker::start(interval, Arc::clone(&self.cache), Arc::clone(&self.tickers));
        match started {
            Ok(t) => {
                *ticker = Some(t);
                Ok(())
            }
            Err(e) => {
                self.cache.disable();
                Err(track!(crate::Error::from(e)))
            }
        }
    }

    /// Returns the refresh interval of the timestamp cache, if enabled.
    pub fn tick(&self) -> Option<Duration> {
        self.lock_ticker().as_ref().map(Ticker::interval)
    }

    /// Returns the number of running timestamp refresh threads (0 or 1).
    pub fn active_tickers(&self) -> usize {
        self.tickers.load(Ordering::SeqCst)
    }

    /// Logs `msg` at the emergency level.
    pub fn emerg(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Emergency, msg)).map(|_| ())
    }

    /// Logs `msg` at the alert level.
    pub fn alert(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Alert, msg)).map(|_| ())
    }

    /// Logs `msg` at the critical level.
    pub fn crit(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Critical, msg)).map(|_| ())
    }

    /// Logs `msg` at the error level.
    pub fn err(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Error, msg)).map(|_| ())
    }

    /// Logs `msg` at the warning level.
    pub fn warning(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Warning, msg)).map(|_| ())
    }

    /// Logs `msg` at the notice level.
    pub fn notice(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Notice, msg)).map(|_| ())
    }

    /// Logs `msg` at the info level.
    pub fn info(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Info, msg)).map(|_| ())
    }

    /// Logs `msg` at the debug level.
    pub fn debug(&self, msg: &str) -> Result<()> {
        track!(self.log(Severity::Debug, msg)).map(|_| ())
    }

    /// Logs `buf` at the severity of the default priority.
    ///
    /// Invalid UTF-8 is replaced. Returns `buf.len()` once written, or 0 if
    /// the default severity is filtered out.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let written = track!(self.emit(None, &msg))?;
        Ok(if written == 0 { 0 } else { buf.len() })
    }

    /// Logs `msg` at `severity`.
    ///
    /// Returns the length of `msg` once written, or 0 if `severity` is less
    /// severe than the filter. Filtering is not an error.
    pub fn log(&self, severity: Severity, msg: &str) -> Result<usize> {
        track!(self.emit(Some(severity), msg))
    }

    // `None` stands for the severity of the default priority, read under the
    // same lock as the filter.
    fn emit(&self, severity: Option<Severity>, msg: &str) -> Result<usize> {
        let mut inner = self.lock();
        let severity = severity.unwrap_or_else(|| inner.priority.severity());
        if severity.code() & SEVERITY_MASK > inner.filter.code() {
            return Ok(0);
        }
        let priority = inner.priority.with_severity(severity);
        let timestamp = self.cache.current();

        let Inner {
            ref mut sink,
            ref tag,
            ..
        } = *inner;
        let sink = track_assert_some!(sink.as_mut(), ErrorKind::Closed, "Logger is closed");
        let entry = Entry {
            priority,
            timestamp: &timestamp,
            tag,
            pid: self.pid,
            message: msg,
        };
        track!(sink.emit(&entry).map_err(crate::Error::from))?;
        Ok(msg.len())
    }

    /// Stops the timestamp thread, then closes and releases the sink.
    ///
    /// Closing twice, or writing after closing, fails with
    /// `ErrorKind::Closed`.
    pub fn close(&self) -> Result<()> {
        // Held until the sink is gone, so `set_tick` cannot start a new thread
        // in between.
        let mut ticker = self.lock_ticker();
        let stopped = ticker.take().map_or(Ok(()), Ticker::stop);
        self.cache.disable();

        let sink = self.lock().sink.take();
        drop(ticker);
        let mut sink = track_assert_some!(sink, ErrorKind::Closed, "Logger is already closed");
        let closed = sink.close();
        track!(stopped.map_err(crate::Error::from))?;
        track!(closed.map_err(crate::Error::from))
    }

    /// Returns `true` once [`Logger::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().sink.is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_ticker(&self) -> MutexGuard<'_, Option<Ticker>> {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Logger")
            .field("priority", &inner.priority)
            .field("filter", &inner.filter)
            .field("tag", &inner.tag)
            .field("closed", &inner.sink.is_none())
            .field("pid", &self.pid)
            .finish()
    }
}

/// Each `write` call, and each `write!`/`writeln!`, produces exactly one line
/// at the default priority. A filtered write still reports the whole buffer as
/// written.
impl<'a> Write for &'a Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Logger::write(*self, buf).map_err(io::Error::from)?;
        Ok(buf.len())
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> io::Result<()> {
        let msg = fmt::format(args);
        Logger::write(*self, msg.as_bytes()).map_err(io::Error::from)?;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
