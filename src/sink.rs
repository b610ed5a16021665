//! Destinations that receive formatted log entries.
use crate::priority::Priority;
use std::fmt;
use std::io::{self, Write};

/// A single log entry on its way to a [`Sink`].
///
/// Its `Display` form is the syslog-style line
/// `<PRI>TIMESTAMP TAG[PID]: MESSAGE`, terminated by exactly one newline.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    /// Encoded priority; the facility is always the logger's own.
    pub priority: Priority,
    /// Pre-formatted timestamp.
    pub timestamp: &'a str,
    /// Tag of the emitting program or component.
    pub tag: &'a str,
    /// Process ID of the emitting program.
    pub pid: u32,
    /// Message body.
    pub message: &'a str,
}
impl<'a> Entry<'a> {
    /// Appends the formatted line to `buf`.
    pub fn render_into(&self, buf: &mut Vec<u8>) {
        // Writing into a `Vec` cannot fail.
        let _ = write!(buf, "{}", self);
    }
}
impl<'a> fmt::Display for Entry<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<{}>{} {}[{}]: {}",
            self.priority.bits(),
            self.timestamp,
            self.tag,
            self.pid,
            self.message
        )?;
        if !self.message.ends_with('\n') {
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// An owned, closable destination for log entries.
///
/// A [`Logger`](crate::Logger) calls these methods while holding its write
/// lock, so implementations never see two calls at once.
pub trait Sink: Send {
    /// Writes one entry.
    fn emit(&mut self, entry: &Entry) -> io::Result<()>;

    /// Releases the destination. No further calls follow.
    fn close(&mut self) -> io::Result<()>;
}
impl<T: Sink + ?Sized> Sink for Box<T> {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        (**self).emit(entry)
    }
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// A [`Sink`] that writes each formatted line to an `io::Write` with a single
/// `write_all` call, then flushes it.
///
/// Closing only flushes the writer; the writer itself is released when the
/// sink is dropped. This is how standard error is handled.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
    buf: Vec<u8>,
}
impl<W: Write + Send> WriterSink<W> {
    /// Makes a new `WriterSink` instance.
    pub fn new(writer: W) -> Self {
        WriterSink {
            writer,
            buf: Vec::new(),
        }
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}
impl WriterSink<io::Stderr> {
    /// A sink bound to the standard error stream of this process.
    pub fn stderr() -> Self {
        WriterSink::new(io::stderr())
    }
}
impl<W: Write + Send> Sink for WriterSink<W> {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        self.buf.clear();
        entry.render_into(&mut self.buf);
        self.writer.write_all(&self.buf)?;
        self.writer.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Facility, Severity};

    fn entry(message: &str) -> Entry {
        Entry {
            priority: Facility::Local0 | Severity::Info,
            timestamp: "Oct 16 10:00:00",
            tag: "svc",
            pid: 1234,
            message,
        }
    }

    #[test]
    fn line_format() {
        assert_eq!(
            entry("boot ok").to_string(),
            "<134>Oct 16 10:00:00 svc[1234]: boot ok\n"
        );
    }

    #[test]
    fn trailing_newline_is_not_doubled() {
        assert_eq!(
            entry("boot ok\n").to_string(),
            "<134>Oct 16 10:00:00 svc[1234]: boot ok\n"
        );
        assert_eq!(entry("").to_string(), "<134>Oct 16 10:00:00 svc[1234]: \n");
    }

    #[test]
    fn writer_sink_writes_whole_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(&entry("one")).unwrap();
        sink.emit(&entry("two\n")).unwrap();
        sink.close().unwrap();

        let text = String::from_utf8(sink.get_ref().clone()).unwrap();
        assert_eq!(
            text,
            "<134>Oct 16 10:00:00 svc[1234]: one\n<134>Oct 16 10:00:00 svc[1234]: two\n"
        );
    }
}
