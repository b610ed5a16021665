//! Syslog daemon destination.
//!
//! Framing and transport are delegated to the [syslog] crate. The daemon
//! variant still goes through [`Sink`], so the logger filters and picks
//! priorities exactly as it does for the other destinations; only the line
//! itself (timestamp included) is produced by the client.
//!
//! [syslog]: https://docs.rs/syslog/6/syslog/
use crate::destination::SyslogAddr;
use crate::priority::Priority;
use crate::sink::{Entry, Sink};
use crate::types::Severity;
use crate::{Error, Result};
use ::syslog::{Formatter3164, LoggerBackend};
use std::fmt;
use std::io;

type Client = ::syslog::Logger<LoggerBackend, Formatter3164>;

/// A [`Sink`] forwarding entries to a syslog daemon.
pub struct SyslogSink {
    addr: SyslogAddr,
    client: Option<Client>,
}
impl SyslogSink {
    /// Connects to the daemon at `addr`.
    ///
    /// `priority` and `tag` only seed the client; both are refreshed from
    /// every entry.
    pub fn connect(addr: &SyslogAddr, priority: Priority, tag: &str) -> Result<Self> {
        let formatter = Formatter3164 {
            facility: priority.facility().to_syslog(),
            hostname: None,
            process: tag.to_owned(),
            pid: std::process::id(),
        };
        let client = track!(dial(addr, formatter))?;
        Ok(SyslogSink {
            addr: addr.clone(),
            client: Some(client),
        })
    }

    /// Returns the address of the daemon.
    pub fn addr(&self) -> &SyslogAddr {
        &self.addr
    }
}
impl fmt::Debug for SyslogSink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SyslogSink")
            .field("addr", &self.addr)
            .field("connected", &self.client.is_some())
            .finish()
    }
}
impl Sink for SyslogSink {
    fn emit(&mut self, entry: &Entry) -> io::Result<()> {
        let client = match self.client.as_mut() {
            Some(client) => client,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotConnected,
                    "syslog connection is closed",
                ))
            }
        };
        client.formatter.facility = entry.priority.facility().to_syslog();
        if client.formatter.process != entry.tag {
            client.formatter.process = entry.tag.to_owned();
        }

        let message = entry.message.trim_end_matches('\n');
        let result = match entry.priority.severity() {
            Severity::Emergency => client.emerg(message),
            Severity::Alert => client.alert(message),
            Severity::Critical => client.crit(message),
            Severity::Error => client.err(message),
            Severity::Warning => client.warning(message),
            Severity::Notice => client.notice(message),
            Severity::Info => client.info(message),
            Severity::Debug => client.debug(message),
        };
        result.map_err(into_io_error)
    }

    fn close(&mut self) -> io::Result<()> {
        self.client = None;
        Ok(())
    }
}

fn dial(addr: &SyslogAddr, formatter: Formatter3164) -> Result<Client> {
    let result = match *addr {
        #[cfg(unix)]
        SyslogAddr::Local => ::syslog::unix(formatter),
        #[cfg(unix)]
        SyslogAddr::Unix(ref path) => ::syslog::unix_custom(formatter, path),
        #[cfg(not(unix))]
        SyslogAddr::Local | SyslogAddr::Unix(_) => track_panic!(
            crate::ErrorKind::Invalid,
            "Unix syslog sockets are not supported on this platform"
        ),
        SyslogAddr::Udp(ref server) => {
            let local = if server.starts_with('[') {
                "[::]:0"
            } else {
                "0.0.0.0:0"
            };
            ::syslog::udp(formatter, local, server.as_str())
        }
        SyslogAddr::Tcp(ref server) => ::syslog::tcp(formatter, server.as_str()),
    };
    result.map_err(|e| Error::from(into_io_error(e)))
}

fn into_io_error(e: ::syslog::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}
