//! Where a logger writes to.
use crate::{Error, ErrorKind, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::result::Result as StdResult;
use std::str::FromStr;

/// Port used for `udp://` and `tcp://` daemons when none is given.
pub const DEFAULT_SYSLOG_PORT: u16 = 514;

static URL: Lazy<Regex> = Lazy::new(|| {
    // `scheme://rest`
    Regex::new(r"^(\w+)://(.*)$").expect("valid regex")
});

/// The destination of a logger.
///
/// It is usually given as a descriptor string:
///
/// | Descriptor               | Destination                      |
/// |--------------------------|----------------------------------|
/// | `""` or `<stderr>`       | standard error                   |
/// | `<syslog>`               | the local syslog daemon          |
/// | `udp://host[:port]`      | a syslog daemon over UDP         |
/// | `tcp://host[:port]`      | a syslog daemon over TCP         |
/// | `unix:///path/to/socket` | a syslog daemon on a unix socket |
/// | anything else            | a local file path                |
///
/// # Examples
///
/// ```
/// use flog::{Destination, SyslogAddr};
///
/// assert_eq!("".parse::<Destination>().unwrap(), Destination::Stderr);
/// assert_eq!(
///     "udp://loghost".parse::<Destination>().unwrap(),
///     Destination::Syslog(SyslogAddr::Udp("loghost:514".to_owned()))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard error.
    Stderr,

    /// A local file, opened for appending.
    File(PathBuf),

    /// A syslog daemon.
    Syslog(SyslogAddr),
}
impl Default for Destination {
    fn default() -> Self {
        Destination::Stderr
    }
}
impl FromStr for Destination {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "<stderr>" => Ok(Destination::Stderr),
            "<syslog>" => Ok(Destination::Syslog(SyslogAddr::Local)),
            _ => match URL.captures(s) {
                Some(caps) => {
                    let addr = track!(SyslogAddr::from_url(&caps[1], &caps[2]))?;
                    Ok(Destination::Syslog(addr))
                }
                None => Ok(Destination::File(PathBuf::from(s))),
            },
        }
    }
}
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Destination::Stderr => f.write_str("<stderr>"),
            Destination::File(ref path) => write!(f, "{}", path.display()),
            Destination::Syslog(ref addr) => write!(f, "{}", addr),
        }
    }
}
impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// The address of a syslog daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyslogAddr {
    /// The platform's local syslog socket.
    Local,

    /// A unix domain socket at the given path.
    Unix(PathBuf),

    /// A daemon reached over UDP, as `host:port`.
    Udp(String),

    /// A daemon reached over TCP, as `host:port`.
    Tcp(String),
}
impl SyslogAddr {
    fn from_url(scheme: &str, rest: &str) -> Result<Self> {
        match &*scheme.to_ascii_lowercase() {
            "udp" => Ok(SyslogAddr::Udp(track!(host_and_port(rest))?)),
            "tcp" => Ok(SyslogAddr::Tcp(track!(host_and_port(rest))?)),
            "unix" => {
                track_assert!(!rest.is_empty(), ErrorKind::Invalid, "Missing socket path");
                Ok(SyslogAddr::Unix(PathBuf::from(rest)))
            }
            _ => track_panic!(ErrorKind::Invalid, "Unsupported syslog scheme: {:?}", scheme),
        }
    }
}
impl fmt::Display for SyslogAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SyslogAddr::Local => f.write_str("<syslog>"),
            SyslogAddr::Unix(ref path) => write!(f, "unix://{}", path.display()),
            SyslogAddr::Udp(ref host) => write!(f, "udp://{}", host),
            SyslogAddr::Tcp(ref host) => write!(f, "tcp://{}", host),
        }
    }
}

fn host_and_port(rest: &str) -> Result<String> {
    let host = rest.trim_end_matches('/');
    track_assert!(!host.is_empty(), ErrorKind::Invalid, "Missing syslog host");
    track_assert!(!host.contains('/'), ErrorKind::Invalid, "Unexpected path: {:?}", rest);

    let has_port = if host.starts_with('[') {
        // IPv6 literal: `[::1]` or `[::1]:514`
        !host.ends_with(']')
    } else {
        host.contains(':')
    };
    if has_port {
        Ok(host.to_owned())
    } else {
        Ok(format!("{}:{}", host, DEFAULT_SYSLOG_PORT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Destination {
        s.parse().unwrap()
    }

    #[test]
    fn stderr_and_local_syslog() {
        assert_eq!(parse(""), Destination::Stderr);
        assert_eq!(parse("<stderr>"), Destination::Stderr);
        assert_eq!(parse("<syslog>"), Destination::Syslog(SyslogAddr::Local));
    }

    #[test]
    fn network_daemons() {
        assert_eq!(
            parse("udp://10.0.0.1:1514"),
            Destination::Syslog(SyslogAddr::Udp("10.0.0.1:1514".to_owned()))
        );
        assert_eq!(
            parse("TCP://loghost"),
            Destination::Syslog(SyslogAddr::Tcp("loghost:514".to_owned()))
        );
        assert_eq!(
            parse("udp://[::1]"),
            Destination::Syslog(SyslogAddr::Udp("[::1]:514".to_owned()))
        );
        assert_eq!(
            parse("unix:///dev/log"),
            Destination::Syslog(SyslogAddr::Unix(PathBuf::from("/dev/log")))
        );
    }

    #[test]
    fn files() {
        assert_eq!(
            parse("/var/log/app.log"),
            Destination::File(PathBuf::from("/var/log/app.log"))
        );
        assert_eq!(parse("app.log"), Destination::File(PathBuf::from("app.log")));
    }

    #[test]
    fn invalid_urls() {
        for s in &["http://example.com", "udp://", "tcp://host/path", "unix://"] {
            let e = s.parse::<Destination>().unwrap_err();
            assert_eq!(*e.kind(), ErrorKind::Invalid, "{:?}", s);
        }
    }

    #[test]
    fn display_parses_back() {
        for s in &["<stderr>", "<syslog>", "udp://loghost:514", "unix:///dev/log", "x.log"] {
            assert_eq!(parse(s).to_string(), *s);
        }
    }
}
