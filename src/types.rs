//! Commonly used types.
use crate::{Error, ErrorKind};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The severity of a log message.
///
/// Variants are ordered from the most severe (`Emergency`, numerically 0) to the
/// least severe (`Debug`, numerically 7), so `Severity::Emergency < Severity::Debug`.
///
/// # Examples
///
/// The default value:
///
/// ```
/// use flog::types::Severity;
///
/// assert_eq!(Severity::default(), Severity::Info);
/// ```
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(rename = "emerg")]
    Emergency = 0,
    Alert = 1,
    #[serde(rename = "crit")]
    Critical = 2,
    #[serde(rename = "err")]
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}
impl Severity {
    /// Every severity, from the most severe to the least severe.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Returns the numeric code of this severity (0-7).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Makes a `Severity` from the low three bits of `bits`.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => Severity::Emergency,
            1 => Severity::Alert,
            2 => Severity::Critical,
            3 => Severity::Error,
            4 => Severity::Warning,
            5 => Severity::Notice,
            6 => Severity::Info,
            _ => Severity::Debug,
        }
    }

    /// Returns `true` if `self` is at least as severe as `threshold`,
    /// that is, numerically lower or equal.
    ///
    /// ```
    /// use flog::types::Severity;
    ///
    /// assert!(Severity::Error.is_at_least(Severity::Warning));
    /// assert!(Severity::Warning.is_at_least(Severity::Warning));
    /// assert!(!Severity::Debug.is_at_least(Severity::Info));
    /// ```
    pub fn is_at_least(self, threshold: Severity) -> bool {
        self <= threshold
    }

    /// Gets the lowercase name of this severity.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Emergency => "emerg",
            Severity::Alert => "alert",
            Severity::Critical => "crit",
            Severity::Error => "err",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}
impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}
impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
impl FromStr for Severity {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match &*s.to_ascii_lowercase() {
            "emerg" => Ok(Severity::Emergency),
            "alert" => Ok(Severity::Alert),
            "crit" => Ok(Severity::Critical),
            "err" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => track_panic!(ErrorKind::Invalid, "Undefined severity: {:?}", s),
        }
    }
}

/// Time Zone.
///
/// # Examples
///
/// The default value:
///
/// ```
/// use flog::types::TimeZone;
///
/// assert_eq!(TimeZone::default(), TimeZone::Local);
/// ```
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZone {
    Utc,
    Local,
}
impl TimeZone {
    /// Formats the current time as a syslog timestamp (`Jan _2 15:04:05`).
    pub fn timestamp(self) -> String {
        const FORMAT: &str = "%b %e %H:%M:%S";
        match self {
            TimeZone::Utc => Utc::now().format(FORMAT).to_string(),
            TimeZone::Local => Local::now().format(FORMAT).to_string(),
        }
    }
}
impl Default for TimeZone {
    fn default() -> Self {
        TimeZone::Local
    }
}
impl FromStr for TimeZone {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "utc" => Ok(TimeZone::Utc),
            "local" => Ok(TimeZone::Local),
            _ => track_panic!(ErrorKind::Invalid, "Undefined time zone: {:?}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_order_follows_codes() {
        for pair in Severity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].code() + 1, pair[1].code());
        }
        assert_eq!(Severity::Emergency.code(), 0);
        assert_eq!(Severity::Debug.code(), 7);
    }

    #[test]
    fn severity_from_bits_ignores_facility() {
        for s in Severity::ALL.iter() {
            assert_eq!(Severity::from_bits(s.code()), *s);
            assert_eq!(Severity::from_bits((16 << 3) | s.code()), *s);
        }
    }

    #[test]
    fn severity_from_str() {
        assert_eq!("notice".parse::<Severity>().unwrap(), Severity::Notice);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        for s in &["verbose", "emergency", "critical", "error", "warn"] {
            let e = s.parse::<Severity>().unwrap_err();
            assert_eq!(*e.kind(), ErrorKind::Invalid, "{:?}", s);
        }
    }

    #[test]
    fn timestamp_has_stamp_layout() {
        let ts = TimeZone::Utc.timestamp();
        // "Jan _2 15:04:05"
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[3..4], " ");
        assert_eq!(&ts[9..10], ":");
        assert_eq!(&ts[12..13], ":");
    }
}
