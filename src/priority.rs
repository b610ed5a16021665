//! Bit-packed syslog priorities.
use crate::facility::Facility;
use crate::types::Severity;
use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryFrom;
use std::fmt;
use std::ops::BitOr;
use std::result::Result as StdResult;
use std::str::FromStr;

/// Mask selecting the severity bits of an encoded priority.
pub const SEVERITY_MASK: u8 = 0x07;

/// Mask selecting the facility bits of an encoded priority.
pub const FACILITY_MASK: u8 = 0xf8;

/// A syslog priority: a facility and a severity packed into one byte.
///
/// The low three bits hold the severity and the remaining bits hold the
/// facility, so the value that appears between `<` and `>` on the wire is
/// `facility.bits() | severity.code()`.
///
/// # Examples
///
/// ```
/// use flog::{Facility, Priority, Severity};
///
/// let p = Facility::Local0 | Severity::Info;
/// assert_eq!(p.bits(), 134);
/// assert_eq!(p.to_string(), "local0:info");
/// assert_eq!("LOCAL0:INFO".parse::<Priority>().unwrap(), p);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Priority {
    facility: Facility,
    severity: Severity,
}
impl Priority {
    /// Makes a new `Priority`.
    pub const fn new(facility: Facility, severity: Severity) -> Self {
        Priority { facility, severity }
    }

    /// Decodes an encoded priority.
    ///
    /// Fails with `ErrorKind::Invalid` if the facility bits name an
    /// unassigned facility.
    pub fn from_bits(bits: u8) -> Result<Self> {
        let facility = track!(Facility::try_from((bits & FACILITY_MASK) >> 3))?;
        Ok(Priority::new(facility, Severity::from_bits(bits)))
    }

    /// Returns the encoded priority.
    pub const fn bits(self) -> u8 {
        self.facility.bits() | self.severity.code()
    }

    /// Returns the facility part.
    pub const fn facility(self) -> Facility {
        self.facility
    }

    /// Returns the severity part.
    pub const fn severity(self) -> Severity {
        self.severity
    }

    /// Returns a copy of this priority with the facility replaced.
    pub const fn with_facility(self, facility: Facility) -> Self {
        Priority::new(facility, self.severity)
    }

    /// Returns a copy of this priority with the severity replaced.
    pub const fn with_severity(self, severity: Severity) -> Self {
        Priority::new(self.facility, severity)
    }
}
impl Default for Priority {
    fn default() -> Self {
        Priority::new(Facility::default(), Severity::default())
    }
}
impl BitOr<Severity> for Facility {
    type Output = Priority;
    fn bitor(self, severity: Severity) -> Priority {
        Priority::new(self, severity)
    }
}
impl From<Severity> for Priority {
    /// A bare severity on the `local0` facility.
    fn from(severity: Severity) -> Self {
        Priority::new(Facility::Local0, severity)
    }
}
impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.facility, self.severity)
    }
}

/// Parses `"facility:severity"`, case-insensitively.
///
/// An empty facility means `local0` and an empty severity means `info`. A
/// string without a colon is taken as a bare severity, so `"debug"` is
/// `local0:debug` and `""` is `local0:info`.
impl FromStr for Priority {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let (facility, severity) = match s.find(':') {
            Some(i) => (&s[..i], &s[i + 1..]),
            None => ("", s),
        };
        let facility = if facility.is_empty() {
            Facility::Local0
        } else {
            track!(facility.parse::<Facility>())?
        };
        let severity = if severity.is_empty() {
            Severity::Info
        } else {
            track!(severity.parse::<Severity>())?
        };
        Ok(Priority::new(facility, severity))
    }
}
impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> StdResult<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> StdResult<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn parse(s: &str) -> Priority {
        s.parse().unwrap()
    }

    #[test]
    fn fields_are_packed_independently() {
        for f in Facility::ALL.iter() {
            for s in Severity::ALL.iter() {
                let p = *f | *s;
                assert_eq!(p.bits() & SEVERITY_MASK, s.code());
                assert_eq!(p.bits() & FACILITY_MASK, f.bits());
                assert_eq!(Priority::from_bits(p.bits()).unwrap(), p);
            }
        }
    }

    #[test]
    fn lowest_encoding_is_a_valid_priority() {
        let p = parse("kern:emerg");
        assert_eq!(p.bits(), 0);
        assert_eq!(Priority::from_bits(0).unwrap(), p);
    }

    #[test]
    fn unassigned_facility_bits_are_rejected() {
        let e = Priority::from_bits((12 << 3) | 6).unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::Invalid);
        assert!(Priority::from_bits((15 << 3) | 1).is_err());
        assert!(Priority::from_bits(24 << 3).is_err());
    }

    #[test]
    fn parse_defaults() {
        assert_eq!(parse("local0:notice"), Facility::Local0 | Severity::Notice);
        assert_eq!(parse("Mail:Crit"), Facility::Mail | Severity::Critical);
        assert_eq!(parse(":debug"), Facility::Local0 | Severity::Debug);
        assert_eq!(parse("daemon:"), Facility::Daemon | Severity::Info);
        assert_eq!(parse(":"), Facility::Local0 | Severity::Info);
        assert_eq!(parse(""), Facility::Local0 | Severity::Info);
        assert_eq!(parse("warning"), Facility::Local0 | Severity::Warning);
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        for s in &["bogus:info", "local0:bogus", "local8", "user:info:extra", "local0 :info"] {
            let e = s.parse::<Priority>().unwrap_err();
            assert_eq!(*e.kind(), ErrorKind::Invalid, "{:?}", s);
        }
    }

    #[test]
    fn display_parses_back() {
        let p = Facility::AuthPriv | Severity::Alert;
        assert_eq!(p.to_string(), "authpriv:alert");
        assert_eq!(parse(&p.to_string()), p);
    }

    #[test]
    fn with_parts() {
        let p = Facility::Local0 | Severity::Info;
        assert_eq!(p.with_severity(Severity::Debug).bits(), 135);
        assert_eq!(p.with_facility(Facility::User).bits(), 14);
    }
}
