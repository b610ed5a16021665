use crate::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::result::Result as StdResult;
use std::str::FromStr;

/// A syslog facility.
///
/// The discriminant is the facility code; the value carried in an encoded
/// [`Priority`](crate::Priority) is that code shifted left by three bits.
/// Codes 12 to 15 are unassigned and have no variant.
#[allow(missing_docs)]
#[repr(u8)]
#[derive(Default, Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    /// Kernel messages.
    Kern = 0,
    #[default]
    User = 1,
    Mail = 2,
    Daemon = 3,
    Auth = 4,

    /// Messages generated internally by syslogd.
    Syslog = 5,

    Lpr = 6,
    News = 7,
    Uucp = 8,

    /// Periodic task scheduling daemons like `cron`.
    Cron = 9,

    /// Log messages containing sensitive information.
    AuthPriv = 10,

    Ftp = 11,
    Local0 = 16,
    Local1 = 17,
    Local2 = 18,
    Local3 = 19,
    Local4 = 20,
    Local5 = 21,
    Local6 = 22,
    Local7 = 23,
}

impl Facility {
    /// Every defined facility, in code order.
    pub const ALL: [Facility; 20] = [
        Facility::Kern,
        Facility::User,
        Facility::Mail,
        Facility::Daemon,
        Facility::Auth,
        Facility::Syslog,
        Facility::Lpr,
        Facility::News,
        Facility::Uucp,
        Facility::Cron,
        Facility::AuthPriv,
        Facility::Ftp,
        Facility::Local0,
        Facility::Local1,
        Facility::Local2,
        Facility::Local3,
        Facility::Local4,
        Facility::Local5,
        Facility::Local6,
        Facility::Local7,
    ];

    /// Returns the facility code (0-11, 16-23).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the facility as it appears in an encoded priority (`code << 3`).
    pub const fn bits(self) -> u8 {
        (self as u8) << 3
    }

    /// Gets the name of this `Facility`, in lowercase.
    ///
    /// The `FromStr` implementation accepts the same names, but it is
    /// case-insensitive.
    pub fn name(self) -> &'static str {
        match self {
            Facility::Kern => "kern",
            Facility::User => "user",
            Facility::Mail => "mail",
            Facility::Daemon => "daemon",
            Facility::Auth => "auth",
            Facility::Syslog => "syslog",
            Facility::Lpr => "lpr",
            Facility::News => "news",
            Facility::Uucp => "uucp",
            Facility::Cron => "cron",
            Facility::AuthPriv => "authpriv",
            Facility::Ftp => "ftp",
            Facility::Local0 => "local0",
            Facility::Local1 => "local1",
            Facility::Local2 => "local2",
            Facility::Local3 => "local3",
            Facility::Local4 => "local4",
            Facility::Local5 => "local5",
            Facility::Local6 => "local6",
            Facility::Local7 => "local7",
        }
    }

    pub(crate) fn to_syslog(self) -> syslog::Facility {
        match self {
            Facility::Kern => syslog::Facility::LOG_KERN,
            Facility::User => syslog::Facility::LOG_USER,
            Facility::Mail => syslog::Facility::LOG_MAIL,
            Facility::Daemon => syslog::Facility::LOG_DAEMON,
            Facility::Auth => syslog::Facility::LOG_AUTH,
            Facility::Syslog => syslog::Facility::LOG_SYSLOG,
            Facility::Lpr => syslog::Facility::LOG_LPR,
            Facility::News => syslog::Facility::LOG_NEWS,
            Facility::Uucp => syslog::Facility::LOG_UUCP,
            Facility::Cron => syslog::Facility::LOG_CRON,
            Facility::AuthPriv => syslog::Facility::LOG_AUTHPRIV,
            Facility::Ftp => syslog::Facility::LOG_FTP,
            Facility::Local0 => syslog::Facility::LOG_LOCAL0,
            Facility::Local1 => syslog::Facility::LOG_LOCAL1,
            Facility::Local2 => syslog::Facility::LOG_LOCAL2,
            Facility::Local3 => syslog::Facility::LOG_LOCAL3,
            Facility::Local4 => syslog::Facility::LOG_LOCAL4,
            Facility::Local5 => syslog::Facility::LOG_LOCAL5,
            Facility::Local6 => syslog::Facility::LOG_LOCAL6,
            Facility::Local7 => syslog::Facility::LOG_LOCAL7,
        }
    }
}

impl Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facility {
    type Err = Error;

    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        let name = s.to_ascii_lowercase();
        match Facility::ALL.iter().find(|f| f.name() == name) {
            Some(f) => Ok(*f),
            None => track_panic!(ErrorKind::Invalid, "Undefined facility: {:?}", s),
        }
    }
}

impl TryFrom<u8> for Facility {
    type Error = Error;

    /// Converts a facility code (not the shifted bits) into a `Facility`.
    ///
    /// Unassigned codes are rejected rather than mapped to a neighbour.
    fn try_from(code: u8) -> StdResult<Self, Self::Error> {
        match Facility::ALL.iter().find(|f| f.code() == code) {
            Some(f) => Ok(*f),
            None => track_panic!(ErrorKind::Invalid, "Unassigned facility code: {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_from_str() {
        assert_eq!(Facility::from_str("daemon").unwrap(), Facility::Daemon);
        assert_eq!(Facility::from_str("LOCAL3").unwrap(), Facility::Local3);
        assert_eq!(Facility::from_str("AuthPriv").unwrap(), Facility::AuthPriv);

        let e = Facility::from_str("foobar").unwrap_err();
        assert_eq!(*e.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn names_round_trip() {
        for f in Facility::ALL.iter() {
            assert_eq!(f.name().parse::<Facility>().unwrap(), *f);
            assert_eq!(f.to_string(), f.name());
        }
    }

    #[test]
    fn codes_are_shifted_into_high_bits() {
        assert_eq!(Facility::Kern.bits(), 0);
        assert_eq!(Facility::User.bits(), 8);
        assert_eq!(Facility::Local0.bits(), 128);
        assert_eq!(Facility::Local7.bits(), 184);
        for f in Facility::ALL.iter() {
            assert_eq!(f.bits() & 0x07, 0);
        }
    }

    #[test]
    fn unassigned_codes_are_rejected() {
        for code in 12..16 {
            let e = Facility::try_from(code).unwrap_err();
            assert_eq!(*e.kind(), ErrorKind::Invalid);
        }
        assert!(Facility::try_from(24).is_err());
        assert_eq!(Facility::try_from(11).unwrap(), Facility::Ftp);
        assert_eq!(Facility::try_from(16).unwrap(), Facility::Local0);
    }
}
