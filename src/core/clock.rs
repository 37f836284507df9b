//! Time sources for document timestamps

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Formats an instant as FHIR `instant`/`dateTime` text
///
/// Second precision, fractional part dropped, `+00:00` offset.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pgx_fhir::core::clock::format_instant;
///
/// let t = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 5).unwrap();
/// assert_eq!(format_instant(t), "2024-03-01T09:30:05+00:00");
/// ```
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}
