// Reference Zone - fixed UTC offset used for every local calendar boundary

use super::error::DomainError;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offset of Asia/Dhaka (no DST)
pub const DHAKA_OFFSET_SECONDS: i32 = 6 * 3600;

/// Zone name accepted as an alias for `+06:00`
pub const DHAKA_ZONE_NAME: &str = "Asia/Dhaka";

/// Fixed-offset timezone in which "local" midnights, weeks and months are evaluated
///
/// A fixed offset means every local day is exactly 24h long; the calculator
/// relies on that when it derives hour, week and sub-day windows from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ReferenceZone {
    offset: FixedOffset,
}

impl ReferenceZone {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// UTC+06:00, the default reference zone
    pub fn dhaka() -> Self {
        Self::from_offset_seconds(DHAKA_OFFSET_SECONDS).unwrap_or_else(|_| Self::utc())
    }

    pub fn from_offset_seconds(seconds: i32) -> Result<Self, DomainError> {
        FixedOffset::east_opt(seconds)
            .map(|offset| Self { offset })
            .ok_or_else(|| DomainError::InvalidOffset(format!("{} seconds", seconds)))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn offset_seconds(&self) -> i32 {
        self.offset.local_minus_utc()
    }

    fn offset_ms(&self) -> i64 {
        self.offset_seconds() as i64 * 1000
    }

    /// Wall-clock view of an instant in this zone
    ///
    /// Saturates at chrono's bounds when the shifted view would leave them
    /// (e.g. the last representable UTC instant seen from a positive offset).
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        let offset = self.offset_seconds();
        instant
            .naive_utc()
            .checked_add_signed(Duration::seconds(offset as i64))
            .unwrap_or(if offset > 0 {
                NaiveDateTime::MAX
            } else {
                NaiveDateTime::MIN
            })
    }

    /// Epoch milliseconds of local midnight at the start of `date`
    pub fn midnight_ms(&self, date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() - self.offset_ms()
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::dhaka()
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset)
    }
}

impl FromStr for ReferenceZone {
    type Err = DomainError;

    /// Accepts `Z`, `UTC`, `Asia/Dhaka`, `+06`, `+0600` and `+06:00` forms
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "Z" | "UTC" => return Ok(Self::utc()),
            DHAKA_ZONE_NAME => return Ok(Self::dhaka()),
            _ => {}
        }

        let invalid = || DomainError::InvalidOffset(s.to_string());

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };

        if !rest.is_ascii() {
            return Err(invalid());
        }

        // HH, HHMM or HH:MM
        let digits = match (rest.len(), rest.as_bytes().get(2)) {
            (5, Some(b':')) => format!("{}{}", &rest[..2], &rest[3..]),
            (2, _) | (4, _) => rest.to_string(),
            _ => return Err(invalid()),
        };
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (hours, minutes) = match digits.len() {
            2 => (digits.parse::<i32>().map_err(|_| invalid())?, 0),
            4 => (
                digits[..2].parse::<i32>().map_err(|_| invalid())?,
                digits[2..].parse::<i32>().map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };

        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Self::from_offset_seconds(sign * (hours * 3600 + minutes * 60))
    }
}

impl From<ReferenceZone> for String {
    fn from(zone: ReferenceZone) -> Self {
        zone.to_string()
    }
}

impl TryFrom<String> for ReferenceZone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_dhaka_is_utc_plus_six() {
        assert_eq!(ReferenceZone::dhaka().offset_seconds(), 6 * 3600);
        assert_eq!(ReferenceZone::default(), ReferenceZone::dhaka());
        assert_eq!(ReferenceZone::dhaka().to_string(), "+06:00");
    }

    #[test]
    fn test_parse_offset_forms() {
        assert_eq!("+06:00".parse::<ReferenceZone>().unwrap().offset_seconds(), 21_600);
        assert_eq!("+0600".parse::<ReferenceZone>().unwrap().offset_seconds(), 21_600);
        assert_eq!("+06".parse::<ReferenceZone>().unwrap().offset_seconds(), 21_600);
        assert_eq!("-05:30".parse::<ReferenceZone>().unwrap().offset_seconds(), -19_800);
        assert_eq!("Z".parse::<ReferenceZone>().unwrap(), ReferenceZone::utc());
        assert_eq!("Asia/Dhaka".parse::<ReferenceZone>().unwrap(), ReferenceZone::dhaka());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("06:00".parse::<ReferenceZone>().is_err());
        assert!("+25:00".parse::<ReferenceZone>().is_err());
        assert!("+06:75".parse::<ReferenceZone>().is_err());
        assert!("+6".parse::<ReferenceZone>().is_err());
        assert!("Europe/Paris".parse::<ReferenceZone>().is_err());
        assert!("".parse::<ReferenceZone>().is_err());
    }

    #[test]
    fn test_parse_accepts_colon_only_between_hours_and_minutes() {
        assert!("+0:600".parse::<ReferenceZone>().is_err());
        assert!("+06:".parse::<ReferenceZone>().is_err());
        assert!("+06:0".parse::<ReferenceZone>().is_err());
        assert!("+0600:".parse::<ReferenceZone>().is_err());
        assert!("+:0600".parse::<ReferenceZone>().is_err());
        assert!("+06::00".parse::<ReferenceZone>().is_err());
        assert!("+06:00".parse::<ReferenceZone>().is_ok());
    }

    #[test]
    fn test_local_view_shifts_wall_clock() {
        let zone = ReferenceZone::dhaka();
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 18, 30, 0).unwrap();

        let local = zone.local(instant);
        assert_eq!(local.hour(), 0);
        assert_eq!(local.minute(), 30);
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_local_view_saturates_at_chrono_bounds() {
        let east = ReferenceZone::dhaka();
        let west: ReferenceZone = "-05:30".parse().unwrap();

        assert_eq!(east.local(DateTime::<Utc>::MAX_UTC), NaiveDateTime::MAX);
        assert_eq!(west.local(DateTime::<Utc>::MIN_UTC), NaiveDateTime::MIN);

        // The mirrored cases stay in range and shift normally
        let shifted = west.local(DateTime::<Utc>::MAX_UTC);
        assert_eq!(
            shifted + Duration::minutes(330),
            DateTime::<Utc>::MAX_UTC.naive_utc()
        );
        assert_eq!(
            east.local(DateTime::<Utc>::MIN_UTC),
            DateTime::<Utc>::MIN_UTC.naive_utc() + Duration::hours(6)
        );
    }

    #[test]
    fn test_midnight_ms_accounts_for_offset() {
        let zone = ReferenceZone::dhaka();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        // 2024-01-01T00:00+06:00 == 2023-12-31T18:00Z
        let expected = Utc.with_ymd_and_hms(2023, 12, 31, 18, 0, 0).unwrap();
        assert_eq!(zone.midnight_ms(date), expected.timestamp_millis());
    }

    #[test]
    fn test_serde_as_offset_string() {
        let json = serde_json::to_string(&ReferenceZone::dhaka()).unwrap();
        assert_eq!(json, "\"+06:00\"");

        let zone: ReferenceZone = serde_json::from_str("\"-03:00\"").unwrap();
        assert_eq!(zone.offset_seconds(), -3 * 3600);
    }
}
