// Tracker Settings - explicit inputs to the calculator (no module-level globals)

use super::error::{DomainError, Result};
use super::subday::SubDayLayout;
use super::zone::ReferenceZone;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIFE_EXPECTANCY_YEARS: f64 = 120.0;

/// Default birth date (interpreted at local midnight in the reference zone)
pub const DEFAULT_BIRTH_DATE: (i32, u32, u32) = (1997, 5, 5);

/// Birth instant, life expectancy and reference zone for one tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSettings {
    pub birth: DateTime<Utc>,
    pub life_expectancy_years: f64,
    pub zone: ReferenceZone,
    #[serde(default)]
    pub layout: SubDayLayout,
}

impl TrackerSettings {
    /// Create validated settings
    ///
    /// # Errors
    /// `InvalidLifeExpectancy` if the expectancy is not a finite positive number
    pub fn new(
        birth: DateTime<Utc>,
        life_expectancy_years: f64,
        zone: ReferenceZone,
        layout: SubDayLayout,
    ) -> Result<Self> {
        if !life_expectancy_years.is_finite() || life_expectancy_years <= 0.0 {
            return Err(DomainError::InvalidLifeExpectancy(life_expectancy_years));
        }

        Ok(Self {
            birth,
            life_expectancy_years,
            zone,
            layout,
        })
    }

    /// Settings whose birth instant is local midnight of `birth_date` in `zone`
    pub fn from_birth_date(
        birth_date: NaiveDate,
        life_expectancy_years: f64,
        zone: ReferenceZone,
        layout: SubDayLayout,
    ) -> Result<Self> {
        let birth = birth_from_date(birth_date, zone)?;
        Self::new(birth, life_expectancy_years, zone, layout)
    }

    pub fn birth_ms(&self) -> i64 {
        self.birth.timestamp_millis()
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        let zone = ReferenceZone::dhaka();
        let (year, month, day) = DEFAULT_BIRTH_DATE;
        let birth = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| birth_from_date(date, zone).ok())
            .unwrap_or_default();

        Self {
            birth,
            life_expectancy_years: DEFAULT_LIFE_EXPECTANCY_YEARS,
            zone,
            layout: SubDayLayout::default(),
        }
    }
}

/// Instant of local midnight at the start of `date` in `zone`
pub fn birth_from_date(date: NaiveDate, zone: ReferenceZone) -> Result<DateTime<Utc>> {
    let millis = zone.midnight_ms(date);
    DateTime::from_timestamp_millis(millis).ok_or(DomainError::InstantOutOfRange(millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_settings() {
        let settings = TrackerSettings::default();

        assert_eq!(settings.life_expectancy_years, 120.0);
        assert_eq!(settings.zone, ReferenceZone::dhaka());
        assert_eq!(settings.layout, SubDayLayout::Phased);
        // 1997-05-05T00:00+06:00
        assert_eq!(
            settings.birth,
            Utc.with_ymd_and_hms(1997, 5, 4, 18, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rejects_non_positive_expectancy() {
        let birth = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        let zone = ReferenceZone::utc();

        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = TrackerSettings::new(birth, bad, zone, SubDayLayout::Phased);
            assert!(matches!(result, Err(DomainError::InvalidLifeExpectancy(_))));
        }
    }

    #[test]
    fn test_birth_from_date_uses_zone_midnight() {
        let date = NaiveDate::from_ymd_opt(2000, 2, 29).unwrap();

        let utc_birth = birth_from_date(date, ReferenceZone::utc()).unwrap();
        assert_eq!(utc_birth, Utc.with_ymd_and_hms(2000, 2, 29, 0, 0, 0).unwrap());

        let dhaka_birth = birth_from_date(date, ReferenceZone::dhaka()).unwrap();
        assert_eq!(dhaka_birth, Utc.with_ymd_and_hms(2000, 2, 28, 18, 0, 0).unwrap());
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let settings = TrackerSettings::default();
        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(json["zone"], "+06:00");
        assert_eq!(json["layout"], "phased");

        let back: TrackerSettings = serde_json::from_value(json).unwrap();
        assert_eq!(back, settings);
    }
}
