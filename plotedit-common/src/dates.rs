//! Conversion between plot date numbers and calendar dates.
//!
//! Date-typed axes store their limits as floating point days since the
//! Unix epoch; the editor presents them as UTC datetimes.

use crate::error::CommonError;
use chrono::{DateTime, Utc};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Convert a date number (days since 1970-01-01) to a UTC datetime,
/// rounded to the nearest microsecond
pub fn num2date(value: f64) -> Result<DateTime<Utc>, CommonError> {
    let micros = (value * MICROS_PER_DAY).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(CommonError::DateOutOfRange(value));
    }
    DateTime::from_timestamp_micros(micros as i64).ok_or(CommonError::DateOutOfRange(value))
}

/// Convert a UTC datetime to a date number (days since 1970-01-01)
pub fn date2num(date: &DateTime<Utc>) -> f64 {
    date.timestamp_micros() as f64 / MICROS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_epoch() {
        let epoch = num2date(0.0).unwrap();
        assert_eq!(epoch, Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(date2num(&epoch), 0.0);
    }

    #[test]
    fn test_fractional_days() {
        let date = num2date(19_000.25).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2022, 1, 8, 6, 0, 0).unwrap());
        assert_approx_eq!(f64, date2num(&date), 19_000.25);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            num2date(f64::INFINITY),
            Err(CommonError::DateOutOfRange(f64::INFINITY))
        );
        assert!(num2date(1e300).is_err());
    }
}
