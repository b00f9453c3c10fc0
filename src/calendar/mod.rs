mod cache;
mod month;
mod util;
pub(crate) use self::cache::MonthCache;
pub(crate) use self::month::{CalendarMonth, WeekRow};
pub(crate) use self::util::{MonthExt, DAYS_IN_WEEK};
use std::fmt;
use thiserror::Error;
use time::{Date, Month};

/// Identifies one month of one year from [`MonthKey::FIRST_YEAR`] through
/// [`MonthKey::LAST_YEAR`]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct MonthKey {
    // Invariant: always the first day of the month
    first_day: Date,
}

impl MonthKey {
    pub(crate) const FIRST_YEAR: i32 = 1;
    pub(crate) const LAST_YEAR: i32 = 9999;

    pub(crate) fn new(year: i32, month: u8) -> Result<MonthKey, CalendarError> {
        let month = Month::try_from(month).map_err(|_| CalendarError::InvalidMonth(month))?;
        if !(MonthKey::FIRST_YEAR..=MonthKey::LAST_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }
        let first_day = Date::from_calendar_date(year, month, 1)?;
        Ok(MonthKey { first_day })
    }

    /// Returns `None` if `date` falls outside the supported years
    pub(crate) fn containing(date: Date) -> Option<MonthKey> {
        (MonthKey::FIRST_YEAR..=MonthKey::LAST_YEAR)
            .contains(&date.year())
            .then(|| MonthKey {
                first_day: date.replace_day(1).unwrap_or(date),
            })
    }

    pub(crate) fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first_day.month()
    }

    pub(crate) fn first_day(&self) -> Date {
        self.first_day
    }

    /// Returns `None` after December of [`MonthKey::LAST_YEAR`]
    pub(crate) fn next(&self) -> Option<MonthKey> {
        util::iter_days_of_month(self.first_day)
            .last()
            .and_then(Date::next_day)
            .and_then(MonthKey::containing)
    }

    /// Returns `None` before January of [`MonthKey::FIRST_YEAR`]
    pub(crate) fn previous(&self) -> Option<MonthKey> {
        self.first_day
            .previous_day()
            .and_then(MonthKey::containing)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month().name(), self.year())
    }
}

#[derive(Debug, Error)]
pub(crate) enum CalendarError {
    #[error("month number must be 1-12, got {0}")]
    InvalidMonth(u8),
    #[error("year {0} is outside the supported range 1-9999")]
    YearOutOfRange(i32),
    #[error("month is outside the supported range of dates")]
    Range(#[from] time::error::ComponentRange),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(matches!(
            MonthKey::new(2023, 0),
            Err(CalendarError::InvalidMonth(0))
        ));
        assert!(matches!(
            MonthKey::new(2023, 13),
            Err(CalendarError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_new_rejects_year_out_of_range() {
        assert!(matches!(
            MonthKey::new(12345, 1),
            Err(CalendarError::YearOutOfRange(12345))
        ));
        assert!(matches!(
            MonthKey::new(0, 6),
            Err(CalendarError::YearOutOfRange(0))
        ));
        assert!(MonthKey::new(1, 1).is_ok());
        assert!(MonthKey::new(9999, 12).is_ok());
    }

    #[test]
    fn test_next_across_year() {
        let key = MonthKey::new(2023, 12).unwrap();
        assert_eq!(key.next(), Some(MonthKey::new(2024, 1).unwrap()));
    }

    #[test]
    fn test_previous_across_year() {
        let key = MonthKey::new(2024, 1).unwrap();
        assert_eq!(key.previous(), Some(MonthKey::new(2023, 12).unwrap()));
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(MonthKey::new(9999, 12).unwrap().next(), None);
        assert_eq!(MonthKey::new(1, 1).unwrap().previous(), None);
        assert_eq!(
            MonthKey::new(1, 2).unwrap().previous(),
            Some(MonthKey::new(1, 1).unwrap())
        );
    }

    #[test]
    fn test_containing() {
        assert_eq!(MonthKey::containing(date!(0000 - 12 - 31)), None);
        let key = MonthKey::containing(date!(2023 - 06 - 17)).unwrap();
        assert_eq!(key.year(), 2023);
        assert_eq!(key.month(), Month::June);
        assert_eq!(key.first_day(), date!(2023 - 06 - 01));
    }

    #[test]
    fn test_display() {
        assert_eq!(MonthKey::new(2023, 6).unwrap().to_string(), "June 2023");
    }
}
