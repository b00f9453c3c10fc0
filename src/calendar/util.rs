use std::iter::successors;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Column of the weekday in a Sunday-first week
    fn index0(&self) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> usize {
        self.number_days_from_sunday().into()
    }
}

pub(crate) trait MonthExt {
    fn name(&self) -> &'static str;
}

impl MonthExt for Month {
    fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

/// Iterates over `date` and every following day of the same month
pub(super) fn iter_days_of_month(date: Date) -> impl Iterator<Item = Date> {
    let month = date.month();
    successors(Some(date), |&d| d.next_day()).take_while(move |d| d.month() == month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_iter_days_of_month() {
        let days = iter_days_of_month(date!(2024 - 02 - 01)).collect::<Vec<_>>();
        assert_eq!(days.len(), 29);
        assert_eq!(days.last(), Some(&date!(2024 - 02 - 29)));
    }

    #[test]
    fn test_iter_days_of_month_at_end_of_time() {
        let days = iter_days_of_month(date!(9999 - 12 - 01)).collect::<Vec<_>>();
        assert_eq!(days.len(), 31);
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(Weekday::Sunday.index0(), 0);
        assert_eq!(Weekday::Saturday.index0(), 6);
    }
}
