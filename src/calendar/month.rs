use super::util::{iter_days_of_month, WeekdayExt, DAYS_IN_WEEK};
use super::MonthKey;
use time::Date;

/// One week of a month, Sunday first.  Days belonging to neighboring months
/// are `None`.
pub(crate) type WeekRow = [Option<Date>; DAYS_IN_WEEK];

/// The days of one month laid out in Sunday-first week rows
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarMonth {
    key: MonthKey,
    end: Date,
    rows: Vec<WeekRow>,
}

impl CalendarMonth {
    pub(crate) fn new(key: MonthKey) -> CalendarMonth {
        let mut rows = Vec::with_capacity(6);
        let mut current: WeekRow = [None; DAYS_IN_WEEK];
        let mut end = key.first_day();
        for date in iter_days_of_month(key.first_day()) {
            let i = date.weekday().index0();
            if i == 0 && current.iter().any(Option::is_some) {
                rows.push(std::mem::replace(&mut current, [None; DAYS_IN_WEEK]));
            }
            current[i] = Some(date);
            end = date;
        }
        rows.push(current);
        CalendarMonth { key, end, rows }
    }

    pub(crate) fn key(&self) -> MonthKey {
        self.key
    }

    pub(crate) fn start(&self) -> Date {
        self.key.first_day()
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn rows(&self) -> &[WeekRow] {
        &self.rows
    }
}
