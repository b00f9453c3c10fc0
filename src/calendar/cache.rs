use super::{CalendarMonth, MonthKey};
use std::collections::HashMap;
use std::rc::Rc;

/// Lazily built, never evicted store of [`CalendarMonth`]s.  Fetching the
/// same key twice returns the same allocation.
#[derive(Clone, Debug, Default)]
pub(crate) struct MonthCache {
    months: HashMap<MonthKey, Rc<CalendarMonth>>,
}

impl MonthCache {
    pub(crate) fn new() -> MonthCache {
        MonthCache::default()
    }

    pub(crate) fn fetch(&mut self, key: MonthKey) -> Rc<CalendarMonth> {
        Rc::clone(self.months.entry(key).or_insert_with(|| {
            tracing::trace!(month = %key, "building calendar month");
            Rc::new(CalendarMonth::new(key))
        }))
    }

    pub(crate) fn len(&self) -> usize {
        self.months.len()
    }
}
