use super::cell::DateBearing;
use super::page::MonthPage;
use crate::calendar::{MonthCache, MonthKey};
use std::collections::HashMap;
use time::Date;

/// Handle to a page stored in a [`PageCache`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct PageId(usize);

/// The pages visited during a session, in the order they were first visited.
/// Pages are never evicted, so selections survive paging away and back.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct PageCache {
    pages: Vec<MonthPage>,
    index: HashMap<MonthKey, PageId>,
}

impl PageCache {
    pub(crate) fn new() -> PageCache {
        PageCache::default()
    }

    pub(crate) fn fetch_or_build(&mut self, key: MonthKey, months: &mut MonthCache) -> PageId {
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let page = MonthPage::build(months.fetch(key));
        tracing::debug!(
            month = %key,
            start = %page.month().start(),
            end = %page.month().end(),
            "caching new month page"
        );
        let id = PageId(self.pages.len());
        self.pages.push(page);
        self.index.insert(key, id);
        id
    }

    pub(crate) fn page(&self, id: PageId) -> &MonthPage {
        &self.pages[id.0]
    }

    pub(crate) fn page_mut(&mut self, id: PageId) -> &mut MonthPage {
        &mut self.pages[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.pages.len()
    }

    /// Every selected date on every page: pages in the order they were
    /// cached, dates in row-major order within a page
    pub(crate) fn selected_dates(&self) -> Vec<Date> {
        self.pages
            .iter()
            .flat_map(|page| page.grid().selected_cells())
            .filter_map(DateBearing::date)
            .collect()
    }
}
