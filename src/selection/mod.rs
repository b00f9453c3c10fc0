mod cell;
mod grid;
mod page;
mod pages;
mod selector;
pub(crate) use self::grid::GridError;
pub(crate) use self::page::MonthPage;
pub(crate) use self::pages::{PageCache, PageId};
pub(crate) use self::selector::{Direction, Edge, Motion, Selector, Wrap};
