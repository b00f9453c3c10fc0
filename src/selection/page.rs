use super::grid::{Dirty, Highlight, SelectionGrid};
use crate::calendar::{CalendarMonth, MonthExt, MonthKey};
use crate::theme::{Painter, TextStyler};
use std::rc::Rc;

static WEEK_ROW: &str = "Su Mo Tu We Th Fr Sa";

/// Number of lines taken up by the month title and the weekday names
const HEADER_LINES: usize = 2;

/// One month's header plus its selection grid
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthPage {
    month: Rc<CalendarMonth>,
    grid: SelectionGrid,
    title: String,
    title_pad: usize,
}

impl MonthPage {
    pub(crate) fn build(month: Rc<CalendarMonth>) -> MonthPage {
        let grid = SelectionGrid::build(month.rows());
        let key = month.key();
        let title = format!("{} {}", key.month().name(), key.year());
        let title_pad = WEEK_ROW.len().saturating_sub(title.len()) / 2;
        MonthPage {
            month,
            grid,
            title,
            title_pad,
        }
    }

    pub(crate) fn key(&self) -> MonthKey {
        self.month.key()
    }

    pub(crate) fn month(&self) -> &CalendarMonth {
        &self.month
    }

    pub(crate) fn grid(&self) -> &SelectionGrid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut SelectionGrid {
        &mut self.grid
    }

    /// Number of lines a full render of the page occupies
    pub(crate) fn line_count(&self) -> usize {
        HEADER_LINES + self.grid.height()
    }

    /// All lines of the page: the header followed by every grid row
    pub(crate) fn lines<S: TextStyler>(&self, painter: &Painter<S>) -> Vec<String> {
        let mut lines = self.header_lines(painter);
        lines.extend(self.grid.render_lines(0, painter));
        lines
    }

    pub(crate) fn render<S: TextStyler>(&self, painter: &Painter<S>) -> String {
        self.lines(painter).join("\n")
    }

    /// The lines that changed since the grid's redraw bookkeeping was last
    /// reset.  These are always the bottommost lines of the page.
    pub(crate) fn redraw_lines<S: TextStyler>(&self, painter: &Painter<S>) -> Vec<String> {
        match self.grid.dirty() {
            Dirty::Everything => self.lines(painter),
            Dirty::FromRow(_) | Dirty::Clean => self.grid.redraw_lines(painter),
        }
    }

    fn header_lines<S: TextStyler>(&self, painter: &Painter<S>) -> Vec<String> {
        let title = if self.grid.highlight() == Some(Highlight::Header) {
            painter.highlight(&self.title)
        } else {
            self.title.clone()
        };
        vec![
            format!("{}{title}", " ".repeat(self.title_pad)),
            String::from(WEEK_ROW),
        ]
    }
}
