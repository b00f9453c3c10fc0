use super::cell::{Cell, Renderable};
use crate::calendar::{WeekRow, DAYS_IN_WEEK};
use crate::theme::{Painter, TextStyler};
use thiserror::Error;

/// Which lines of a page have to be repainted
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dirty {
    /// The header and every row
    Everything,
    /// The given row and every row below it
    FromRow(usize),
    /// Nothing changed
    Clean,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Highlight {
    Header,
    Cell { x: usize, y: usize },
}

/// A rectangle of cells built from the week rows of a month, together with
/// the bookkeeping that tells a [`MonthPage`](super::MonthPage) what to
/// repaint.  The bookkeeping is written by the
/// [`Selector`](super::Selector) and read by the page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SelectionGrid {
    rows: Vec<[Cell; DAYS_IN_WEEK]>,
    dirty: Dirty,
    highlight: Option<Highlight>,
}

impl SelectionGrid {
    pub(crate) fn build(rows: &[WeekRow]) -> SelectionGrid {
        SelectionGrid {
            rows: rows.iter().map(|row| row.map(Cell::new)).collect(),
            dirty: Dirty::Everything,
            highlight: None,
        }
    }

    pub(crate) fn width(&self) -> usize {
        DAYS_IN_WEEK
    }

    pub(crate) fn height(&self) -> usize {
        self.rows.len()
    }

    /// Index of the last row
    pub(crate) fn bottom(&self) -> usize {
        self.height().saturating_sub(1)
    }

    /// Index of the last column
    pub(crate) fn row_end(&self) -> usize {
        self.width() - 1
    }

    #[cfg(test)]
    pub(crate) fn cell(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(GridError::OutOfBounds { x, y })
    }

    pub(super) fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, GridError> {
        self.rows
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(GridError::OutOfBounds { x, y })
    }

    /// Position of the first day scanning rows top to bottom, each left to
    /// right
    pub(crate) fn first_live_cell(&self) -> Result<(usize, usize), GridError> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(y, row)| row.iter().position(|c| !c.is_null()).map(|x| (x, y)))
            .ok_or(GridError::Empty)
    }

    /// Position of the last day, i.e., the first one found scanning rows
    /// bottom to top, each right to left
    pub(crate) fn last_live_cell(&self) -> Result<(usize, usize), GridError> {
        self.rows
            .iter()
            .enumerate()
            .rev()
            .find_map(|(y, row)| row.iter().rposition(|c| !c.is_null()).map(|x| (x, y)))
            .ok_or(GridError::Empty)
    }

    /// Selected cells in row-major order
    pub(crate) fn selected_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().flatten().filter(|c| c.is_selected())
    }

    pub(crate) fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub(crate) fn mark_dirty_from(&mut self, row: usize) {
        self.dirty = Dirty::FromRow(row);
    }

    pub(crate) fn mark_full_redraw(&mut self) {
        self.dirty = Dirty::Everything;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = Dirty::Clean;
    }

    pub(crate) fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub(crate) fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = Some(highlight);
    }

    pub(crate) fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Renders row `from` and every row below it
    pub(crate) fn render_lines<S: TextStyler>(&self, from: usize, painter: &Painter<S>) -> Vec<String> {
        let rows = self.rows.get(from..).unwrap_or_default();
        std::iter::zip(from.., rows)
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let rendered = cell.render(painter);
                        if self.highlight == Some(Highlight::Cell { x, y }) {
                            painter.highlight(&rendered)
                        } else {
                            rendered
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Renders the rows that changed since the dirty marker was last reset
    pub(crate) fn redraw_lines<S: TextStyler>(&self, painter: &Painter<S>) -> Vec<String> {
        match self.dirty {
            Dirty::Everything => self.render_lines(0, painter),
            Dirty::FromRow(y) => self.render_lines(y, painter),
            Dirty::Clean => Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridError {
    #[error("position ({x}, {y}) is outside the selection grid")]
    OutOfBounds { x: usize, y: usize },
    #[error("selection grid has no days")]
    Empty,
}
