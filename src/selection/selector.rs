use super::grid::{GridError, Highlight, SelectionGrid};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Result of moving a [`Selector`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Motion {
    Moved,
    /// Nothing to move to, e.g., sideways while on the header
    Stayed,
    /// Tried to move left of the first column; the selector did not move
    OffLeft,
    /// Tried to move right of the last column; the selector did not move
    OffRight,
}

/// Where a new selector is placed on a grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Edge {
    /// The first day of the month
    Top,
    /// The last day of the month
    Bottom,
}

impl Edge {
    /// The edge a selector should start at when the grid is entered by
    /// moving in `direction`
    pub(crate) fn entered_by(direction: Direction) -> Edge {
        match direction {
            Direction::Up | Direction::Left => Edge::Bottom,
            Direction::Down | Direction::Right => Edge::Top,
        }
    }
}

/// Which grid edges the selector wraps around at.  Moving down off the bottom
/// always wraps to the top.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Wrap {
    /// Wrap from the top row to the bottom row instead of entering the header
    pub(crate) vertical: bool,
    /// Wrap within a row instead of reporting [`Motion::OffLeft`] and
    /// [`Motion::OffRight`]
    pub(crate) horizontal: bool,
}

impl Wrap {
    pub(crate) const NONE: Wrap = Wrap {
        vertical: false,
        horizontal: false,
    };

    pub(crate) const ALL: Wrap = Wrap {
        vertical: true,
        horizontal: true,
    };
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Row {
    /// The month title above the grid
    Header,
    Grid(usize),
}

/// A cursor over one [`SelectionGrid`].
///
/// The selector does not own the grid; every operation takes the grid it was
/// built on.  Each move resets the grid's redraw bookkeeping and then records
/// the rows the move touched along with the new highlight.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Selector {
    x: usize,
    row: Row,
    wrap: Wrap,
}

impl Selector {
    pub(crate) fn build(
        grid: &mut SelectionGrid,
        edge: Edge,
        wrap: Wrap,
    ) -> Result<Selector, GridError> {
        let (x, y) = match edge {
            Edge::Top => grid.first_live_cell()?,
            Edge::Bottom => grid.last_live_cell()?,
        };
        grid.set_highlight(Highlight::Cell { x, y });
        grid.mark_full_redraw();
        Ok(Selector {
            x,
            row: Row::Grid(y),
            wrap,
        })
    }

    pub(crate) fn x(&self) -> usize {
        self.x
    }

    pub(crate) fn row(&self) -> Row {
        self.row
    }

    pub(crate) fn on_header(&self) -> bool {
        self.row == Row::Header
    }

    pub(crate) fn move_in(&mut self, direction: Direction, grid: &mut SelectionGrid) -> Motion {
        grid.mark_clean();
        grid.clear_highlight();
        let motion = match direction {
            Direction::Up => self.move_up(grid),
            Direction::Down => self.move_down(grid),
            Direction::Left => self.move_left(grid),
            Direction::Right => self.move_right(grid),
        };
        grid.set_highlight(match self.row {
            Row::Header => Highlight::Header,
            Row::Grid(y) => Highlight::Cell { x: self.x, y },
        });
        motion
    }

    /// Flips the selected state of the day under the selector.  Returns
    /// `false` without changing anything when on the header or on padding.
    pub(crate) fn toggle(&self, grid: &mut SelectionGrid) -> Result<bool, GridError> {
        let Row::Grid(y) = self.row else {
            return Ok(false);
        };
        let cell = grid.cell_mut(self.x, y)?;
        if cell.is_null() {
            return Ok(false);
        }
        cell.toggle_selected();
        grid.mark_dirty_from(y);
        Ok(true)
    }

    fn move_up(&mut self, grid: &mut SelectionGrid) -> Motion {
        match self.row {
            Row::Header => {
                self.row = Row::Grid(grid.bottom());
                grid.mark_full_redraw();
            }
            Row::Grid(0) if self.wrap.vertical => {
                self.row = Row::Grid(grid.bottom());
                grid.mark_dirty_from(0);
            }
            Row::Grid(0) => {
                self.row = Row::Header;
                grid.mark_full_redraw();
            }
            Row::Grid(y) => {
                self.row = Row::Grid(y - 1);
                grid.mark_dirty_from(y - 1);
            }
        }
        Motion::Moved
    }

    fn move_down(&mut self, grid: &mut SelectionGrid) -> Motion {
        match self.row {
            Row::Header => {
                self.row = Row::Grid(0);
                grid.mark_full_redraw();
            }
            Row::Grid(y) if y >= grid.bottom() => {
                self.row = Row::Grid(0);
                grid.mark_dirty_from(0);
            }
            Row::Grid(y) => {
                self.row = Row::Grid(y + 1);
                grid.mark_dirty_from(y);
            }
        }
        Motion::Moved
    }

    fn move_left(&mut self, grid: &mut SelectionGrid) -> Motion {
        let Row::Grid(y) = self.row else {
            return Motion::Stayed;
        };
        if self.x > 0 {
            self.x -= 1;
        } else if self.wrap.horizontal {
            self.x = grid.row_end();
        } else {
            return Motion::OffLeft;
        }
        grid.mark_dirty_from(y);
        Motion::Moved
    }

    fn move_right(&mut self, grid: &mut SelectionGrid) -> Motion {
        let Row::Grid(y) = self.row else {
            return Motion::Stayed;
        };
        if self.x < grid.row_end() {
            self.x += 1;
        } else if self.wrap.horizontal {
            self.x = 0;
        } else {
            return Motion::OffRight;
        }
        grid.mark_dirty_from(y);
        Motion::Moved
    }
}
