use crate::theme::{Painter, TextStyler};
use time::Date;

/// Something that can be drawn as one two-column slot of a calendar row
pub(crate) trait Renderable {
    fn render<S: TextStyler>(&self, painter: &Painter<S>) -> String;
}

/// Something that may stand for a calendar date
pub(crate) trait DateBearing {
    fn date(&self) -> Option<Date>;
}

/// A selectable day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    date: Date,
    selected: bool,
}

impl DayCell {
    fn new(date: Date) -> DayCell {
        DayCell {
            date,
            selected: false,
        }
    }
}

impl Renderable for DayCell {
    fn render<S: TextStyler>(&self, painter: &Painter<S>) -> String {
        if self.selected {
            painter.selected_marker().to_owned()
        } else {
            painter.day_label(self.date)
        }
    }
}

impl DateBearing for DayCell {
    fn date(&self) -> Option<Date> {
        Some(self.date)
    }
}

/// One position of a [`SelectionGrid`](super::grid::SelectionGrid)
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Cell {
    /// Padding outside the month; never selectable
    #[default]
    Null,
    Day(DayCell),
}

impl Cell {
    pub(crate) fn new(date: Option<Date>) -> Cell {
        date.map_or(Cell::Null, |d| Cell::Day(DayCell::new(d)))
    }

    pub(crate) fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub(crate) fn is_selected(&self) -> bool {
        matches!(self, Cell::Day(DayCell { selected: true, .. }))
    }

    /// Flips the selected state of a day and returns the new state.  Null
    /// cells are left alone and always report `false`.
    pub(crate) fn toggle_selected(&mut self) -> bool {
        match self {
            Cell::Null => false,
            Cell::Day(day) => {
                day.selected = !day.selected;
                day.selected
            }
        }
    }
}

impl Renderable for Cell {
    fn render<S: TextStyler>(&self, painter: &Painter<S>) -> String {
        match self {
            Cell::Null => String::from("  "),
            Cell::Day(day) => day.render(painter),
        }
    }
}

impl DateBearing for Cell {
    fn date(&self) -> Option<Date> {
        match self {
            Cell::Null => None,
            Cell::Day(day) => day.date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::testing::painter;
    use time::macros::date;

    #[test]
    fn test_null_cell() {
        let mut cell = Cell::new(None);
        assert!(cell.is_null());
        assert!(!cell.toggle_selected());
        assert!(!cell.is_selected());
        assert_eq!(cell.date(), None);
        assert_eq!(cell.render(&painter(date!(2023 - 06 - 07))), "  ");
    }

    #[test]
    fn test_double_toggle() {
        let mut cell = Cell::new(Some(date!(2023 - 06 - 30)));
        assert!(!cell.is_selected());
        assert!(cell.toggle_selected());
        assert!(cell.is_selected());
        assert!(!cell.toggle_selected());
        assert!(!cell.is_selected());
        assert_eq!(cell.date(), Some(date!(2023 - 06 - 30)));
    }

    #[test]
    fn test_render_day() {
        let painter = painter(date!(2023 - 06 - 07));
        let mut cell = Cell::new(Some(date!(2023 - 06 - 05)));
        assert_eq!(cell.render(&painter), " 5");
        cell.toggle_selected();
        assert_eq!(cell.render(&painter), "XX");
    }

    #[test]
    fn test_render_today() {
        let painter = painter(date!(2023 - 06 - 07));
        let cell = Cell::new(Some(date!(2023 - 06 - 07)));
        assert_eq!(cell.render(&painter), "< 7>");
    }
}
