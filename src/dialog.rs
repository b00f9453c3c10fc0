use crate::calendar::{MonthExt, MonthKey};
use crate::keys::{Key, KeyReader};
use crate::session::PickError;
use crate::terminal::Screen;
use crate::theme::{Painter, TextStyler};
use std::io::Write;
use std::iter::successors;
use time::Month;

const ARROW_LEFT: char = '◀';
const ARROW_RIGHT: char = '▶';

/// Columns of blank space on either side of the widest option
const CAROUSEL_PADDING: usize = 2;

/// A single-line chooser that rotates through `len` options.  Labels are
/// supplied by the owner when rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
struct Carousel {
    len: usize,
    index: usize,
    width: usize,
}

impl Carousel {
    fn new(len: usize, index: usize, label_width: usize) -> Carousel {
        Carousel {
            len,
            index: index.min(len.saturating_sub(1)),
            width: label_width + 2 * CAROUSEL_PADDING,
        }
    }

    fn index(&self) -> usize {
        self.index
    }

    fn move_left(&mut self) {
        self.index = self
            .index
            .checked_sub(1)
            .unwrap_or_else(|| self.len.saturating_sub(1));
    }

    fn move_right(&mut self) {
        self.index += 1;
        if self.index >= self.len {
            self.index = 0;
        }
    }

    fn render<S: TextStyler>(&self, label: &str, focused: bool, painter: &Painter<S>) -> String {
        let padding = self.width.saturating_sub(label.chars().count());
        let left = padding / 2;
        let right = padding - left;
        let label = if focused {
            painter.highlight(label)
        } else {
            label.to_owned()
        };
        format!(
            "{ARROW_LEFT}{}{label}{}{ARROW_RIGHT}",
            " ".repeat(left),
            " ".repeat(right)
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Focus {
    Month,
    Year,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DialogOutput {
    Ok,
    Invalid,
    Chosen(MonthKey),
    Cancelled,
}

/// Two stacked carousels for picking a month and a year.  Up and down switch
/// between them; left and right rotate the focused one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthYearDialog {
    months: Carousel,
    years: Carousel,
    focus: Focus,
}

impl MonthYearDialog {
    /// Number of lines the dialog occupies
    pub(crate) const HEIGHT: usize = 2;

    pub(crate) fn new(start_at: MonthKey) -> MonthYearDialog {
        let month_width = successors(Some(Month::January), |&m| {
            (m != Month::December).then_some(m.next())
        })
        .map(|m| m.name().len())
        .max()
        .unwrap_or(0);
        let month_index = usize::from(u8::from(start_at.month())) - 1;
        let year_count =
            usize::try_from(MonthKey::LAST_YEAR - MonthKey::FIRST_YEAR + 1).unwrap_or(0);
        let year_width = MonthKey::LAST_YEAR.to_string().len();
        let year_index = usize::try_from(start_at.year() - MonthKey::FIRST_YEAR).unwrap_or(0);
        MonthYearDialog {
            months: Carousel::new(12, month_index, month_width),
            years: Carousel::new(year_count, year_index, year_width),
            focus: Focus::Month,
        }
    }

    pub(crate) fn lines<S: TextStyler>(&self, painter: &Painter<S>) -> Vec<String> {
        let month = self.month().map_or("", |m| m.name());
        let year = self.year().map(|y| y.to_string()).unwrap_or_default();
        vec![
            self.months.render(month, self.focus == Focus::Month, painter),
            self.years.render(&year, self.focus == Focus::Year, painter),
        ]
    }

    pub(crate) fn handle_input(&mut self, key: Key) -> DialogOutput {
        match key {
            Key::Up | Key::Down => {
                self.focus = match self.focus {
                    Focus::Month => Focus::Year,
                    Focus::Year => Focus::Month,
                };
                DialogOutput::Ok
            }
            Key::Left => {
                self.focused_mut().move_left();
                DialogOutput::Ok
            }
            Key::Right => {
                self.focused_mut().move_right();
                DialogOutput::Ok
            }
            Key::Confirm => match self.chosen() {
                Some(key) => DialogOutput::Chosen(key),
                None => DialogOutput::Invalid,
            },
            Key::Quit => DialogOutput::Cancelled,
            Key::Toggle | Key::Other(_) => DialogOutput::Invalid,
        }
    }

    /// Shows the dialog at the cursor and reads keys until the user picks a
    /// month or cancels.  The dialog is erased before returning.
    pub(crate) fn run<K, W, S>(
        mut self,
        keys: &mut K,
        screen: &mut Screen<W>,
        painter: &Painter<S>,
    ) -> Result<Option<MonthKey>, PickError>
    where
        K: KeyReader,
        W: Write,
        S: TextStyler,
    {
        screen.print_lines(&self.lines(painter))?;
        loop {
            match self.handle_input(keys.read_key()?) {
                DialogOutput::Ok => screen.repaint(&self.lines(painter))?,
                DialogOutput::Invalid => screen.beep()?,
                DialogOutput::Chosen(key) => {
                    screen.clear_lines(Self::HEIGHT)?;
                    return Ok(Some(key));
                }
                DialogOutput::Cancelled => {
                    screen.clear_lines(Self::HEIGHT)?;
                    return Ok(None);
                }
            }
        }
    }

    fn focused_mut(&mut self) -> &mut Carousel {
        match self.focus {
            Focus::Month => &mut self.months,
            Focus::Year => &mut self.years,
        }
    }

    fn month(&self) -> Option<Month> {
        let n = u8::try_from(self.months.index() + 1).ok()?;
        Month::try_from(n).ok()
    }

    fn year(&self) -> Option<i32> {
        Some(i32::try_from(self.years.index()).ok()? + MonthKey::FIRST_YEAR)
    }

    fn chosen(&self) -> Option<MonthKey> {
        let month = self.month()?;
        MonthKey::new(self.year()?, u8::from(month)).ok()
    }
}
