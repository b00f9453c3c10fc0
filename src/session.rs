use crate::calendar::{MonthCache, MonthKey};
use crate::dialog::MonthYearDialog;
use crate::keys::{Key, KeyReader};
use crate::selection::{
    Direction, Edge, GridError, MonthPage, Motion, PageCache, PageId, Selector, Wrap,
};
use crate::terminal::Screen;
use crate::theme::{Painter, TextStyler};
use std::io::{self, Write};
use thiserror::Error;
use time::Date;

#[derive(Debug, Error)]
pub(crate) enum PickError {
    #[error("interrupted by user")]
    Interrupted,
    #[error("terminal I/O failed")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// How the selector behaves at the edges of a month
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Surface {
    /// Moving past the sides pages to the adjacent month, and moving up from
    /// the top row reaches the month title
    #[default]
    DatePicker,
    /// A single month in which the selector wraps around in every direction
    DayGrid,
}

impl Surface {
    fn wrap(self) -> Wrap {
        match self {
            Surface::DatePicker => Wrap::NONE,
            Surface::DayGrid => Wrap::ALL,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Outcome {
    Continue,
    /// The key did nothing; beep at the user
    Invalid,
    Done,
}

/// An interactive run of the picker, starting at one month and ending with
/// every date the user selected along the way
#[derive(Debug)]
pub(crate) struct DatePickerSession<S> {
    painter: Painter<S>,
    surface: Surface,
    months: MonthCache,
    pages: PageCache,
    current: PageId,
    /// Absent until the user first presses a direction key
    selector: Option<Selector>,
}

impl<S: TextStyler> DatePickerSession<S> {
    pub(crate) fn new(start: MonthKey, surface: Surface, painter: Painter<S>) -> Self {
        let mut months = MonthCache::new();
        let mut pages = PageCache::new();
        let current = pages.fetch_or_build(start, &mut months);
        DatePickerSession {
            painter,
            surface,
            months,
            pages,
            current,
            selector: None,
        }
    }

    /// Draws the starting month and handles keys until the user confirms or
    /// quits, returning the selected dates.  The cursor is hidden for the
    /// duration.
    pub(crate) fn pick<K: KeyReader, W: Write>(
        &mut self,
        keys: &mut K,
        screen: &mut Screen<W>,
    ) -> Result<Vec<Date>, PickError> {
        tracing::debug!(month = %self.current_key(), surface = ?self.surface, "starting picker");
        let mut screen = screen.hide_cursor()?;
        screen.print_lines(&self.page().lines(&self.painter))?;
        loop {
            let key = keys.read_key()?;
            match self.handle_key(key, keys, &mut screen)? {
                Outcome::Continue => (),
                Outcome::Invalid => screen.beep()?,
                Outcome::Done => break,
            }
        }
        screen.finish()?;
        let dates = self.pages.selected_dates();
        tracing::debug!(
            selected = dates.len(),
            pages = self.pages.len(),
            months = self.months.len(),
            "picker finished"
        );
        Ok(dates)
    }

    fn page(&self) -> &MonthPage {
        self.pages.page(self.current)
    }

    fn current_key(&self) -> MonthKey {
        self.page().key()
    }

    fn handle_key<K: KeyReader, W: Write>(
        &mut self,
        key: Key,
        keys: &mut K,
        screen: &mut Screen<W>,
    ) -> Result<Outcome, PickError> {
        tracing::trace!(?key, selector = ?self.selector, "handling key");
        if let Some(direction) = key.direction() {
            return self.move_selector(direction, screen);
        }
        match key {
            Key::Toggle => self.toggle(screen),
            Key::Confirm if self.selector.is_some_and(|s| s.on_header()) => {
                self.choose_month(keys, screen)
            }
            Key::Confirm | Key::Quit => Ok(Outcome::Done),
            _ => Ok(Outcome::Invalid),
        }
    }

    fn move_selector<W: Write>(
        &mut self,
        direction: Direction,
        screen: &mut Screen<W>,
    ) -> Result<Outcome, PickError> {
        let wrap = self.surface.wrap();
        let grid = self.pages.page_mut(self.current).grid_mut();
        let Some(mut selector) = self.selector else {
            self.selector = Some(Selector::build(grid, Edge::entered_by(direction), wrap)?);
            self.redraw(screen)?;
            return Ok(Outcome::Continue);
        };
        let motion = selector.move_in(direction, grid);
        tracing::trace!(?direction, ?motion, x = selector.x(), row = ?selector.row(), "moved selector");
        self.selector = Some(selector);
        match motion {
            Motion::Moved | Motion::Stayed => {
                self.redraw(screen)?;
                Ok(Outcome::Continue)
            }
            Motion::OffLeft => self.turn_page(self.current_key().previous(), Edge::Bottom, screen),
            Motion::OffRight => self.turn_page(self.current_key().next(), Edge::Top, screen),
        }
    }

    fn turn_page<W: Write>(
        &mut self,
        target: Option<MonthKey>,
        edge: Edge,
        screen: &mut Screen<W>,
    ) -> Result<Outcome, PickError> {
        let Some(key) = target else {
            tracing::debug!(month = %self.current_key(), "no month to page to");
            return Ok(Outcome::Invalid);
        };
        screen.clear_lines(self.page().line_count())?;
        self.show_page(key, edge, screen)?;
        Ok(Outcome::Continue)
    }

    /// Switches to the page for `key`, placing a fresh selector at `edge`, and
    /// draws it at the cursor
    fn show_page<W: Write>(
        &mut self,
        key: MonthKey,
        edge: Edge,
        screen: &mut Screen<W>,
    ) -> Result<(), PickError> {
        tracing::debug!(from = %self.current_key(), to = %key, "switching month");
        self.current = self.pages.fetch_or_build(key, &mut self.months);
        let grid = self.pages.page_mut(self.current).grid_mut();
        self.selector = Some(Selector::build(grid, edge, self.surface.wrap())?);
        screen.print_lines(&self.page().lines(&self.painter))?;
        Ok(())
    }

    fn toggle<W: Write>(&mut self, screen: &mut Screen<W>) -> Result<Outcome, PickError> {
        if let Some(selector) = self.selector {
            let grid = self.pages.page_mut(self.current).grid_mut();
            grid.mark_clean();
            if selector.toggle(grid)? {
                self.redraw(screen)?;
            }
        }
        Ok(Outcome::Continue)
    }

    fn choose_month<K: KeyReader, W: Write>(
        &mut self,
        keys: &mut K,
        screen: &mut Screen<W>,
    ) -> Result<Outcome, PickError> {
        let current = self.current_key();
        screen.clear_lines(self.page().line_count())?;
        match MonthYearDialog::new(current).run(keys, screen, &self.painter)? {
            Some(key) => self.show_page(key, Edge::Bottom, screen)?,
            None => {
                tracing::debug!(month = %current, "month dialog cancelled");
                screen.print_lines(&self.page().lines(&self.painter))?;
            }
        }
        Ok(Outcome::Continue)
    }

    fn redraw<W: Write>(&mut self, screen: &mut Screen<W>) -> Result<(), PickError> {
        let lines = self.page().redraw_lines(&self.painter);
        screen.repaint(&lines)?;
        self.pages.page_mut(self.current).grid_mut().mark_clean();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::testing::ScriptedKeys;
    use crate::theme::testing::{painter, Brackets};
    use crossterm::event::KeyCode;
    use time::macros::date;

    fn session(year: i32, month: u8, surface: Surface) -> DatePickerSession<Brackets> {
        DatePickerSession::new(
            MonthKey::new(year, month).unwrap(),
            surface,
            painter(date!(2001 - 01 - 01)),
        )
    }

    fn run<I: IntoIterator<Item = Key>>(
        session: &mut DatePickerSession<Brackets>,
        keys: I,
    ) -> (Result<Vec<Date>, PickError>, String) {
        let mut keys = ScriptedKeys::new(keys);
        let mut screen = Screen::new(Vec::new());
        let r = session.pick(&mut keys, &mut screen);
        let output = String::from_utf8_lossy(screen.get_ref()).into_owned();
        (r, output)
    }

    #[test]
    fn test_quit_immediately() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, output) = run(&mut s, [Key::Quit]);
        assert_eq!(r.unwrap(), Vec::<Date>::new());
        assert!(output.starts_with("\x1B[?25l     June 2023\r\nSu Mo Tu We Th Fr Sa\r\n"));
        assert!(output.ends_with("\r\n\x1B[?25h"));
    }

    #[test]
    fn test_toggle_without_selector() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, _) = run(&mut s, [Key::Toggle, Key::Confirm]);
        assert_eq!(r.unwrap(), Vec::<Date>::new());
    }

    #[test]
    fn test_select_last_two_days() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, output) = run(
            &mut s,
            [Key::Up, Key::Toggle, Key::Left, Key::Toggle, Key::Confirm],
        );
        assert_eq!(
            r.unwrap(),
            [date!(2023 - 06 - 29), date!(2023 - 06 - 30)]
        );
        assert!(output.contains("[XX]"));
    }

    #[test]
    fn test_first_move_placement() {
        for (key, expected) in [
            (Key::Up, date!(2023 - 06 - 30)),
            (Key::Left, date!(2023 - 06 - 30)),
            (Key::Down, date!(2023 - 06 - 01)),
            (Key::Right, date!(2023 - 06 - 01)),
        ] {
            let mut s = session(2023, 6, Surface::DatePicker);
            let (r, _) = run(&mut s, [key, Key::Toggle, Key::Confirm]);
            assert_eq!(r.unwrap(), [expected], "first key {key:?}");
        }
    }

    #[test]
    fn test_page_left() {
        let mut s = session(2023, 6, Surface::DatePicker);
        // June 1, 2023 is a Thursday, so four presses reach the first column
        let (r, output) = run(
            &mut s,
            [
                Key::Down,
                Key::Left,
                Key::Left,
                Key::Left,
                Key::Left,
                Key::Left,
                Key::Toggle,
                Key::Confirm,
            ],
        );
        assert_eq!(r.unwrap(), [date!(2023 - 05 - 31)]);
        assert_eq!(s.pages.len(), 2);
        assert_eq!(s.current_key(), MonthKey::new(2023, 5).unwrap());
        assert!(output.contains("\x1B[1G\x1B[6A\x1B[J      May 2023\r\nSu Mo Tu We Th Fr Sa\r\n"));
    }

    #[test]
    fn test_page_between_heights() {
        // August 2023 has five weeks and July 2023 has six
        let mut s = session(2023, 8, Surface::DatePicker);
        let mut keys = vec![Key::Down, Key::Left, Key::Left, Key::Left, Key::Toggle];
        keys.extend([Key::Right; 6]);
        keys.extend([Key::Toggle, Key::Confirm]);
        let (r, output) = run(&mut s, keys);
        assert_eq!(r.unwrap(), [date!(2023 - 08 - 01), date!(2023 - 07 - 31)]);
        let to_july = output
            .find("\x1B[1G\x1B[6A\x1B[J     July 2023\r\n")
            .unwrap();
        let back_to_august = output
            .find("\x1B[1G\x1B[7A\x1B[J    August 2023\r\n")
            .unwrap();
        assert!(to_july < back_to_august);
        assert!(output.contains("\x1B[1G\x1B[J30 [XX]"));
    }

    #[test]
    fn test_page_right() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, _) = run(
            &mut s,
            [Key::Up, Key::Right, Key::Right, Key::Toggle, Key::Confirm],
        );
        assert_eq!(r.unwrap(), [date!(2023 - 07 - 01)]);
    }

    #[test]
    fn test_selections_survive_paging() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let mut keys = vec![Key::Up, Key::Toggle];
        // June 30 is a Friday; five presses reach Sunday the 25th
        keys.extend([Key::Left; 6]);
        // Lands on May 31, a Wednesday
        keys.push(Key::Toggle);
        keys.extend([Key::Right; 4]);
        // Back on June 1
        keys.extend([Key::Toggle, Key::Confirm]);
        let (r, _) = run(&mut s, keys);
        assert_eq!(
            r.unwrap(),
            [
                date!(2023 - 06 - 01),
                date!(2023 - 06 - 30),
                date!(2023 - 05 - 31)
            ]
        );
        assert_eq!(s.pages.len(), 2);
    }

    #[test]
    fn test_header_opens_dialog() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, output) = run(
            &mut s,
            [
                Key::Down,
                Key::Up,
                Key::Confirm,
                Key::Right,
                Key::Confirm,
                Key::Toggle,
                Key::Confirm,
            ],
        );
        assert_eq!(r.unwrap(), [date!(2023 - 07 - 31)]);
        assert!(output.contains("[June 2023]"));
        assert!(output.contains("[July]"));
        assert_eq!(s.current_key(), MonthKey::new(2023, 7).unwrap());
    }

    #[test]
    fn test_header_dialog_cancelled() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, _) = run(
            &mut s,
            [
                Key::Down,
                Key::Up,
                Key::Confirm,
                Key::Quit,
                Key::Down,
                Key::Toggle,
                Key::Confirm,
            ],
        );
        assert_eq!(r.unwrap(), [date!(2023 - 06 - 01)]);
        assert_eq!(s.pages.len(), 1);
    }

    #[test]
    fn test_toggle_on_header_does_nothing() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, _) = run(&mut s, [Key::Down, Key::Up, Key::Toggle, Key::Quit]);
        assert_eq!(r.unwrap(), Vec::<Date>::new());
    }

    #[test]
    fn test_unknown_key_beeps() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, output) = run(&mut s, [Key::Other(KeyCode::Home), Key::Quit]);
        assert!(r.is_ok());
        assert!(output.contains('\x07'));
    }

    #[test]
    fn test_end_of_time() {
        // December 31, 9999 is a Friday
        let mut s = session(9999, 12, Surface::DatePicker);
        let (r, output) = run(&mut s, [Key::Up, Key::Right, Key::Right, Key::Quit]);
        assert_eq!(r.unwrap(), Vec::<Date>::new());
        assert!(output.contains('\x07'));
        assert_eq!(s.pages.len(), 1);
        assert_eq!(s.selector.map(|sel| sel.x()), Some(6));
        let (r, _) = run(&mut s, [Key::Left, Key::Toggle, Key::Confirm]);
        assert_eq!(r.unwrap(), [date!(9999 - 12 - 31)]);
        assert_eq!(s.current_key(), MonthKey::new(9999, 12).unwrap());
    }

    #[test]
    fn test_start_of_time() {
        // January 1, 0001 is a Monday
        let mut s = session(1, 1, Surface::DatePicker);
        let (r, output) = run(
            &mut s,
            [Key::Down, Key::Left, Key::Left, Key::Toggle, Key::Confirm],
        );
        assert_eq!(r.unwrap(), Vec::<Date>::new());
        assert!(output.contains('\x07'));
        assert_eq!(s.pages.len(), 1);
        assert_eq!(s.selector.map(|sel| sel.x()), Some(0));
    }

    #[test]
    fn test_interrupted() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, output) = run(&mut s, [Key::Up, Key::Toggle]);
        assert!(matches!(r, Err(PickError::Interrupted)));
        assert!(output.ends_with("\x1B[?25h"));
        assert_eq!(s.pages.selected_dates(), [date!(2023 - 06 - 30)]);
    }

    #[test]
    fn test_day_grid_wraps() {
        let mut s = session(2023, 6, Surface::DayGrid);
        let mut keys = vec![Key::Down];
        keys.extend([Key::Left; 5]);
        keys.extend([Key::Toggle, Key::Up, Key::Confirm]);
        let (r, _) = run(&mut s, keys);
        assert_eq!(r.unwrap(), [date!(2023 - 06 - 03)]);
        assert_eq!(s.pages.len(), 1);
    }

    #[test]
    fn test_incremental_redraw() {
        let mut s = session(2023, 6, Surface::DatePicker);
        let (r, output) = run(&mut s, [Key::Up, Key::Left, Key::Quit]);
        assert!(r.is_ok());
        // The first move repaints all seven lines; the sideways move only
        // the bottom row
        assert!(output.contains("\x1B[1G\x1B[6A\x1B[J"));
        assert!(output.ends_with("\x1B[1G\x1B[J25 26 27 28 [29] 30   \r\n\x1B[?25h"));
    }
}
