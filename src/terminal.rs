use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    queue,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

/// Line-oriented output to a terminal.
///
/// Content is painted starting at the line the cursor is on, and after every
/// paint the cursor rests at the end of the last painted line, so the lines
/// to repaint are always the bottommost ones.
#[derive(Debug)]
pub(crate) struct Screen<W: Write> {
    out: W,
}

impl<W: Write> Screen<W> {
    pub(crate) fn new(out: W) -> Screen<W> {
        Screen { out }
    }

    /// Hides the cursor until the returned guard is dropped
    pub(crate) fn hide_cursor(&mut self) -> io::Result<HiddenCursor<'_, W>> {
        queue!(self.out, Hide)?;
        self.out.flush()?;
        Ok(HiddenCursor { screen: self })
    }

    /// Erases the last `n` lines, leaving the cursor at the start of the
    /// topmost of them
    pub(crate) fn clear_lines(&mut self, n: usize) -> io::Result<()> {
        if n == 0 {
            return Ok(());
        }
        queue!(self.out, MoveToColumn(0))?;
        if n > 1 {
            queue!(self.out, MoveUp(u16::try_from(n - 1).unwrap_or(u16::MAX)))?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown))
    }

    pub(crate) fn print_lines(&mut self, lines: &[String]) -> io::Result<()> {
        self.out.write_all(lines.join("\r\n").as_bytes())?;
        self.out.flush()
    }

    /// Replaces the last `lines.len()` lines with `lines`
    pub(crate) fn repaint(&mut self, lines: &[String]) -> io::Result<()> {
        tracing::trace!(lines = lines.len(), "repainting");
        self.clear_lines(lines.len())?;
        self.print_lines(lines)
    }

    pub(crate) fn beep(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }

    /// Moves past the painted content so later output starts on a fresh line
    pub(crate) fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(b"\r\n")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub(crate) fn get_ref(&self) -> &W {
        &self.out
    }
}

/// Shows the cursor again when dropped, including while unwinding
#[derive(Debug)]
pub(crate) struct HiddenCursor<'a, W: Write> {
    screen: &'a mut Screen<W>,
}

impl<W: Write> Deref for HiddenCursor<'_, W> {
    type Target = Screen<W>;

    fn deref(&self) -> &Screen<W> {
        self.screen
    }
}

impl<W: Write> DerefMut for HiddenCursor<'_, W> {
    fn deref_mut(&mut self) -> &mut Screen<W> {
        self.screen
    }
}

impl<W: Write> Drop for HiddenCursor<'_, W> {
    fn drop(&mut self) {
        // Nothing useful can be done about a failure here
        let _ = queue!(self.screen.out, Show).and_then(|()| self.screen.out.flush());
    }
}

/// Keeps the terminal in raw mode until dropped
#[derive(Debug)]
pub(crate) struct RawMode(());

impl RawMode {
    pub(crate) fn enable() -> io::Result<RawMode> {
        enable_raw_mode()?;
        Ok(RawMode(()))
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
