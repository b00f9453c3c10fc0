use crossterm::style::{style, Color, Stylize};
use time::Date;

pub(crate) const DEFAULT_SELECTED_MARKER: &str = "XX";

pub(crate) const DEFAULT_TODAY_COLOR: Color = Color::Red;

/// Decorates text for display on the terminal
pub(crate) trait TextStyler {
    fn invert(&self, text: &str) -> String;

    fn colorize(&self, text: &str, color: Color) -> String;
}

/// Styles text with ANSI escape sequences
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct AnsiStyler;

impl TextStyler for AnsiStyler {
    fn invert(&self, text: &str) -> String {
        style(text).reverse().to_string()
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        style(text).with(color).to_string()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Theme {
    pub(crate) today_color: Color,
    /// Shown in place of a selected day's number; always two characters wide
    pub(crate) selected_marker: String,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            today_color: DEFAULT_TODAY_COLOR,
            selected_marker: String::from(DEFAULT_SELECTED_MARKER),
        }
    }
}

/// Everything needed to turn cells and headers into terminal text
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Painter<S> {
    styler: S,
    today: Date,
    theme: Theme,
}

impl<S: TextStyler> Painter<S> {
    pub(crate) fn new(styler: S, today: Date, theme: Theme) -> Painter<S> {
        Painter {
            styler,
            today,
            theme,
        }
    }

    pub(crate) fn day_label(&self, date: Date) -> String {
        let s = format!("{:2}", date.day());
        if date == self.today {
            self.styler.colorize(&s, self.theme.today_color)
        } else {
            s
        }
    }

    pub(crate) fn selected_marker(&self) -> &str {
        &self.theme.selected_marker
    }

    pub(crate) fn highlight(&self, text: &str) -> String {
        self.styler.invert(text)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Marks inverted text with brackets and colored text with angle brackets
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub(crate) struct Brackets;

    impl TextStyler for Brackets {
        fn invert(&self, text: &str) -> String {
            format!("[{text}]")
        }

        fn colorize(&self, text: &str, _color: Color) -> String {
            format!("<{text}>")
        }
    }

    pub(crate) fn painter(today: Date) -> Painter<Brackets> {
        Painter::new(Brackets, today, Theme::default())
    }
}
