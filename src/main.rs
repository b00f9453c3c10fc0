mod calendar;
mod config;
mod dialog;
mod keys;
mod selection;
mod session;
mod terminal;
mod theme;
use crate::calendar::{MonthCache, MonthKey};
use crate::config::Config;
use crate::keys::CrosstermKeys;
use crate::selection::MonthPage;
use crate::session::{DatePickerSession, Surface};
use crate::terminal::{RawMode, Screen};
use crate::theme::{AnsiStyler, Painter};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::error::Error;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime,
};
use tracing_subscriber::FmtSubscriber;

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Pick(Surface),
    /// Print the month and exit
    Cal,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        mode: Mode,
        month: Option<MonthKey>,
        config: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut mode = Mode::Pick(Surface::DatePicker);
        let mut month = None;
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("days") => mode = Mode::Pick(Surface::DayGrid),
                Arg::Long("cal") => mode = Mode::Cal,
                Arg::Value(value) if month.is_none() => {
                    let value = value.string()?;
                    match parse_month(&value) {
                        Ok(key) => month = Some(key),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: e,
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            mode,
            month,
            config,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                mode,
                month,
                config,
            } => {
                let config = match config {
                    Some(path) => Config::load(&path),
                    None => Config::read(),
                }
                .context("failed to load configuration")?;
                init_logging(&config)?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let start = match month {
                    Some(key) => key,
                    None => MonthKey::containing(today)
                        .context("current date is outside the supported years")?,
                };
                let painter = Painter::new(AnsiStyler, today, config.theme());
                match mode {
                    Mode::Cal => {
                        let page = MonthPage::build(MonthCache::new().fetch(start));
                        println!("{}", page.render(&painter));
                    }
                    Mode::Pick(surface) => {
                        let mut session = DatePickerSession::new(start, surface, painter);
                        let dates = {
                            let _raw = RawMode::enable().context("failed to enable raw mode")?;
                            let mut screen = Screen::new(io::stdout());
                            session.pick(&mut CrosstermKeys, &mut screen)
                        }?;
                        for date in dates {
                            println!("{}", date.format(&YMD_FMT)?);
                        }
                    }
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: daypick [options] [YYYY-MM]");
                println!();
                println!("Pick days from a terminal calendar and print them");
                println!();
                println!("Keys: arrows or hjkl move, space/x/tab toggle a day, enter finishes,");
                println!("q or esc quits.  Enter on the month title picks another month.");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   Read configuration from the given file");
                println!("      --days            Pick from a single month that wraps around");
                println!("      --cal             Print the month and exit");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_month(value: &str) -> Result<MonthKey, Box<dyn Error + Send + Sync>> {
    let date = Date::parse(&format!("{value}-01"), &YMD_FMT)?;
    Ok(MonthKey::new(date.year(), u8::from(date.month()))?)
}

/// Sends log events to the configured file.  Nothing is logged when no file
/// is configured, as the terminal belongs to the picker.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")?;
    Ok(())
}
