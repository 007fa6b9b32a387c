mod add_form;
mod app;
mod birthday;
mod calendar;
mod config;
mod date_input;
mod detail;
mod help;
mod list;
mod logging;
mod popup;
mod store;
mod theme;
use crate::app::App;
use crate::calendar::MonthWindow;
use crate::config::{parse_weekday, Config, RunOptions};
use crate::logging::init_logging;
use crate::store::{BirthdayStore, FileStore};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('d') | Arg::Long("data-dir") => {
                    opts.data_dir = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('w') | Arg::Long("week-start") => {
                    opts.first_weekday = Some(parser.value()?.parse_with(parse_weekday)?);
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(value) if opts.date.is_none() => {
                    opts.date = Some(value.parse_with(|s| Date::parse(s, &YMD_FMT))?);
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                // Must happen while the process is still single-threaded
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let config = Config::resolve(opts)?;
                let _logger = init_logging(&config.log_file)?;
                log::info!(
                    "Starting {} {}; today is {today}, data directory is {}, weeks start on {}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION"),
                    config.data_dir.display(),
                    config.first_weekday,
                );
                let store = BirthdayStore::open(FileStore::new(config.data_dir));
                let mut window = MonthWindow::new(today, config.first_weekday);
                if let Some(date) = config.start_date {
                    window = window.start_date(date);
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(window, store).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: bdaycal [<options>] [YYYY-MM-DD]");
                println!();
                println!("Terminal month calendar that remembers birthdays");
                println!();
                println!("Options:");
                println!("  -d DIR, --data-dir DIR");
                println!("                    Store birthdays in the given directory");
                println!("  -l FILE, --log-file FILE");
                println!("                    Write log messages to the given file");
                println!("  -w DAY, --week-start DAY");
                println!("                    Start weeks on the given day [default: Sunday]");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
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

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
