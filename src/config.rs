use std::path::PathBuf;
use thiserror::Error;
use time::{Date, Weekday};

/// Name of the directory under the platform's data directory
const APP_DIR: &str = "bdaycal";

const LOG_FILE: &str = "bdaycal.log";

/// Settings given on the command line, before any defaults are filled in
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct RunOptions {
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) first_weekday: Option<Weekday>,
    pub(crate) date: Option<Date>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Config {
    /// Directory holding the saved birthdays
    pub(crate) data_dir: PathBuf,
    pub(crate) log_file: PathBuf,
    pub(crate) first_weekday: Weekday,
    /// Day to select on start-up instead of today
    pub(crate) start_date: Option<Date>,
}

impl Config {
    pub(crate) fn resolve(opts: RunOptions) -> Result<Config, ConfigError> {
        Config::resolve_with(opts, dirs::data_dir())
    }

    fn resolve_with(opts: RunOptions, platform_dir: Option<PathBuf>) -> Result<Config, ConfigError> {
        let data_dir = match opts.data_dir {
            Some(dir) => dir,
            None => platform_dir.ok_or(ConfigError::NoDataDir)?.join(APP_DIR),
        };
        let log_file = opts.log_file.unwrap_or_else(|| data_dir.join(LOG_FILE));
        Ok(Config {
            data_dir,
            log_file,
            first_weekday: opts.first_weekday.unwrap_or(Weekday::Sunday),
            start_date: opts.date,
        })
    }
}

/// Parse a weekday given as a full English name or its first three letters,
/// ignoring case
pub(crate) fn parse_weekday(s: &str) -> Result<Weekday, ParseWeekdayError> {
    let lower = s.to_ascii_lowercase();
    let mut day = Weekday::Monday;
    for _ in 0..7 {
        let name = day.to_string().to_ascii_lowercase();
        if lower == name || (lower.len() == 3 && name.starts_with(&lower)) {
            return Ok(day);
        }
        day = day.next();
    }
    Err(ParseWeekdayError(s.to_owned()))
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("not a day of the week: {0:?}")]
pub(crate) struct ParseWeekdayError(String);

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("could not determine data directory; use --data-dir to set one")]
    NoDataDir,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use time::macros::date;

    #[test]
    fn test_defaults() {
        let cfg = Config::resolve_with(RunOptions::default(), Some(PathBuf::from("/home/me/.local/share")))
            .unwrap();
        assert_eq!(cfg.data_dir, Path::new("/home/me/.local/share/bdaycal"));
        assert_eq!(cfg.log_file, Path::new("/home/me/.local/share/bdaycal/bdaycal.log"));
        assert_eq!(cfg.first_weekday, Weekday::Sunday);
        assert_eq!(cfg.start_date, None);
    }

    #[test]
    fn test_log_file_follows_data_dir() {
        let opts = RunOptions {
            data_dir: Some(PathBuf::from("/tmp/bdays")),
            first_weekday: Some(Weekday::Monday),
            date: Some(date!(2024 - 02 - 29)),
            ..RunOptions::default()
        };
        let cfg = Config::resolve_with(opts, None).unwrap();
        assert_eq!(cfg.data_dir, Path::new("/tmp/bdays"));
        assert_eq!(cfg.log_file, Path::new("/tmp/bdays/bdaycal.log"));
        assert_eq!(cfg.first_weekday, Weekday::Monday);
        assert_eq!(cfg.start_date, Some(date!(2024 - 02 - 29)));
    }

    #[test]
    fn test_explicit_log_file() {
        let opts = RunOptions {
            log_file: Some(PathBuf::from("bdaycal.log")),
            ..RunOptions::default()
        };
        let cfg = Config::resolve_with(opts, Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(cfg.log_file, Path::new("bdaycal.log"));
    }

    #[test]
    fn test_no_data_dir() {
        assert_eq!(
            Config::resolve_with(RunOptions::default(), None),
            Err(ConfigError::NoDataDir)
        );
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("monday"), Ok(Weekday::Monday));
        assert_eq!(parse_weekday("SUN"), Ok(Weekday::Sunday));
        assert_eq!(parse_weekday("Sat"), Ok(Weekday::Saturday));
        assert_eq!(parse_weekday("Thursday"), Ok(Weekday::Thursday));
        assert!(parse_weekday("th").is_err(), "two letters accepted");
        assert!(parse_weekday("mondays").is_err(), "trailing letters accepted");
        assert!(parse_weekday("").is_err(), "empty string accepted");
    }
}
