use thiserror::Error;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Number of days from `start` forwards to `self`, in `0..7`
    fn days_since(&self, start: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn days_since(&self, start: Weekday) -> u8 {
        (7 + self.number_days_from_sunday() - start.number_days_from_sunday()) % 7
    }
}

/// One slot of the month grid: either padding or a day of the month being
/// shown
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CalendarCell {
    Blank,
    Day(Date),
}

impl CalendarCell {
    pub(crate) fn date(&self) -> Option<Date> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Day(d) => Some(*d),
        }
    }
}

/// Lay out the month containing `reference` as a sequence of cells, seven per
/// week, with the first column falling on `first_weekday`.
///
/// Days of the neighboring months that share a week with the first or last
/// day of the month are emitted as [`CalendarCell::Blank`] rather than as
/// dates.  The result always has a length that is a positive multiple of 7
/// and contains exactly one `Day` per day of the month.
pub(crate) fn build_month_grid(reference: Date, first_weekday: Weekday) -> Vec<CalendarCell> {
    let first = first_of_month(reference);
    let offset = usize::from(first.weekday().days_since(first_weekday));
    let total_days = usize::from(days_in_month(first));
    let total_cells = (offset + total_days).div_ceil(DAYS_IN_WEEK) * DAYS_IN_WEEK;
    (0..total_cells)
        .map(|i| {
            // Out-of-month indices either underflow or name a day number the
            // month doesn't have; both come out blank.
            i.checked_sub(offset)
                .and_then(|d| u8::try_from(d + 1).ok())
                .and_then(|day| first.replace_day(day).ok())
                .map_or(CalendarCell::Blank, CalendarCell::Day)
        })
        .collect()
}

pub(crate) fn days_in_month(date: Date) -> u8 {
    (29..=31)
        .rev()
        .find(|&day| date.replace_day(day).is_ok())
        .unwrap_or(28)
}

/// Move `date` back one calendar month, clamping the day of month to the
/// length of the target month
pub(crate) fn previous_month(date: Date) -> Result<Date, OutOfTimeError> {
    let (year, month) = match date.month() {
        Month::January => (date.year().checked_sub(1).ok_or(OutOfTimeError)?, Month::December),
        m => (date.year(), m.previous()),
    };
    same_day_in(date, year, month)
}

/// Move `date` forwards one calendar month, clamping the day of month to the
/// length of the target month
pub(crate) fn next_month(date: Date) -> Result<Date, OutOfTimeError> {
    let (year, month) = match date.month() {
        Month::December => (date.year().checked_add(1).ok_or(OutOfTimeError)?, Month::January),
        m => (date.year(), m.next()),
    };
    same_day_in(date, year, month)
}

fn same_day_in(date: Date, year: i32, month: Month) -> Result<Date, OutOfTimeError> {
    let first = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
    let day = date.day().min(days_in_month(first));
    first.replace_day(day).map_err(|_| OutOfTimeError)
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;
