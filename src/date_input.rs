use crate::theme::{form::UNFILLED_CELL_STYLE, BASE_STYLE};
use ratatui::text::{Line, Span};
use time::{Date, Month};

const COMPLETE_POS: usize = 8;

/// Digit-by-digit entry of a `YYYY-MM-DD` date
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct DateInput {
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    day: [Option<u8>; 2],
    pos: usize,
}

impl DateInput {
    pub(crate) fn new() -> DateInput {
        DateInput::default()
    }

    /// Returns an input already filled in with `date`, or an empty input if
    /// the year of `date` does not have four digits
    pub(crate) fn from_date(date: Date) -> DateInput {
        let mut input = DateInput::new();
        let Ok(year) = u16::try_from(date.year()) else {
            return input;
        };
        if year > 9999 {
            return input;
        }
        let digits = [
            year / 1000,
            year / 100 % 10,
            year / 10 % 10,
            year % 10,
            u16::from(u8::from(date.month()) / 10),
            u16::from(u8::from(date.month()) % 10),
            u16::from(date.day() / 10),
            u16::from(date.day() % 10),
        ];
        for d in digits {
            // Every value is a single decimal digit
            input.push(u8::try_from(d).unwrap_or_default());
        }
        input
    }

    /// Returns `false` if the input is already full
    pub(crate) fn push(&mut self, d: u8) -> bool {
        match self.pos {
            0..4 => self.year[self.pos] = Some(d),
            4..6 => self.month[self.pos - 4] = Some(d),
            6..8 => self.day[self.pos - 6] = Some(d),
            _ => return false,
        }
        self.pos += 1;
        true
    }

    /// Returns `false` if the input is already empty
    pub(crate) fn backspace(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        match self.pos {
            0..4 => self.year[self.pos] = None,
            4..6 => self.month[self.pos - 4] = None,
            6..8 => self.day[self.pos - 6] = None,
            _ => unreachable!(),
        }
        true
    }

    /// The entered date, if all digits are filled in and name a real date
    pub(crate) fn date(&self) -> Option<Date> {
        if self.pos != COMPLETE_POS {
            return None;
        }
        let year = self
            .year
            .iter()
            .try_fold(0i32, |acc, d| Some(acc * 10 + i32::from((*d)?)))?;
        let month = self
            .month
            .iter()
            .try_fold(0u8, |acc, d| Some(acc * 10 + (*d)?))?;
        let day = self
            .day
            .iter()
            .try_fold(0u8, |acc, d| Some(acc * 10 + (*d)?))?;
        let month = Month::try_from(month).ok()?;
        Date::from_calendar_date(year, month, day).ok()
    }

    pub(crate) fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        let mut first = true;
        for (fallback, digits) in [
            ("Y", self.year.as_slice()),
            ("M", self.month.as_slice()),
            ("D", self.day.as_slice()),
        ] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }
}
