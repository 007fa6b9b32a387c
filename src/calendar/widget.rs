use super::grid::DAYS_IN_WEEK;
use super::month::MonthWindow;
use super::DateMarker;
use crate::theme::{
    calendar::{MARKED_DAY_STYLE, SELECTED_MODIFIER, TITLE_STYLE, TODAY_STYLE, WEEKDAY_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Paragraph, Widget},
};
use std::iter::successors;

/// Number of columns per day of week, including the gap after it
const DAY_WIDTH: u16 = 6;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// Drawn after the day number of every day with a birthday
const MARKER: char = '*';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthCalendar<'a, M> {
    window: &'a MonthWindow,
    marker: &'a M,
}

impl<'a, M: DateMarker> MonthCalendar<'a, M> {
    pub(crate) fn new(window: &'a MonthWindow, marker: &'a M) -> Self {
        MonthCalendar { window, marker }
    }
}

impl<M: DateMarker> Widget for MonthCalendar<'_, M> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            y: area.y,
            width: MAIN_WIDTH.min(area.width),
            height: area.height,
        };
        let mut canvas = BufferCanvas::new(area, buf);
        let selected = self.window.selected();
        canvas.draw_title(&format!("{} {}", selected.month(), selected.year()));
        canvas.draw_header(self.window.first_weekday());
        for (i, cell) in std::iter::zip(0u16.., self.window.cells()) {
            let Some(date) = cell.date() else {
                continue;
            };
            let is_today = date == self.window.today();
            let is_marked = self.marker.is_marked(date);
            let (open, close) = if is_today { ('[', ']') } else { (' ', ' ') };
            let mark = if is_marked { MARKER } else { ' ' };
            let mut style = BASE_STYLE;
            if is_marked {
                style = style.patch(MARKED_DAY_STYLE);
            }
            if is_today {
                style = style.patch(TODAY_STYLE);
            }
            if date == selected {
                style = style.add_modifier(SELECTED_MODIFIER);
            }
            canvas.draw_day(
                i / 7,
                i % 7,
                format!("{open}{:2}{close}{mark}", date.day()),
                style,
            );
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(0, MAIN_WIDTH.saturating_sub(width) / 2, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self, first_weekday: time::Weekday) {
        let weekdays = successors(Some(first_weekday), |wd| Some(wd.next())).take(DAYS_IN_WEEK);
        for (col, wd) in std::iter::zip(0u16.., weekdays) {
            let abbrev = wd.to_string().chars().take(2).collect::<String>();
            self.mvprint(1, col * DAY_WIDTH + 1, abbrev, Some(WEEKDAY_STYLE));
        }
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day<S: AsRef<str>>(&mut self, week_no: u16, col: u16, s: S, style: Style) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            col * DAY_WIDTH,
            s,
            Some(style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
