use crate::birthday::BirthdayRecord;
use crate::popup::{draw_frame, scroll_offset, Highlight};
use crate::store::{BirthdayStore, KeyValueStore};
use crate::theme::{BASE_STYLE, DIM_STYLE, HIGHLIGHT_STYLE, POPUP_TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::Widget,
};
use time::Date;

const INNER_WIDTH: u16 = 44;

/// Each birthday is shown as its name, the age line, and the notes (or a
/// blank line)
const LINES_PER_RECORD: usize = 3;

/// Blank line plus key hints at the bottom of the sheet
const FOOTER_LINES: usize = 2;

const FOOTER: &str = "[a] Add   [d] Delete   [ESC] Close";

/// Which day's birthdays are being shown, and which of them is highlighted
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DetailState {
    date: Date,
    highlight: Highlight,
}

impl DetailState {
    pub(crate) fn new(date: Date) -> DetailState {
        DetailState {
            date,
            highlight: Highlight::default(),
        }
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn move_down<K: KeyValueStore>(&mut self, store: &BirthdayStore<K>) -> bool {
        let count = store.enumerate_on(self.date).count();
        self.highlight.down(count)
    }

    pub(crate) fn move_up(&mut self) -> bool {
        self.highlight.up()
    }

    /// Position in the store's collection of the highlighted birthday
    pub(crate) fn highlighted_offset<K: KeyValueStore>(&self, store: &BirthdayStore<K>) -> Option<usize> {
        store
            .enumerate_on(self.date)
            .nth(self.highlight.get())
            .map(|(i, _)| i)
    }

    pub(crate) fn after_removal<K: KeyValueStore>(&mut self, store: &BirthdayStore<K>) {
        self.highlight.clamp(store.enumerate_on(self.date).count());
    }
}

/// Sheet listing the birthdays that fall on one day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DetailSheet<'a, K> {
    store: &'a BirthdayStore<K>,
    state: &'a DetailState,
}

impl<'a, K: KeyValueStore> DetailSheet<'a, K> {
    pub(crate) fn new(store: &'a BirthdayStore<K>, state: &'a DetailState) -> Self {
        DetailSheet { store, state }
    }
}

impl<K: KeyValueStore> Widget for DetailSheet<'_, K> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let date = self.state.date;
        let birthdays = self.store.birthdays_on(date);
        let body_lines = if birthdays.is_empty() {
            1
        } else {
            birthdays.len() * LINES_PER_RECORD
        };
        let height = u16::try_from(body_lines + FOOTER_LINES).unwrap_or(u16::MAX);
        let title = format!("Birthdays on {} {}, {}", date.month(), date.day(), date.year());
        let inner = draw_frame(area, buf, &title, INNER_WIDTH + 2, height.saturating_add(2));
        let rows = usize::from(inner.height).saturating_sub(FOOTER_LINES) / LINES_PER_RECORD;
        let highlight = self.state.highlight.get();
        let mut lines = Vec::new();
        if birthdays.is_empty() {
            lines.push(Line::styled("No birthdays on this day.", DIM_STYLE));
        }
        for (i, record) in birthdays
            .into_iter()
            .enumerate()
            .skip(scroll_offset(highlight, rows))
            .take(rows.max(1))
        {
            let name_style = if i == highlight {
                HIGHLIGHT_STYLE
            } else {
                POPUP_TITLE_STYLE
            };
            lines.push(Line::styled(record.name.clone(), name_style));
            lines.push(Line::styled(format!("  {}", age_text(record, date)), DIM_STYLE));
            lines.push(match record.notes() {
                Some(notes) => Line::styled(format!("  Notes: {notes}"), DIM_STYLE),
                None => Line::default(),
            });
        }
        let body_height = inner.height.saturating_sub(u16::try_from(FOOTER_LINES).unwrap_or(u16::MAX));
        Text::from(lines).style(BASE_STYLE).render(
            Rect {
                height: body_height,
                ..inner
            },
            buf,
        );
        if inner.height > 0 {
            Line::styled(FOOTER, DIM_STYLE).centered().render(
                Rect {
                    y: inner.bottom() - 1,
                    height: 1,
                    ..inner
                },
                buf,
            );
        }
    }
}

/// Describe the age `record`'s person reaches on `date`
fn age_text(record: &BirthdayRecord, date: Date) -> String {
    match record.turning_age(date) {
        Some(1) => String::from("Turns 1 year old"),
        Some(n) if n > 0 => format!("Turns {n} years old"),
        Some(0) => String::from("Born on this day"),
        _ => format!("Born in {}", record.date.year()),
    }
}
