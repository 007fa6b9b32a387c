use crate::birthday::BirthdayRecord;
use crate::popup::{draw_frame, scroll_offset, Highlight};
use crate::store::{BirthdayStore, KeyValueStore};
use crate::theme::{BASE_STYLE, DIM_STYLE, HIGHLIGHT_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};
use time::Date;

const INNER_WIDTH: u16 = 50;
const NAME_WIDTH: usize = 20;
const MAX_ROWS: u16 = 15;
const FOOTER: &str = "[ENTER] Show   [d] Delete   [ESC] Close";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ListState {
    highlight: Highlight,
}

impl ListState {
    pub(crate) fn new() -> ListState {
        ListState::default()
    }

    /// Position in the store's collection of the highlighted birthday
    pub(crate) fn highlighted(&self) -> usize {
        self.highlight.get()
    }

    pub(crate) fn move_down<K: KeyValueStore>(&mut self, store: &BirthdayStore<K>) -> bool {
        self.highlight.down(store.len())
    }

    pub(crate) fn move_up(&mut self) -> bool {
        self.highlight.up()
    }

    pub(crate) fn after_removal<K: KeyValueStore>(&mut self, store: &BirthdayStore<K>) {
        self.highlight.clamp(store.len());
    }
}

/// Every stored birthday in the order they were added
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BirthdayList<'a, K> {
    store: &'a BirthdayStore<K>,
    today: Date,
    state: &'a ListState,
}

impl<'a, K: KeyValueStore> BirthdayList<'a, K> {
    pub(crate) fn new(store: &'a BirthdayStore<K>, today: Date, state: &'a ListState) -> Self {
        BirthdayList {
            store,
            today,
            state,
        }
    }
}

impl<K: KeyValueStore> Widget for BirthdayList<'_, K> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body_rows = u16::try_from(self.store.len())
            .unwrap_or(u16::MAX)
            .clamp(1, MAX_ROWS);
        let title = format!("Birthdays ({})", self.store.len());
        let inner = draw_frame(area, buf, &title, INNER_WIDTH + 2, body_rows + 4);
        let rows = usize::from(inner.height.saturating_sub(2));
        let highlight = self.state.highlight.get();
        let mut lines = Vec::new();
        if self.store.is_empty() {
            lines.push(Line::styled("No birthdays yet. Press a to add one.", DIM_STYLE));
        }
        for (i, record) in self
            .store
            .all()
            .iter()
            .enumerate()
            .skip(scroll_offset(highlight, rows))
            .take(rows)
        {
            let line = entry_line(record, self.today);
            lines.push(if i == highlight {
                line.style(HIGHLIGHT_STYLE)
            } else {
                line
            });
        }
        Text::from(lines).style(BASE_STYLE).render(
            Rect {
                height: inner.height.saturating_sub(2),
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

fn entry_line(record: &BirthdayRecord, today: Date) -> Line<'static> {
    let name = record.name.chars().take(NAME_WIDTH).collect::<String>();
    let age = record.age_in_years(today);
    let age = (age >= 0).then(|| age.to_string()).unwrap_or_default();
    Line::from_iter([
        Span::raw(format!("{name:<NAME_WIDTH$} {}  {age:>3}  ", record.date)),
        Span::styled(
            record
                .next_occurrence(today)
                .map(|next| until(today, next))
                .unwrap_or_default(),
            DIM_STYLE,
        ),
    ])
}

/// Describe how far off `next` is from `today`
fn until(today: Date, next: Date) -> String {
    match (next - today).whole_days() {
        0 => String::from("today"),
        1 => String::from("tomorrow"),
        n => format!("in {n} days"),
    }
}
