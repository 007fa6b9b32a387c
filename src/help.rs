use crate::popup::draw_frame;
use crate::theme::BASE_STYLE;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Text},
    widgets::Widget,
};

static TEXT: &[&str] = &[
    "h, LEFT         Previous day",
    "l, RIGHT        Next day",
    "k, UP           Previous week",
    "j, DOWN         Next week",
    "p, PAGE UP      Previous month",
    "n, PAGE DOWN    Next month",
    "0, HOME         Jump to today",
    "ENTER           Birthdays on the selected day",
    "a               Add a birthday",
    "b               List all birthdays",
    "?               Show this help",
    "q, ESC          Quit",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s))).style(BASE_STYLE);
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        let height = u16::try_from(text.height()).unwrap_or(u16::MAX);
        let inner = draw_frame(
            area,
            buf,
            "Commands",
            width.saturating_add(2),
            height.saturating_add(2),
        );
        text.render(inner, buf);
    }
}
