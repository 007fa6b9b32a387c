use crate::theme::{BASE_STYLE, POPUP_TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Margin, Rect},
    text::Span,
    widgets::{Block, Clear, Widget},
};

/// Clear a `width` by `height` box in the middle of `area`, surrounded by one
/// cell of padding, and draw a titled border in it.  Returns the area inside
/// the border.
pub(crate) fn draw_frame(area: Rect, buf: &mut Buffer, title: &str, width: u16, height: u16) -> Rect {
    let [outer_area] = Layout::horizontal([width.saturating_add(2).min(area.width)])
        .flex(Flex::Center)
        .areas(area);
    let [outer_area] = Layout::vertical([height.saturating_add(2).min(area.height)])
        .flex(Flex::Center)
        .areas(outer_area);
    Clear.render(outer_area, buf);
    Block::new().style(BASE_STYLE).render(outer_area, buf);
    let block_area = outer_area.inner(Margin::new(1, 1));
    let block = Block::bordered()
        .title(Span::styled(format!(" {title} "), POPUP_TITLE_STYLE))
        .title_alignment(HorizontalAlignment::Center)
        .style(BASE_STYLE);
    let inner = block.inner(block_area);
    block.render(block_area, buf);
    inner
}

/// Position of the highlighted entry in a popup's list
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Highlight(usize);

impl Highlight {
    pub(crate) fn get(self) -> usize {
        self.0
    }

    /// Returns `false` if already on the last of `count` entries
    pub(crate) fn down(&mut self, count: usize) -> bool {
        if self.0 + 1 < count {
            self.0 += 1;
            true
        } else {
            false
        }
    }

    /// Returns `false` if already on the first entry
    pub(crate) fn up(&mut self) -> bool {
        if self.0 > 0 {
            self.0 -= 1;
            true
        } else {
            false
        }
    }

    /// Keep the highlight on one of `count` entries after some were removed
    pub(crate) fn clamp(&mut self, count: usize) {
        self.0 = self.0.min(count.saturating_sub(1));
    }
}

/// Index of the first entry to show in a window of `rows` rows so that entry
/// `highlight` is visible
pub(crate) fn scroll_offset(highlight: usize, rows: usize) -> usize {
    highlight.saturating_sub(rows.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_inner_area() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        let inner = draw_frame(area, &mut buffer, "Title", 20, 6);
        assert_eq!(inner, Rect::new(31, 10, 18, 4));
        assert_eq!(buffer[(30, 9)].symbol(), "┌");
        assert_eq!(buffer[(49, 14)].symbol(), "┘");
    }

    #[test]
    fn test_highlight_moves_within_bounds() {
        let mut hl = Highlight::default();
        assert!(!hl.up(), "moved above the first entry");
        assert!(hl.down(3), "could not move down");
        assert!(hl.down(3), "could not move down");
        assert!(!hl.down(3), "moved below the last entry");
        assert_eq!(hl.get(), 2);
        hl.clamp(2);
        assert_eq!(hl.get(), 1);
        hl.clamp(0);
        assert_eq!(hl.get(), 0);
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(9, 5), 5);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
