use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) const POPUP_TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HIGHLIGHT_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const DIM_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod calendar {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const TODAY_STYLE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);

    pub(crate) const MARKED_DAY_STYLE: Style = Style::new().fg(Color::LightMagenta);

    pub(crate) const SELECTED_MODIFIER: Modifier = Modifier::REVERSED;
}

pub(crate) mod form {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const ACTIVE_LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
