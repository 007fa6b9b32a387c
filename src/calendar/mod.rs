mod grid;
mod month;
mod widget;
pub(crate) use self::month::MonthWindow;
pub(crate) use self::widget::MonthCalendar;
use time::Date;

/// Decides which days of the calendar get a marker
pub(crate) trait DateMarker {
    fn is_marked(&self, date: Date) -> bool;
}
