use super::grid::{build_month_grid, next_month, previous_month, CalendarCell, OutOfTimeError};
use time::{Date, Duration, Weekday};

/// The month currently on screen, identified by the selected day within it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthWindow {
    today: Date,
    selected: Date,
    first_weekday: Weekday,
}

impl MonthWindow {
    pub(crate) fn new(today: Date, first_weekday: Weekday) -> Self {
        MonthWindow {
            today,
            selected: today,
            first_weekday,
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.selected = date;
        self
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn selected(&self) -> Date {
        self.selected
    }

    pub(crate) fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    pub(crate) fn cells(&self) -> Vec<CalendarCell> {
        build_month_grid(self.selected, self.first_weekday)
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.selected = self.today;
    }

    pub(crate) fn select(&mut self, date: Date) {
        self.selected = date;
    }

    pub(crate) fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        self.selected = previous_month(self.selected)?;
        Ok(())
    }

    pub(crate) fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        self.selected = next_month(self.selected)?;
        Ok(())
    }

    pub(crate) fn day_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.shift(1)
    }

    pub(crate) fn day_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.shift(-1)
    }

    pub(crate) fn week_forwards(&mut self) -> Result<(), OutOfTimeError> {
        self.shift(7)
    }

    pub(crate) fn week_backwards(&mut self) -> Result<(), OutOfTimeError> {
        self.shift(-7)
    }

    fn shift(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        self.selected = self
            .selected
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_month_navigation_moves_selection() {
        let mut window = MonthWindow::new(date!(2024 - 01 - 31), Weekday::Sunday);
        window.next_month().unwrap();
        assert_eq!(window.selected(), date!(2024 - 02 - 29));
        window.next_month().unwrap();
        assert_eq!(window.selected(), date!(2024 - 03 - 29));
        window.previous_month().unwrap();
        window.previous_month().unwrap();
        assert_eq!(window.selected(), date!(2024 - 01 - 29));
        assert_eq!(window.today(), date!(2024 - 01 - 31));
    }

    #[test]
    fn test_day_moves_cross_months() {
        let mut window = MonthWindow::new(date!(2024 - 03 - 10), Weekday::Monday)
            .start_date(date!(2024 - 02 - 29));
        window.day_forwards().unwrap();
        assert_eq!(window.selected(), date!(2024 - 03 - 01));
        assert_eq!(window.cells().len(), 35);
        window.week_backwards().unwrap();
        assert_eq!(window.selected(), date!(2024 - 02 - 23));
        window.day_backwards().unwrap();
        window.week_forwards().unwrap();
        assert_eq!(window.selected(), date!(2024 - 02 - 29));
    }

    #[test]
    fn test_jump_to_today() {
        let mut window =
            MonthWindow::new(date!(2026 - 10 - 18), Weekday::Sunday).start_date(date!(1990 - 03 - 03));
        window.jump_to_today();
        assert_eq!(window.selected(), date!(2026 - 10 - 18));
    }

    #[test]
    fn test_end_of_time() {
        let mut window = MonthWindow::new(date!(9999 - 12 - 31), Weekday::Sunday);
        assert_eq!(window.day_forwards(), Err(OutOfTimeError));
        assert_eq!(window.next_month(), Err(OutOfTimeError));
        assert_eq!(window.selected(), date!(9999 - 12 - 31));
    }
}
