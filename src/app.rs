use crate::add_form::{AddForm, AddFormState, FormInput, FormOutput};
use crate::birthday::BirthdayRecord;
use crate::calendar::{MonthCalendar, MonthWindow};
use crate::detail::{DetailSheet, DetailState};
use crate::help::Help;
use crate::list::{BirthdayList, ListState};
use crate::store::{BirthdayStore, KeyValueStore, StoreError};
use crate::theme::{BASE_STYLE, DIM_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};

const HINT: &str = "?: help   a: add   b: all birthdays   q: quit";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<K> {
    window: MonthWindow,
    store: BirthdayStore<K>,
    state: AppState,
    /// Last error to show at the bottom of the screen
    status: Option<String>,
}

impl<K: KeyValueStore> App<K> {
    pub(crate) fn new(window: MonthWindow, store: BirthdayStore<K>) -> App<K> {
        App {
            window,
            store,
            state: AppState::Calendar,
            status: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        log::info!("Quitting with {} birthdays stored", self.store.len());
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => self.calendar_key(key),
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Adding(_) => self.form_key(key),
            AppState::Detail(_) => self.detail_key(key),
            AppState::Listing(_) => self.list_key(key),
            AppState::Quitting => false,
        }
    }

    fn calendar_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('h') | KeyCode::Left => self.window.day_backwards().is_ok(),
            KeyCode::Char('l') | KeyCode::Right => self.window.day_forwards().is_ok(),
            KeyCode::Char('k') | KeyCode::Up => self.window.week_backwards().is_ok(),
            KeyCode::Char('j') | KeyCode::Down => self.window.week_forwards().is_ok(),
            KeyCode::Char('p') | KeyCode::PageUp => self.window.previous_month().is_ok(),
            KeyCode::Char('n') | KeyCode::PageDown => self.window.next_month().is_ok(),
            KeyCode::Char('0') | KeyCode::Home => {
                self.window.jump_to_today();
                true
            }
            KeyCode::Enter => {
                self.state = AppState::Detail(DetailState::new(self.window.selected()));
                true
            }
            KeyCode::Char('a') => {
                self.state = AppState::Adding(AddFormState::new(self.window.selected()));
                true
            }
            KeyCode::Char('b') => {
                self.state = AppState::Listing(ListState::new());
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Quitting;
                true
            }
            KeyCode::Char('?') => {
                self.state = AppState::Helping;
                true
            }
            _ => false,
        }
    }

    fn form_key(&mut self, key: KeyCode) -> bool {
        let input = match key {
            KeyCode::Esc => {
                self.state = AppState::Calendar;
                return true;
            }
            KeyCode::Char(c) => FormInput::Char(c),
            KeyCode::Backspace | KeyCode::Delete => FormInput::Backspace,
            KeyCode::Tab | KeyCode::Down => FormInput::NextField,
            KeyCode::BackTab | KeyCode::Up => FormInput::PreviousField,
            KeyCode::Enter => FormInput::Submit,
            _ => return false,
        };
        let AppState::Adding(form) = &mut self.state else {
            return false;
        };
        match form.handle_input(input) {
            FormOutput::Ok => true,
            FormOutput::Invalid => false,
            FormOutput::Save(record) => {
                self.state = AppState::Calendar;
                self.add(record);
                true
            }
        }
    }

    fn detail_key(&mut self, key: KeyCode) -> bool {
        let AppState::Detail(detail) = &mut self.state else {
            return false;
        };
        match key {
            KeyCode::Char('j') | KeyCode::Down => detail.move_down(&self.store),
            KeyCode::Char('k') | KeyCode::Up => detail.move_up(),
            KeyCode::Char('d') | KeyCode::Delete => {
                let Some(offset) = detail.highlighted_offset(&self.store) else {
                    return false;
                };
                let removed = self.remove(offset);
                if let AppState::Detail(detail) = &mut self.state {
                    detail.after_removal(&self.store);
                }
                removed
            }
            KeyCode::Char('a') => {
                self.state = AppState::Adding(AddFormState::new(detail.date()));
                true
            }
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                self.state = AppState::Calendar;
                true
            }
            _ => false,
        }
    }

    fn list_key(&mut self, key: KeyCode) -> bool {
        let AppState::Listing(list) = &mut self.state else {
            return false;
        };
        match key {
            KeyCode::Char('j') | KeyCode::Down => list.move_down(&self.store),
            KeyCode::Char('k') | KeyCode::Up => list.move_up(),
            KeyCode::Char('d') | KeyCode::Delete => {
                let offset = list.highlighted();
                if offset >= self.store.len() {
                    return false;
                }
                let removed = self.remove(offset);
                if let AppState::Listing(list) = &mut self.state {
                    list.after_removal(&self.store);
                }
                removed
            }
            // Go to a day the birthday is listed on, which for February 29
            // may be years off
            KeyCode::Enter => {
                let Some(next) = self
                    .store
                    .all()
                    .get(list.highlighted())
                    .and_then(|r| r.next_matching_day(self.window.today()))
                else {
                    return false;
                };
                self.window.select(next);
                self.state = AppState::Detail(DetailState::new(next));
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state = AppState::Calendar;
                true
            }
            _ => false,
        }
    }

    fn add(&mut self, record: BirthdayRecord) {
        match self.store.add(record) {
            Ok(()) => self.status = None,
            Err(e) => self.report(e),
        }
    }

    // Returns `false` if nothing was removed
    fn remove(&mut self, offset: usize) -> bool {
        match self.store.remove(&[offset]) {
            Ok(()) => {
                self.status = None;
                true
            }
            Err(e @ StoreError::Persistence(_)) => {
                self.report(e);
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn report(&mut self, e: StoreError) {
        self.status = Some(format!("Warning: {:#}", anyhow::Error::new(e)));
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<K: KeyValueStore> Widget for &App<K> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        MonthCalendar::new(&self.window, &self.store).render(cal_area, buf);
        let status = match self.status {
            Some(ref msg) => Line::styled(msg.as_str(), STATUS_STYLE),
            None => Line::styled(HINT, DIM_STYLE),
        };
        status.render(status_area, buf);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::Adding(ref form) => AddForm(form).render(area, buf),
            AppState::Detail(ref detail) => DetailSheet::new(&self.store, detail).render(area, buf),
            AppState::Listing(ref list) => {
                BirthdayList::new(&self.store, self.window.today(), list).render(area, buf);
            }
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Adding(AddFormState),
    Detail(DetailState),
    Listing(ListState),
    Quitting,
}
