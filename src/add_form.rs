use crate::birthday::BirthdayRecord;
use crate::date_input::DateInput;
use crate::popup::draw_frame;
use crate::theme::{form::ACTIVE_LABEL_STYLE, BASE_STYLE, DIM_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};
use time::Date;

const INNER_WIDTH: u16 = 36;
const INNER_HEIGHT: u16 = 6;
const LABEL_WIDTH: usize = 7;
const CURSOR: &str = "_";

/*
 * ........................................
 * .┌──────────── Add Birthday ──────────┐.
 * .│                                    │.
 * .│Name:  Alex_                        │.
 * .│Date:  1990-03-03                   │.
 * .│Notes:                              │.
 * .│                                    │.
 * .│    [ENTER] Save    [ESC] Cancel    │.
 * .└────────────────────────────────────┘.
 * ........................................
 */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct AddForm<'a>(pub(crate) &'a AddFormState);

impl Widget for AddForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = draw_frame(area, buf, "Add Birthday", INNER_WIDTH + 2, INNER_HEIGHT + 2);
        self.0.to_text(usize::from(inner.width)).render(inner, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Field {
    #[default]
    Name,
    Date,
    Notes,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Name => Field::Date,
            Field::Date | Field::Notes => Field::Notes,
        }
    }

    fn previous(self) -> Field {
        match self {
            Field::Name | Field::Date => Field::Name,
            Field::Notes => Field::Date,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct AddFormState {
    name: String,
    date: DateInput,
    notes: String,
    field: Field,
}

impl AddFormState {
    /// A blank form with the date field filled in with `date`
    pub(crate) fn new(date: Date) -> AddFormState {
        AddFormState {
            date: DateInput::from_date(date),
            ..AddFormState::default()
        }
    }

    pub(crate) fn handle_input(&mut self, input: FormInput) -> FormOutput {
        let ok = match (input, self.field) {
            (FormInput::Char(c), _) if c.is_control() => false,
            (FormInput::Char(c), Field::Name) => {
                self.name.push(c);
                true
            }
            (FormInput::Char(c), Field::Notes) => {
                self.notes.push(c);
                true
            }
            (FormInput::Char('-' | '/'), Field::Date) => true,
            (FormInput::Char(c), Field::Date) => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .is_some_and(|d| self.date.push(d)),
            (FormInput::Backspace, Field::Name) => self.name.pop().is_some(),
            (FormInput::Backspace, Field::Date) => self.date.backspace(),
            (FormInput::Backspace, Field::Notes) => self.notes.pop().is_some(),
            (FormInput::NextField, f) => {
                self.field = f.next();
                f != Field::Notes
            }
            (FormInput::PreviousField, f) => {
                self.field = f.previous();
                f != Field::Name
            }
            (FormInput::Submit, _) => return self.submit(),
        };
        if ok {
            FormOutput::Ok
        } else {
            FormOutput::Invalid
        }
    }

    fn submit(&mut self) -> FormOutput {
        let name = self.name.trim();
        if name.is_empty() {
            self.field = Field::Name;
            return FormOutput::Invalid;
        }
        let Some(date) = self.date.date() else {
            self.field = Field::Date;
            return FormOutput::Invalid;
        };
        FormOutput::Save(BirthdayRecord::new(
            name.to_owned(),
            date,
            self.notes.trim().to_owned(),
        ))
    }

    fn to_text(&self, width: usize) -> Text<'static> {
        let avail = width.saturating_sub(LABEL_WIDTH + CURSOR.len());
        Text::from_iter([
            Line::default(),
            self.text_line("Name:", Field::Name, &self.name, avail),
            {
                let mut line = self.label("Date:", Field::Date);
                line.extend(self.date.to_line().spans);
                line
            },
            self.text_line("Notes:", Field::Notes, &self.notes, avail),
            Line::default(),
            Line::from_iter([
                Span::styled("[ENTER]", BASE_STYLE),
                Span::styled(" Save    ", DIM_STYLE),
                Span::styled("[ESC]", BASE_STYLE),
                Span::styled(" Cancel", DIM_STYLE),
            ])
            .centered(),
        ])
    }

    fn label(&self, label: &'static str, field: Field) -> Line<'static> {
        let style = if self.field == field {
            ACTIVE_LABEL_STYLE
        } else {
            BASE_STYLE
        };
        Line::from_iter([
            Span::styled(label, style),
            Span::styled(" ".repeat(LABEL_WIDTH - label.len()), BASE_STYLE),
        ])
    }

    fn text_line(&self, label: &'static str, field: Field, value: &str, avail: usize) -> Line<'static> {
        let mut line = self.label(label, field);
        // Show the end of values too long to fit, since that's where typing
        // happens
        let skip = value.chars().count().saturating_sub(avail);
        line.push_span(Span::styled(
            value.chars().skip(skip).collect::<String>(),
            BASE_STYLE,
        ));
        if self.field == field {
            line.push_span(Span::styled(CURSOR, BASE_STYLE));
        }
        line
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FormInput {
    Char(char),
    Backspace,
    NextField,
    PreviousField,
    Submit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum FormOutput {
    Ok,
    Invalid,
    Save(BirthdayRecord),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn type_str(state: &mut AddFormState, s: &str) {
        for c in s.chars() {
            assert_eq!(state.handle_input(FormInput::Char(c)), FormOutput::Ok, "typing {c:?}");
        }
    }

    fn clear_date(state: &mut AddFormState) {
        while state.handle_input(FormInput::Backspace) == FormOutput::Ok {}
    }

    #[test]
    fn test_save() {
        let mut state = AddFormState::new(date!(2024 - 03 - 03));
        type_str(&mut state, "Alex ");
        state.handle_input(FormInput::NextField);
        state.handle_input(FormInput::NextField);
        type_str(&mut state, "likes cake");
        let FormOutput::Save(record) = state.handle_input(FormInput::Submit) else {
            panic!("form was not saved");
        };
        assert_eq!(record.name, "Alex");
        assert_eq!(record.date, date!(2024 - 03 - 03));
        assert_eq!(record.notes, "likes cake");
    }

    #[test]
    fn test_retype_date() {
        let mut state = AddFormState::new(date!(2024 - 03 - 03));
        type_str(&mut state, "Alex");
        assert_eq!(state.handle_input(FormInput::NextField), FormOutput::Ok);
        clear_date(&mut state);
        type_str(&mut state, "1990-03-03");
        let FormOutput::Save(record) = state.handle_input(FormInput::Submit) else {
            panic!("form was not saved");
        };
        assert_eq!(record.date, date!(1990 - 03 - 03));
        assert_eq!(record.notes, "");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut state = AddFormState::new(date!(2024 - 03 - 03));
        type_str(&mut state, "   ");
        state.handle_input(FormInput::NextField);
        assert_eq!(state.handle_input(FormInput::Submit), FormOutput::Invalid);
        assert_eq!(state.field, Field::Name);
    }

    #[test]
    fn test_incomplete_date_rejected() {
        let mut state = AddFormState::new(date!(2024 - 03 - 03));
        type_str(&mut state, "Alex");
        state.handle_input(FormInput::NextField);
        assert_eq!(state.handle_input(FormInput::Backspace), FormOutput::Ok);
        state.handle_input(FormInput::NextField);
        assert_eq!(state.handle_input(FormInput::Submit), FormOutput::Invalid);
        assert_eq!(state.field, Field::Date);
    }

    #[test]
    fn test_letters_rejected_in_date() {
        let mut state = AddFormState::new(date!(2024 - 03 - 03));
        state.handle_input(FormInput::NextField);
        clear_date(&mut state);
        assert_eq!(state.handle_input(FormInput::Char('x')), FormOutput::Invalid);
    }

    #[test]
    fn test_field_bounds() {
        let mut state = AddFormState::new(date!(2024 - 03 - 03));
        assert_eq!(state.handle_input(FormInput::PreviousField), FormOutput::Invalid);
        assert_eq!(state.handle_input(FormInput::NextField), FormOutput::Ok);
        assert_eq!(state.handle_input(FormInput::NextField), FormOutput::Ok);
        assert_eq!(state.handle_input(FormInput::NextField), FormOutput::Invalid);
        assert_eq!(state.field, Field::Notes);
    }

    #[test]
    fn test_render() {
        let mut state = AddFormState::new(date!(1990 - 03 - 03));
        type_str(&mut state, "Alex");
        let area = Rect::new(0, 0, 40, 10);
        let mut buffer = Buffer::empty(area);
        AddForm(&state).render(area, &mut buffer);
        let lines = (0..10)
            .map(|y| (0..40).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(lines[3], format!(" │Name:  Alex_{}│ ", " ".repeat(24)));
        assert_eq!(lines[4], format!(" │Date:  1990-03-03{}│ ", " ".repeat(19)));
        assert_eq!(lines[5], format!(" │Notes:{}│ ", " ".repeat(30)));
        assert_eq!(
            lines[7],
            format!(" │{0}[ENTER] Save    [ESC] Cancel{0}│ ", " ".repeat(4))
        );
        assert!(
            buffer[(2, 3)].modifier.contains(ratatui::style::Modifier::UNDERLINED),
            "active field label not underlined"
        );
    }
}
