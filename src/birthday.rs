use serde::{Deserialize, Serialize};
use time::{Date, Month};
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct BirthdayRecord {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    #[serde(with = "iso_date")]
    pub(crate) date: Date,
    #[serde(default)]
    pub(crate) notes: String,
}

impl BirthdayRecord {
    pub(crate) fn new(name: String, date: Date, notes: String) -> BirthdayRecord {
        BirthdayRecord {
            id: Uuid::new_v4(),
            name,
            date,
            notes,
        }
    }

    pub(crate) fn notes(&self) -> Option<&str> {
        (!self.notes.is_empty()).then_some(self.notes.as_str())
    }

    /// Does this birthday fall on the same month and day as `date`, regardless
    /// of year?
    pub(crate) fn falls_on(&self, date: Date) -> bool {
        self.date.month() == date.month() && self.date.day() == date.day()
    }

    /// The date on which this birthday is celebrated in `year`.  A February 29
    /// birthday is celebrated on March 1 in common years.
    fn occurrence_in(&self, year: i32) -> Option<Date> {
        match Date::from_calendar_date(year, self.date.month(), self.date.day()) {
            Ok(d) => Some(d),
            Err(_) if self.date.month() == Month::February && self.date.day() == 29 => {
                Date::from_calendar_date(year, Month::March, 1).ok()
            }
            Err(_) => None,
        }
    }

    /// The first date on or after `today` with the same month and day as the
    /// birthday.  For February 29 this skips ahead to the next leap year.
    pub(crate) fn next_matching_day(&self, today: Date) -> Option<Date> {
        // Leap years are never more than eight years apart
        (0..=8)
            .filter_map(|n| today.year().checked_add(n))
            .filter_map(|year| Date::from_calendar_date(year, self.date.month(), self.date.day()).ok())
            .find(|&d| d >= today)
    }

    /// The first celebration of this birthday on or after `today`.  Returns
    /// `None` if that would be past the last representable year.
    pub(crate) fn next_occurrence(&self, today: Date) -> Option<Date> {
        match self.occurrence_in(today.year()) {
            Some(d) if d >= today => Some(d),
            _ => self.occurrence_in(today.year().checked_add(1)?),
        }
    }

    /// Number of birthdays had as of `today`
    pub(crate) fn age_in_years(&self, today: Date) -> i32 {
        let age = today.year() - self.date.year();
        let today_md = (u8::from(today.month()), today.day());
        let birth_md = (u8::from(self.date.month()), self.date.day());
        if today_md < birth_md {
            age - 1
        } else {
            age
        }
    }

    /// The age reached at the next occurrence on or after `on`
    pub(crate) fn turning_age(&self, on: Date) -> Option<i32> {
        self.next_occurrence(on)
            .map(|d| d.year() - self.date.year())
    }
}

/// Dates are written as `YYYY-MM-DD`.  Reading additionally accepts RFC 3339
/// timestamps, of which only the date is kept.
mod iso_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::{
        format_description::{well_known::Rfc3339, FormatItem},
        macros::format_description,
        Date, OffsetDateTime,
    };

    static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

    pub(super) fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let s = date
            .format(&YMD_FMT)
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let s = String::deserialize(deserializer)?;
        if let Ok(d) = Date::parse(&s, &YMD_FMT) {
            return Ok(d);
        }
        OffsetDateTime::parse(&s, &Rfc3339)
            .map(OffsetDateTime::date)
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&s), &"a YYYY-MM-DD date"))
    }
}
