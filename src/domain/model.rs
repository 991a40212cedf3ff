use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Display format for slot labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `"09:00am"` .. `"05:30pm"`
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    /// `"09:00"` .. `"17:30"`
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::TwelveHour => write!(f, "12h"),
            TimeFormat::TwentyFourHour => write!(f, "24h"),
        }
    }
}

impl FromStr for TimeFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "12h" | "12" => Ok(TimeFormat::TwelveHour),
            "24h" | "24" => Ok(TimeFormat::TwentyFourHour),
            other => Err(format!("unknown time format '{}', expected 12h or 24h", other)),
        }
    }
}

/// A bookable 30-minute slot.
///
/// Two slots are equal when they start at the same minute of the day,
/// regardless of the label format they were rendered with.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSlot {
    minutes: u16,
    label: String,
    order: usize,
}

impl TimeSlot {
    pub(crate) fn new(minutes: u16, label: String, order: usize) -> Self {
        Self {
            minutes,
            label,
            order,
        }
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn order(&self) -> usize {
        self.order
    }
}

impl PartialEq for TimeSlot {
    fn eq(&self, other: &Self) -> bool {
        self.minutes == other.minutes
    }
}

impl Eq for TimeSlot {}

impl Hash for TimeSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.minutes.hash(state);
    }
}

impl PartialOrd for TimeSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.minutes.cmp(&other.minutes)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Weekdays on which no slots are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct ClosedDays(u8);

impl ClosedDays {
    pub fn none() -> Self {
        Self(0)
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Closed weekdays, Monday first.
    pub fn days(&self) -> Vec<Weekday> {
        let mut day = Weekday::Mon;
        let mut days = Vec::new();
        for _ in 0..7 {
            if self.contains(day) {
                days.push(day);
            }
            day = day.succ();
        }
        days
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

impl Default for ClosedDays {
    fn default() -> Self {
        Self::from_iter([Weekday::Sun])
    }
}

impl FromIterator<Weekday> for ClosedDays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut closed = Self::none();
        for day in iter {
            closed.insert(day);
        }
        closed
    }
}

impl From<Vec<Weekday>> for ClosedDays {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<ClosedDays> for Vec<Weekday> {
    fn from(closed: ClosedDays) -> Self {
        closed.days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    #[default]
    Selection,
    Details,
    Success,
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStep::Selection => write!(f, "selection"),
            BookingStep::Details => write!(f, "details"),
            BookingStep::Success => write!(f, "success"),
        }
    }
}

/// The date and slot picked so far. A time is only ever held together
/// with the date whose slot list it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingSelection {
    date: Option<NaiveDate>,
    time: Option<TimeSlot>,
}

impl BookingSelection {
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn time(&self) -> Option<&TimeSlot> {
        self.time.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }

    pub(crate) fn pick_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
        self.time = None;
    }

    pub(crate) fn pick_time(&mut self, slot: TimeSlot) {
        if self.date.is_some() {
            self.time = Some(slot);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Note,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub note: String,
}

impl ContactDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Note => &self.note,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Note => self.note = value,
        }
    }

    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            note: self.note.trim().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.note.is_empty()
    }
}
