//! Month grid construction and the calendar arithmetic behind it.
//!
//! Everything here works on plain year/month/day integers and never reads
//! the wall clock, so leap years and year rollovers can be tested directly.

use crate::utils::error::{BookingError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 if is_leap_year(year) => Ok(29),
        2 => Ok(28),
        _ => Err(BookingError::InvalidMonth { year, month }),
    }
}

/// Column of `day` in a week that begins on `week_start` (0-based).
pub fn weekday_index(day: Weekday, week_start: Weekday) -> u32 {
    (7 + day.num_days_from_monday() - week_start.num_days_from_monday()) % 7
}

/// Shift `(year, month)` by `offset` whole months. The year saturates at
/// the `i32` limits instead of wrapping.
pub fn navigate(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let total = (i64::from(year) * 12 + (i64::from(month) - 1) + i64::from(offset))
        .clamp(i64::from(i32::MIN) * 12, i64::from(i32::MAX) * 12 + 11);
    let year = total.div_euclid(12) as i32;
    let month = total.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Column headers for a week beginning on `week_start`, e.g. `SUN`..`SAT`.
pub fn weekday_headers(week_start: Weekday) -> [&'static str; 7] {
    let mut headers = [""; 7];
    let mut day = week_start;
    for header in headers.iter_mut() {
        *header = match day {
            Weekday::Mon => "MON",
            Weekday::Tue => "TUE",
            Weekday::Wed => "WED",
            Weekday::Thu => "THU",
            Weekday::Fri => "FRI",
            Weekday::Sat => "SAT",
            Weekday::Sun => "SUN",
        };
        day = day.succ();
    }
    headers
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CalendarMonth {
    year: i32,
    month: u32,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(BookingError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn shifted(&self, offset: i32) -> Self {
        let (year, month) = navigate(self.year, self.month, offset);
        Self { year, month }
    }

    pub fn first_day(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or(BookingError::InvalidMonth {
            year: self.year,
            month: self.month,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// `"October 2026"`
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn grid(&self, week_start: Weekday) -> Result<CalendarGrid> {
        let first = self.first_day()?;
        let leading = weekday_index(first.weekday(), week_start) as usize;
        let day_count = days_in_month(self.year, self.month)?;

        let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
        cells.extend(first.iter_days().take(day_count as usize).map(Some));

        // pad the last row so every row has seven cells
        let trailing = (7 - cells.len() % 7) % 7;
        cells.extend(std::iter::repeat(None).take(trailing));

        Ok(CalendarGrid {
            month: *self,
            week_start,
            leading,
            cells,
        })
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Row-major month grid. `None` cells are padding before day 1 and after
/// the last day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    month: CalendarMonth,
    week_start: Weekday,
    leading: usize,
    cells: Vec<Option<NaiveDate>>,
}

impl CalendarGrid {
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn cells(&self) -> &[Option<NaiveDate>] {
        &self.cells
    }

    pub fn leading_padding(&self) -> usize {
        self.leading
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().flatten().copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<NaiveDate>]> {
        self.cells.chunks(7)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Grid for `(year, month)` with weeks starting on Sunday.
pub fn build(year: i32, month: u32) -> Result<CalendarGrid> {
    CalendarMonth::new(year, month)?.grid(Weekday::Sun)
}
