//! Bookable slots for a given day and the 12h/24h label formatter.

use crate::domain::model::{ClosedDays, TimeFormat, TimeSlot};
use crate::utils::error::{BookingError, Result};
use chrono::{Datelike, NaiveDate};

/// First slot of the day, 09:00.
pub const FIRST_SLOT_MINUTES: u16 = 9 * 60;
/// Last slot of the day, 17:30.
pub const LAST_SLOT_MINUTES: u16 = 17 * 60 + 30;
pub const SLOT_LENGTH_MINUTES: u16 = 30;
pub const SLOTS_PER_DAY: usize =
    ((LAST_SLOT_MINUTES - FIRST_SLOT_MINUTES) / SLOT_LENGTH_MINUTES) as usize + 1;

/// Slots for `date`, ascending. Empty on closed weekdays.
pub fn slots_for(date: NaiveDate, closed_days: &ClosedDays, format: TimeFormat) -> Vec<TimeSlot> {
    if closed_days.contains(date.weekday()) {
        return Vec::new();
    }

    (0..SLOTS_PER_DAY)
        .map(|order| {
            let minutes = FIRST_SLOT_MINUTES + order as u16 * SLOT_LENGTH_MINUTES;
            TimeSlot::new(minutes, format_minutes(minutes, format), order)
        })
        .collect()
}

/// The slot on `date` whose start matches `label`, if it is bookable.
pub fn find_slot(
    date: NaiveDate,
    closed_days: &ClosedDays,
    format: TimeFormat,
    label: &str,
) -> Option<TimeSlot> {
    let minutes = parse_label(label).ok()?;
    slots_for(date, closed_days, format)
        .into_iter()
        .find(|slot| slot.minutes() == minutes)
}

pub fn format_minutes(minutes: u16, format: TimeFormat) -> String {
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    match format {
        TimeFormat::TwentyFourHour => format!("{:02}:{:02}", hours, mins),
        TimeFormat::TwelveHour => {
            let suffix = if hours < 12 { "am" } else { "pm" };
            let hours = match hours % 12 {
                0 => 12,
                h => h,
            };
            format!("{:02}:{:02}{}", hours, mins, suffix)
        }
    }
}

/// Minutes since midnight for a `"hh:mm"` or `"hh:mmam"`/`"hh:mmpm"` label.
pub fn parse_label(label: &str) -> Result<u16> {
    let normalized = label.trim().to_ascii_lowercase();
    let invalid = |reason: &str| BookingError::InvalidTimeLabel {
        label: label.to_string(),
        reason: reason.to_string(),
    };

    let (clock, meridiem) = if let Some(rest) = normalized.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = normalized.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (normalized.as_str(), None)
    };

    let (hours, minutes) = clock
        .split_once(':')
        .ok_or_else(|| invalid("expected hh:mm"))?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return Err(invalid("expected hh:mm"));
    }
    // u16::parse 會接受前置 '+'，先擋掉
    if !hours.bytes().all(|b| b.is_ascii_digit()) || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected digits only"));
    }
    let hours: u16 = hours.parse().map_err(|_| invalid("hour is not a number"))?;
    let minutes: u16 = minutes
        .parse()
        .map_err(|_| invalid("minutes are not a number"))?;
    if minutes > 59 {
        return Err(invalid("minutes must be below 60"));
    }

    let hours = match meridiem {
        None if hours > 23 => return Err(invalid("hour must be below 24")),
        None => hours,
        Some(_) if hours == 0 || hours > 12 => {
            return Err(invalid("hour must be between 1 and 12"))
        }
        // 12:xxam is just after midnight, 12:xxpm is just after noon
        Some(false) => hours % 12,
        Some(true) => hours % 12 + 12,
    };

    Ok(hours * 60 + minutes)
}

pub fn to_24h(label: &str) -> Result<String> {
    Ok(format_minutes(parse_label(label)?, TimeFormat::TwentyFourHour))
}

pub fn to_12h(label: &str) -> Result<String> {
    Ok(format_minutes(parse_label(label)?, TimeFormat::TwelveHour))
}
