use crate::core::form;
use crate::domain::model::{BookingSelection, ContactDetails};
use crate::utils::error::{BookingError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub const NOTE_PLACEHOLDER: &str = "No notes provided.";
const RULE: &str = "--------------------------------";

/// Who a booking is addressed to and how the meeting is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub recipient: String,
    pub host_name: String,
    pub meeting_title: String,
}

impl Default for MessageTemplate {
    fn default() -> Self {
        Self {
            recipient: "bookings@example.com".to_string(),
            host_name: "team".to_string(),
            meeting_title: "30 Min Strategy Call".to_string(),
        }
    }
}

/// A confirmed booking, ready to hand to an outbound notifier.
///
/// Built once by [`assemble`] and never modified afterwards; every field
/// is read through an accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRecord {
    date: NaiveDate,
    date_label: String,
    time: String,
    name: String,
    email: String,
    note: Option<String>,
    generated_at: NaiveDateTime,
    recipient: String,
    host_name: String,
    meeting_title: String,
}

impl BookingRecord {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// e.g. `"Monday, October 19, 2026"`
    pub fn date_label(&self) -> &str {
        &self.date_label
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn generated_at(&self) -> NaiveDateTime {
        self.generated_at
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn meeting_title(&self) -> &str {
        &self.meeting_title
    }

    pub fn subject(&self) -> String {
        format!("New Meeting Booking: {} - {}", self.meeting_title, self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "Hello {host},\n\n\
             A new {title} has been requested through your website.\n\n\
             DETAILS:\n{rule}\n\
             Name: {name}\n\
             Email: {email}\n\
             Date: {date}\n\
             Time: {time}\n\n\
             CLIENT NOTE:\n{rule}\n\
             {note}\n\n\
             {rule}\n\
             Please confirm this appointment with the client.",
            host = self.host_name,
            title = self.meeting_title,
            rule = RULE,
            name = self.name,
            email = self.email,
            date = self.date_label,
            time = self.time,
            note = self.note().unwrap_or(NOTE_PLACEHOLDER),
        )
    }

    /// e.g. `"Oct 19, 10:00am"`
    pub fn short_summary(&self) -> String {
        format!("{}, {}", self.date.format("%b %-d"), self.time)
    }
}

/// Combine a complete selection and valid contact details into a record.
///
/// Callers are expected to check [`BookingSelection::is_complete`] and
/// [`form::is_submittable`] first; unmet preconditions are reported as
/// [`BookingError::IncompleteBooking`].
pub fn assemble(
    selection: &BookingSelection,
    contact: &ContactDetails,
    now: NaiveDateTime,
    template: &MessageTemplate,
) -> Result<BookingRecord> {
    let date = selection.date().ok_or_else(|| BookingError::IncompleteBooking {
        missing: "date".to_string(),
    })?;
    let time = selection.time().ok_or_else(|| BookingError::IncompleteBooking {
        missing: "time".to_string(),
    })?;

    let missing = form::missing_fields(contact);
    if !missing.is_empty() {
        return Err(BookingError::IncompleteBooking {
            missing: missing.join(", "),
        });
    }

    let contact = contact.trimmed();
    let note = Some(contact.note).filter(|note| !note.is_empty());

    Ok(BookingRecord {
        date,
        date_label: date.format("%A, %B %-d, %Y").to_string(),
        time: time.label().to_string(),
        name: contact.name,
        email: contact.email,
        note,
        generated_at: now,
        recipient: template.recipient.trim().to_string(),
        host_name: template.host_name.clone(),
        meeting_title: template.meeting_title.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slots;
    use crate::domain::model::{ClosedDays, TimeFormat};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    fn selection() -> BookingSelection {
        let mut selection = BookingSelection::default();
        selection.pick_date(monday());
        let slot = slots::find_slot(monday(), &ClosedDays::default(), TimeFormat::TwelveHour, "10:00am")
            .unwrap();
        selection.pick_time(slot);
        selection
    }

    #[test]
    fn test_assemble_trims_contact_fields() {
        let contact = ContactDetails::new("  Ann ", "ann@x.com ").with_note("  Landing page ");
        let record = assemble(&selection(), &contact, now(), &MessageTemplate::default()).unwrap();

        assert_eq!(record.date(), monday());
        assert_eq!(record.date_label(), "Monday, October 19, 2026");
        assert_eq!(record.time(), "10:00am");
        assert_eq!(record.name(), "Ann");
        assert_eq!(record.email(), "ann@x.com");
        assert_eq!(record.note(), Some("Landing page"));
        assert_eq!(record.generated_at(), now());
        assert_eq!(record.short_summary(), "Oct 19, 10:00am");
    }

    #[test]
    fn test_subject_and_body() {
        let template = MessageTemplate {
            recipient: "host@studio.dev".to_string(),
            host_name: "Fazil".to_string(),
            meeting_title: "30 Min Strategy Call".to_string(),
        };
        let record = assemble(&selection(), &ContactDetails::new("Ann", "ann@x.com"), now(), &template)
            .unwrap();

        assert_eq!(record.recipient(), "host@studio.dev");
        assert_eq!(record.subject(), "New Meeting Booking: 30 Min Strategy Call - Ann");
        let body = record.body();
        assert!(body.starts_with("Hello Fazil,"));
        assert!(body.contains("Name: Ann\n"));
        assert!(body.contains("Email: ann@x.com\n"));
        assert!(body.contains("Date: Monday, October 19, 2026\n"));
        assert!(body.contains("Time: 10:00am\n"));
        assert!(body.contains(NOTE_PLACEHOLDER));
        assert!(body.ends_with("Please confirm this appointment with the client."));
    }

    #[test]
    fn test_blank_note_becomes_none() {
        let contact = ContactDetails::new("Ann", "ann@x.com").with_note(" \n ");
        let record = assemble(&selection(), &contact, now(), &MessageTemplate::default()).unwrap();
        assert_eq!(record.note(), None);
    }

    #[test]
    fn test_unmet_preconditions_are_errors() {
        let contact = ContactDetails::new("Ann", "ann@x.com");
        let empty = BookingSelection::default();
        assert!(matches!(
            assemble(&empty, &contact, now(), &MessageTemplate::default()),
            Err(BookingError::IncompleteBooking { missing }) if missing == "date"
        ));

        let mut date_only = BookingSelection::default();
        date_only.pick_date(monday());
        assert!(matches!(
            assemble(&date_only, &contact, now(), &MessageTemplate::default()),
            Err(BookingError::IncompleteBooking { missing }) if missing == "time"
        ));

        let no_email = ContactDetails::new("Ann", "");
        assert!(matches!(
            assemble(&selection(), &no_email, now(), &MessageTemplate::default()),
            Err(BookingError::IncompleteBooking { missing }) if missing == "email"
        ));
    }
}
