use booking_core::adapters::mailto_link;
use booking_core::core::inquiry::{Budget, Interest, InquiryForm};
use booking_core::{
    BookingFlowController, BookingRecord, ContactField, FixedClock, FlowRules, MailtoNotifier,
    MemoryNotifier, MessageTemplate, OutboundNotifier,
};
#[cfg(feature = "webhook")]
use booking_core::WebhookNotifier;
use chrono::{NaiveDate, NaiveDateTime};
#[cfg(feature = "webhook")]
use httpmock::prelude::*;
#[cfg(feature = "webhook")]
use std::sync::Arc;
#[cfg(feature = "webhook")]
use std::time::Duration;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap()
}

fn rules() -> FlowRules {
    FlowRules {
        template: MessageTemplate {
            recipient: "host@studio.dev".to_string(),
            host_name: "Fazil".to_string(),
            meeting_title: "30 Min Strategy Call".to_string(),
        },
        ..FlowRules::default()
    }
}

fn book<N: OutboundNotifier>(notifier: N) -> BookingFlowController<N, FixedClock> {
    let mut controller = BookingFlowController::new(rules(), notifier, FixedClock::new(now()));
    controller.select_date(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    controller.select_time("10:00am");
    controller.edit_contact(ContactField::Name, "Ann");
    controller.edit_contact(ContactField::Email, "ann@x.com");
    controller.submit();
    controller
}

fn booked_record() -> BookingRecord {
    let notifier = MemoryNotifier::new();
    book(notifier.clone());
    notifier.bookings().remove(0)
}

#[test]
fn test_mailto_link_encoding() {
    let link = mailto_link(&booked_record());

    assert!(link.starts_with("mailto:host@studio.dev?subject="));
    assert!(link.contains("subject=New%20Meeting%20Booking%3A%2030%20Min%20Strategy%20Call%20-%20Ann"));
    assert!(link.contains("&body=Hello%20Fazil%2C%0A%0A"));
    assert!(link.contains("Time%3A%2010%3A00am"));
    assert!(link.contains("No%20notes%20provided."));
    assert!(!link.contains('+'));
    assert!(!link.contains(' '));
}

#[test]
fn test_mailto_notifier_writes_link_to_sink() {
    let notifier = MailtoNotifier::new(Vec::new());
    let record = booked_record();
    let expected = mailto_link(&record);

    notifier.send(record);

    let written = String::from_utf8(notifier.into_inner()).unwrap();
    assert_eq!(written, format!("{}\n", expected));
}

#[test]
fn test_inquiry_goes_to_its_own_notifier() {
    let notifier = MemoryNotifier::new();
    let mut form = InquiryForm {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        interest: Some(Interest::AutomationWorkflow),
        budget: None,
        message: "Automate our invoicing".to_string(),
    };

    assert!(!form.submit_to(now(), &notifier));
    form.budget = Some(Budget::Under50k);
    assert!(form.submit_to(now(), &notifier));

    let sent = notifier.inquiries();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].budget, Budget::Under50k);
    assert!(notifier.bookings().is_empty());
    assert_eq!(form, InquiryForm::default());
}

#[cfg(feature = "webhook")]
#[tokio::test]
async fn test_webhook_posts_booking_json() {
    let server = MockServer::start_async().await;
    let hook = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/hooks/booking")
                .header("content-type", "application/json")
                .body_contains("\"name\":\"Ann\"")
                .body_contains("\"time\":\"10:00am\"")
                .body_contains("\"date\":\"2026-10-19\"")
                .body_contains("New Meeting Booking: 30 Min Strategy Call - Ann");
            then.status(204);
        })
        .await;

    let notifier =
        Arc::new(WebhookNotifier::new(server.url("/hooks/booking"), Duration::from_secs(5)).unwrap());
    let controller = book(Arc::clone(&notifier));
    assert_eq!(controller.step(), booking_core::BookingStep::Success);

    notifier.flush().await;
    hook.assert_async().await;
    assert_eq!(notifier.pending(), 0);
}

#[cfg(feature = "webhook")]
#[tokio::test]
async fn test_webhook_failure_does_not_affect_flow() {
    let server = MockServer::start_async().await;
    let hook = server
        .mock_async(|when, then| {
            when.method(POST).path("/hooks/down");
            then.status(500);
        })
        .await;

    let notifier =
        Arc::new(WebhookNotifier::new(server.url("/hooks/down"), Duration::from_secs(5)).unwrap());
    let controller = book(Arc::clone(&notifier));
    assert_eq!(controller.step(), booking_core::BookingStep::Success);

    notifier.flush().await;
    hook.assert_async().await;
}

#[cfg(feature = "webhook")]
#[test]
fn test_webhook_requires_runtime_and_valid_url() {
    assert!(WebhookNotifier::new("https://hooks.example.com", Duration::from_secs(5)).is_err());

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let _guard = runtime.enter();
    assert!(WebhookNotifier::new("not a url", Duration::from_secs(5)).is_err());
    assert!(WebhookNotifier::new("https://hooks.example.com", Duration::from_secs(5)).is_ok());
}
