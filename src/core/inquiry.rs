//! The secondary lead-capture form. It is independent of the booking flow
//! and stricter: every field is required.

use crate::domain::ports::InquiryNotifier;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Interest {
    AutomationWorkflow,
    StaticWebsiteSeo,
    MobileApps,
    FullStackWeb,
    UiUxDesign,
    AllServices,
}

impl Interest {
    pub const ALL: [Interest; 6] = [
        Interest::AutomationWorkflow,
        Interest::StaticWebsiteSeo,
        Interest::MobileApps,
        Interest::FullStackWeb,
        Interest::UiUxDesign,
        Interest::AllServices,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Interest::AutomationWorkflow => "Automation Workflow",
            Interest::StaticWebsiteSeo => "Static Website & SEO",
            Interest::MobileApps => "Cross & Native Mobile Apps",
            Interest::FullStackWeb => "Full Stack Web Development",
            Interest::UiUxDesign => "UI/UX Design",
            Interest::AllServices => "All Services",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Budget {
    Under50k,
    From50kTo2L,
    From2LTo5L,
    From5LTo10LPlus,
}

impl Budget {
    pub const ALL: [Budget; 4] = [
        Budget::Under50k,
        Budget::From50kTo2L,
        Budget::From2LTo5L,
        Budget::From5LTo10LPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Under50k => "Under ₹50,000",
            Budget::From50kTo2L => "₹50,000 - ₹2L",
            Budget::From2LTo5L => "₹2L - ₹5L",
            Budget::From5LTo10LPlus => "₹5L - ₹10L+",
        }
    }
}

macro_rules! label_enum_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let wanted = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|item| item.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        let options: Vec<&str> = $ty::ALL.iter().map(|item| item.label()).collect();
                        format!("unknown option '{}', expected one of: {}", wanted, options.join(", "))
                    })
            }
        }
    };
}

label_enum_impls!(Interest);
label_enum_impls!(Budget);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryRecord {
    pub name: String,
    pub email: String,
    pub interest: Interest,
    pub budget: Budget,
    pub message: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub interest: Option<Interest>,
    pub budget: Option<Budget>,
    pub message: String,
}

impl InquiryForm {
    pub fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && self.interest.is_some()
            && self.budget.is_some()
            && !self.message.trim().is_empty()
    }

    /// Take the form contents as a record and clear the form. Returns
    /// `None` and leaves the form untouched when a field is missing.
    pub fn submit(&mut self, now: NaiveDateTime) -> Option<InquiryRecord> {
        if !self.is_submittable() {
            return None;
        }
        let interest = self.interest?;
        let budget = self.budget?;
        let form = std::mem::take(self);

        Some(InquiryRecord {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            interest,
            budget,
            message: form.message.trim().to_string(),
            submitted_at: now,
        })
    }

    /// Submit and hand the record to `notifier`. Returns whether anything
    /// was sent.
    pub fn submit_to<N: InquiryNotifier + ?Sized>(&mut self, now: NaiveDateTime, notifier: &N) -> bool {
        match self.submit(now) {
            Some(record) => {
                tracing::info!(
                    "📨 Inquiry from {} about {} ({})",
                    record.name,
                    record.interest,
                    record.budget
                );
                notifier.send_inquiry(record);
                true
            }
            None => false,
        }
    }
}
