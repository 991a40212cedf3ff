pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::{BookingConfig, NotifierKind};

#[cfg(feature = "webhook")]
pub use crate::adapters::WebhookNotifier;
pub use crate::adapters::{FixedClock, MailtoNotifier, MemoryNotifier, SystemClock};
pub use crate::core::flow::{reduce, Action, BookingFlowController, BookingState, FlowRules, Transition};
pub use crate::core::payload::{BookingRecord, MessageTemplate};
pub use crate::domain::model::{BookingStep, ClosedDays, ContactDetails, ContactField, TimeFormat, TimeSlot};
pub use crate::domain::ports::{Clock, InquiryNotifier, OutboundNotifier};
pub use crate::utils::error::{BookingError, Result};
