pub mod calendar;
pub mod flow;
pub mod form;
pub mod inquiry;
pub mod payload;
pub mod slots;

pub use crate::domain::model::{
    BookingSelection, BookingStep, ClosedDays, ContactDetails, ContactField, TimeFormat, TimeSlot,
};
pub use crate::domain::ports::{Clock, InquiryNotifier, OutboundNotifier};
pub use crate::utils::error::Result;
