use crate::core::inquiry::InquiryRecord;
use crate::core::payload::BookingRecord;
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Delivers a finished booking to a human recipient.
///
/// Fire-and-forget: the flow hands the record over and moves on. Delivery
/// failures are the notifier's own business.
pub trait OutboundNotifier: Send + Sync {
    fn send(&self, record: BookingRecord);
}

pub trait InquiryNotifier: Send + Sync {
    fn send_inquiry(&self, record: InquiryRecord);
}

/// Local wall-clock time. Injected so the flow never reads ambient time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

impl<N: OutboundNotifier + ?Sized> OutboundNotifier for Arc<N> {
    fn send(&self, record: BookingRecord) {
        (**self).send(record)
    }
}

impl<N: OutboundNotifier + ?Sized> OutboundNotifier for Box<N> {
    fn send(&self, record: BookingRecord) {
        (**self).send(record)
    }
}

impl<N: InquiryNotifier + ?Sized> InquiryNotifier for Arc<N> {
    fn send_inquiry(&self, record: InquiryRecord) {
        (**self).send_inquiry(record)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
