use crate::core::inquiry::InquiryRecord;
use crate::core::payload::BookingRecord;
use crate::domain::ports::{InquiryNotifier, OutboundNotifier};
use std::sync::{Arc, Mutex};

/// Keeps everything it is sent. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    bookings: Arc<Mutex<Vec<BookingRecord>>>,
    inquiries: Arc<Mutex<Vec<InquiryRecord>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bookings(&self) -> Vec<BookingRecord> {
        self.bookings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn inquiries(&self) -> Vec<InquiryRecord> {
        self.inquiries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl OutboundNotifier for MemoryNotifier {
    fn send(&self, record: BookingRecord) {
        self.bookings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
    }
}

impl InquiryNotifier for MemoryNotifier {
    fn send_inquiry(&self, record: InquiryRecord) {
        self.inquiries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
    }
}
