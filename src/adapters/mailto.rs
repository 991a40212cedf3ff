use crate::core::payload::BookingRecord;
use crate::domain::ports::OutboundNotifier;
use std::io::{self, Write};
use std::sync::Mutex;
use url::form_urlencoded;

/// `mailto:` link that opens a prefilled message to the booking recipient.
pub fn mailto_link(record: &BookingRecord) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        record.recipient(),
        encode_component(&record.subject()),
        encode_component(&record.body())
    )
}

// mail clients do not decode '+' as a space
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Writes a `mailto:` link per booking to a sink; whatever reads the sink
/// (a browser shim, a terminal) is responsible for opening it.
pub struct MailtoNotifier<W: Write + Send> {
    sink: Mutex<W>,
}

impl MailtoNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> MailtoNotifier<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> OutboundNotifier for MailtoNotifier<W> {
    fn send(&self, record: BookingRecord) {
        let link = mailto_link(&record);
        tracing::info!("✉️ Composing booking email to {}", record.recipient());
        tracing::debug!("mailto link: {}", link);

        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(sink, "{}", link).and_then(|_| sink.flush()) {
            tracing::warn!("⚠️ Could not hand off mailto link: {}", e);
        }
    }
}
