use crate::core::payload::BookingRecord;
use crate::domain::ports::OutboundNotifier;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_url;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    subject: String,
    body: String,
    #[serde(flatten)]
    record: &'a BookingRecord,
}

/// POSTs each booking as JSON to a webhook.
///
/// Deliveries are spawned on the tokio runtime that was current when the
/// notifier was built; `send` returns immediately and failures are only
/// logged. Hosts that are about to exit can [`flush`](Self::flush).
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    handle: Handle,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        validate_url("notifier.webhook_url", &url)?;

        let handle = Handle::try_current().map_err(|e| BookingError::ConfigError {
            message: format!("webhook notifier requires a tokio runtime: {}", e),
        })?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url,
            handle,
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Deliveries spawned but not yet awaited by [`flush`](Self::flush).
    pub fn pending(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Wait for every delivery spawned so far.
    pub async fn flush(&self) {
        let pending = {
            let mut guard = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *guard)
        };

        for task in pending {
            if let Err(e) = task.await {
                tracing::warn!("⚠️ Webhook delivery task aborted: {}", e);
            }
        }
    }
}

async fn deliver(client: &reqwest::Client, url: &str, record: &BookingRecord) -> Result<()> {
    let payload = WebhookPayload {
        subject: record.subject(),
        body: record.body(),
        record,
    };

    client
        .post(url)
        .json(&payload)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

impl OutboundNotifier for WebhookNotifier {
    fn send(&self, record: BookingRecord) {
        let client = self.client.clone();
        let url = self.url.clone();

        let task = self.handle.spawn(async move {
            match deliver(&client, &url, &record).await {
                Ok(()) => tracing::debug!("Webhook accepted booking for {}", record.name()),
                Err(e) => tracing::warn!(
                    "⚠️ Webhook delivery for {} failed: {} ({})",
                    record.name(),
                    e,
                    e.recovery_suggestion()
                ),
            }
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.retain(|task| !task.is_finished());
        pending.push(task);
    }
}
