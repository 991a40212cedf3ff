// Adapters layer: concrete implementations of the domain ports (clocks, notifiers).

pub mod clock;
pub mod mailto;
pub mod memory;
#[cfg(feature = "webhook")]
pub mod webhook;

pub use clock::{FixedClock, SystemClock};
pub use mailto::{mailto_link, MailtoNotifier};
pub use memory::MemoryNotifier;
#[cfg(feature = "webhook")]
pub use webhook::WebhookNotifier;
