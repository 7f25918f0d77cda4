//! Observability for rostersync
//!
//! Structured logging through `tracing`. Library code only emits events; the
//! binary installs the subscriber via [`init_logging`].
//!
//! # Usage
//!
//! ```ignore
//! use rostersync::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RecordsDecoded, &[("kind", "member"), ("count", "12")]);
//! ```

mod events;

pub use events::{Event, Severity};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Fields are rendered in alphabetical key order so that output is
/// deterministic.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let fields = render_fields(fields);
    match event.severity() {
        Severity::Debug => tracing::debug!(event = event.as_str(), %fields),
        Severity::Info => tracing::info!(event = event.as_str(), %fields),
        Severity::Warn => tracing::warn!(event = event.as_str(), %fields),
        Severity::Error => tracing::error!(event = event.as_str(), %fields),
    }
}

fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_directive` when set. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rostersync={}", default_directive)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
