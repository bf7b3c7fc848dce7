//! Observability setup and request tracing middleware.

use thiserror::Error;

mod init;
mod metrics;
mod request;

pub(crate) use init::Observability;
pub(crate) use metrics::metrics_handler;
pub(crate) use request::RequestLogging;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
