//! Tracing subscriber initialisation.

use std::time::Duration;

use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, LoggingConfig},
};

use super::{ObservabilityError, RequestLogging};

/// Process-wide logging, plus the settings the request middleware needs.
#[derive(Debug)]
pub(crate) struct Observability {
    slow_request_threshold: Duration,
}

impl Observability {
    /// Install the global tracing subscriber.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let logging = &config.logging;

        match logging.log_format {
            LogFormat::Compact => install(
                logging,
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )?,
            LogFormat::Json => install(
                logging,
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            )?,
        }

        Ok(Self {
            slow_request_threshold: Duration::from_millis(
                config.observability.slow_request_threshold_ms,
            ),
        })
    }

    /// Request logging middleware configured from this instance.
    pub(crate) fn request_logging(&self) -> RequestLogging {
        RequestLogging::new(self.slow_request_threshold)
    }
}

fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},h2=warn,hyper=warn,sqlx=warn",
            logging.log_level
        ))
    })
}

fn install<L>(logging: &LoggingConfig, fmt_layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter(logging))
        .try_init()?;

    Ok(())
}
