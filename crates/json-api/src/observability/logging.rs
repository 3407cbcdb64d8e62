//! Log subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Crates whose chatter is capped at `warn` regardless of the base level.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tonic", "opentelemetry", "sqlx::query", "salvo_core"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.logging.log_level)));

    let service_name = config.observability.otel_service_name.clone();

    match config.logging.log_format {
        LogFormat::Compact => install(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
            filter,
            tracer_provider.map(|provider| (provider, service_name)),
        ),
        LogFormat::Json => install(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
            filter,
            tracer_provider.map(|provider| (provider, service_name)),
        ),
    }
}

fn filter_directives(level: &str) -> String {
    let level = match level.trim() {
        "" => "info",
        level => level,
    };

    QUIET_TARGETS
        .iter()
        .fold(level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn install<L>(
    fmt_layer: L,
    filter: EnvFilter,
    tracing: Option<(&SdkTracerProvider, String)>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);

    match tracing {
        Some((provider, service_name)) => subscriber
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer(service_name)))
            .try_init()?,
        None => subscriber.try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::filter_directives;

    #[test]
    fn noisy_crates_are_capped_at_warn() {
        let directives = filter_directives("debug");

        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("sqlx::query=warn"));
        assert!(directives.contains("hyper=warn"));
    }

    #[test]
    fn blank_level_falls_back_to_info() {
        assert!(filter_directives("  ").starts_with("info,"));
    }
}
