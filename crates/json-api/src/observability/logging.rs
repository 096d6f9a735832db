//! tracing subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::config::{
    ServerConfig,
    observability::{LogFormat, LoggingConfig},
};

use super::ObservabilityError;

/// Crates that are noisy at `info` and below.
const QUIET_TARGETS: [&str; 5] = ["h2", "hyper", "tonic", "tower", "opentelemetry"];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Directives used when `RUST_LOG` is not a full filter on its own.
fn filter_directives(logging: &LoggingConfig) -> String {
    let mut directives = vec![logging.log_level.clone()];

    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{target}=warn")));

    directives.push(if logging.log_sql {
        "sqlx::query=debug".to_string()
    } else {
        "sqlx=warn".to_string()
    });

    directives.join(",")
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
    }
}

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(format_layer(config.logging.log_format))
        .with(otel_layer)
        .with(EnvFilter::new(filter_directives(&config.logging)))
        .try_init()?;

    Ok(())
}
