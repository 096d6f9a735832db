//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use thiserror::Error;
use tracing::error;

const DURATION_BUCKETS: [f64; 12] = [
    0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug, Error)]
enum MetricsError {
    #[error("failed to create metric `{name}`")]
    Create {
        name: &'static str,
        #[source]
        source: prometheus::Error,
    },

    #[error("failed to register metric `{name}`")]
    Register {
        name: &'static str,
        #[source]
        source: prometheus::Error,
    },
}

#[derive(Debug)]
struct ApiMetrics {
    registry: Registry,
    requests: IntCounterVec,
    durations: HistogramVec,
    in_flight: IntGauge,
    permission_denials: IntCounter,
}

static API_METRICS: OnceLock<Option<ApiMetrics>> = OnceLock::new();

fn api_metrics() -> Option<&'static ApiMetrics> {
    API_METRICS
        .get_or_init(|| {
            ApiMetrics::build()
                .inspect_err(|source| error!("metrics disabled: {source}"))
                .ok()
        })
        .as_ref()
}

fn register<C>(
    registry: &Registry,
    name: &'static str,
    metric: Result<C, prometheus::Error>,
) -> Result<C, MetricsError>
where
    C: Collector + Clone + 'static,
{
    let metric = metric.map_err(|source| MetricsError::Create { name, source })?;

    registry
        .register(Box::new(metric.clone()))
        .map_err(|source| MetricsError::Register { name, source })?;

    Ok(metric)
}

impl ApiMetrics {
    fn build() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let requests = register(
            &registry,
            "requests",
            IntCounterVec::new(
                Opts::new(
                    "recipes_json_http_requests_total",
                    "HTTP requests by method, route, outcome and status code.",
                ),
                &["method", "route", "outcome", "status_code"],
            ),
        )?;

        let durations = register(
            &registry,
            "durations",
            HistogramVec::new(
                HistogramOpts::new(
                    "recipes_json_http_request_duration_seconds",
                    "HTTP request duration in seconds by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            ),
        )?;

        let in_flight = register(
            &registry,
            "in_flight",
            IntGauge::new(
                "recipes_json_http_requests_in_flight",
                "HTTP requests currently being served.",
            ),
        )?;

        let permission_denials = register(
            &registry,
            "permission_denials",
            IntCounter::new(
                "recipes_json_permission_denials_total",
                "Requests refused because the caller lacked a permission.",
            ),
        )?;

        Ok(Self {
            registry,
            requests,
            durations,
            in_flight,
            permission_denials,
        })
    }
}

/// Coarse result of a request, used as a label.
fn outcome(status: StatusCode) -> &'static str {
    match status.as_u16() {
        401 => "unauthenticated",
        403 => "forbidden",
        404 => "not_found",
        400..=499 => "client_error",
        500..=599 => "server_error",
        _ => "ok",
    }
}

/// Tracks one request from arrival to completion.
///
/// The in-flight gauge is held until the recorder is dropped, so a request
/// that panics still releases it.
#[derive(Debug)]
pub(super) struct RequestRecorder {
    method: String,
    route: String,
    in_flight: bool,
}

impl RequestRecorder {
    pub(super) fn start(method: &str, route: &str) -> Self {
        let in_flight = api_metrics().is_some_and(|metrics| {
            metrics.in_flight.inc();
            true
        });

        Self {
            method: method.to_owned(),
            route: route.to_owned(),
            in_flight,
        }
    }

    pub(super) fn finish(&self, status: StatusCode, duration_seconds: f64) {
        let Some(metrics) = api_metrics() else {
            return;
        };

        metrics
            .requests
            .with_label_values(&[
                self.method.as_str(),
                self.route.as_str(),
                outcome(status),
                status.as_str(),
            ])
            .inc();

        metrics
            .durations
            .with_label_values(&[self.method.as_str(), self.route.as_str()])
            .observe(duration_seconds);

        if status == StatusCode::FORBIDDEN {
            metrics.permission_denials.inc();
        }
    }
}

impl Drop for RequestRecorder {
    fn drop(&mut self) {
        if self.in_flight
            && let Some(metrics) = api_metrics()
        {
            metrics.in_flight.dec();
        }
    }
}

fn encode(registry: &Registry) -> Result<(String, &'static str), prometheus::Error> {
    let encoder = TextEncoder::new();
    let mut buffer = String::new();

    encoder.encode_utf8(&registry.gather(), &mut buffer)?;

    Ok((buffer, prometheus::TEXT_FORMAT))
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = api_metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);
        return;
    };

    match encode(&metrics.registry) {
        Ok((body, content_type)) => {
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            res.render(body);
        }
        Err(source) => {
            error!("failed to encode metrics: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
