//! Per-request spans, request IDs and completion logging.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use crate::extensions::*;

use super::{metrics::RequestRecorder, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

fn request_span(req: &Request, request_id: &str, span_name: &str) -> Span {
    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        remote_addr = %req.remote_addr(),
        subject = field::Empty,
        status = field::Empty,
        duration_ms = field::Empty
    );

    if settings::otel_parent_propagation_enabled()
        && let Some(parent) = parent_context::remote_parent(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach parent trace context: {source}");
    }

    span
}

fn log_completion(status: StatusCode, elapsed: Duration) {
    let duration_ms = elapsed.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    if status.is_server_error() {
        error!(status = status.as_u16(), duration_ms, "request.failed");
    } else if status.is_client_error() {
        warn!(status = status.as_u16(), duration_ms, "request.rejected");
    } else {
        info!(status = status.as_u16(), duration_ms, "request.completed");
    }

    if duration_ms > threshold_ms {
        warn!(duration_ms, threshold_ms, "request.slow");
    }
}

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);
    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    let method = req.method().to_string();
    let names = spans::request_span_name(&method, req.uri().path());
    let recorder = RequestRecorder::start(&method, &names.otel_path);
    let span = request_span(req, &request_id, &names.otel_span_name);

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let elapsed = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);

    recorder.finish(status, elapsed.as_secs_f64());

    if let Ok(caller) = depot.caller_or_401() {
        span.record("subject", caller.subject.as_str());
    }

    span.record("status", status.as_u16());
    span.record("duration_ms", elapsed.as_millis());

    span.in_scope(|| log_completion(status, elapsed));
}
