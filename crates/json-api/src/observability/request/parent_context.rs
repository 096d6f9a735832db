//! Continuing a caller's trace from W3C `traceparent` headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// Read-only view of request headers for a propagator.
struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Remote parent carried by `headers`, if it names a valid span.
///
/// Extraction starts from an empty context so a request without trace
/// headers never attaches to whatever span is current in-process.
fn remote_parent_with(
    propagator: &dyn TextMapPropagator,
    headers: &HeaderMap,
) -> Option<Context> {
    let context = propagator.extract_with_context(&Context::new(), &RequestHeaders(headers));

    let has_parent = context.span().span_context().is_valid();

    has_parent.then_some(context)
}

pub(super) fn remote_parent(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| remote_parent_with(propagator, headers))
}
