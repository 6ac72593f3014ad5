use axum::{
    extract::{MatchedPath, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

/// What a facility lookup asked for and how many rows it returned.
///
/// Lookup handlers attach this to their response so [`track_requests`] can
/// count empty and non-empty matches per filter combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOutcome {
    pub filters: &'static str,
    pub results: usize,
}

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Caller-facing meaning of a response status.
const fn outcome(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "ok",
        400 => "invalid_filter",
        503 => "store_unavailable",
        500..=599 => "store_error",
        _ => "other",
    }
}

/// Route layer: counts requests by route and outcome, and lookups by filter
/// shape and whether anything matched.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let span = info_span!("request", request_id = %Uuid::new_v4(), route = %route);

    async move {
        let response = next.run(req).await;
        let outcome = outcome(response.status());
        let elapsed = start.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        metrics::counter!(
            "facility_api_requests_total",
            "route" => route.clone(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("facility_api_request_duration_seconds", "route" => route)
            .record(elapsed.as_secs_f64());

        if let Some(lookup) = response.extensions().get::<LookupOutcome>() {
            let matched = if lookup.results == 0 { "empty" } else { "matched" };
            metrics::counter!(
                "facility_lookups_total",
                "filters" => lookup.filters,
                "result" => matched
            )
            .increment(1);

            info!(
                filters = lookup.filters,
                results = lookup.results,
                outcome,
                elapsed_ms,
                "Lookup served"
            );
        } else {
            debug!(outcome, elapsed_ms, "Request served");
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failures_are_told_apart() {
        assert_eq!(outcome(StatusCode::OK), "ok");
        assert_eq!(outcome(StatusCode::BAD_REQUEST), "invalid_filter");
        assert_eq!(outcome(StatusCode::SERVICE_UNAVAILABLE), "store_unavailable");
        assert_eq!(outcome(StatusCode::INTERNAL_SERVER_ERROR), "store_error");
        assert_eq!(outcome(StatusCode::NOT_FOUND), "other");
    }
}
