// Per-request tracing.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::info;
use uuid::Uuid;

/// Logs one structured line per request with a trace id, reusing the
/// caller's `Trace-Id` header when present.
pub async fn trace_request(req: Request, next: Next) -> Response {
    let trace_id = req
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let start = Instant::now();
    let response = next.run(req).await;

    info!(
        %trace_id,
        %method,
        path,
        status = response.status().as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "handled request"
    );
    response
}
