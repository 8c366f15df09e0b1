use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TraceId(pub String);

/// Tag every request with an id, echo it in `X-Trace-Id` and log server
/// errors under it.
pub async fn assign_trace_id(mut req: Request<Body>, next: Next) -> Response {
    let trace_id = Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(TraceId(trace_id.clone()));

    let mut res = next.run(req).await;
    if res.status().is_server_error() {
        tracing::error!(
            %trace_id,
            %method,
            %path,
            status = res.status().as_u16(),
            "request failed"
        );
    }

    res.headers_mut().insert(
        "X-Trace-Id",
        HeaderValue::from_str(&trace_id).unwrap_or(HeaderValue::from_static("invalid")),
    );
    res
}
