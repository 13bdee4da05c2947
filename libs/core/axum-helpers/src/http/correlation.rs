//! Correlation-id propagation.
//!
//! Every request carries a correlation id for cross-service log
//! correlation. Clients may supply one; otherwise the middleware mints a
//! random 12-character alphanumeric id. The id is available to handlers as
//! a request extension and is always echoed on the response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use rand::distr::Alphanumeric;
use rand::Rng;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

const GENERATED_ID_LEN: usize = 12;

/// Correlation id of the current request, exposed as a request extension.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

fn generate_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(GENERATED_ID_LEN)
        .map(char::from)
        .collect()
}

/// Middleware that reads the inbound correlation id, generating one when
/// the header is absent or unreadable, and reflects it on the response.
pub async fn propagate_correlation_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(generate_id);

    request.extensions_mut().insert(CorrelationId(id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value);
    }
    response
}
