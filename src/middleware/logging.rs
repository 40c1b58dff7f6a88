use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let request_id = Uuid::new_v4();
    let start = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();

    match response.extensions().get::<Result<(), ApiError>>() {
        Some(Ok(_)) => info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request"
        ),
        Some(Err(value)) => error!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            value = %value,
            "Failed to process request"
        ),
        None => warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request, but no Response extension is set"
        ),
    }

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Attaches the handler outcome so `logging_middleware` can report it.
pub fn to_response<T: IntoResponse>(response: T, outcome: Result<(), ApiError>) -> Response {
    let mut response = response.into_response();

    response.extensions_mut().insert(outcome);

    response
}
