//! Response construction.
//!
//! # Responsibilities
//! - Build empty, JSON and message responses
//! - Carry error messages in the HTTP/1 reason phrase and the body
//!
//! # Design Decisions
//! - JSON bodies are tab-indented (see `codec::to_pretty_json`)
//! - Message responses are plain text; everything else is left to the dispatcher's JSON default
//! - A message that is not a legal reason phrase keeps the canonical one

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use hyper::ext::ReasonPhrase;
use serde::Serialize;

use crate::codec::to_pretty_json;

pub const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// A response with no body.
pub fn empty(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

/// A response whose reason phrase and body both carry `message`.
pub fn message(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    let mut response = Response::new(Body::from(message.clone()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    if let Ok(reason) = ReasonPhrase::try_from(message) {
        response.extensions_mut().insert(reason);
    }
    response
}

/// A response with an empty body and a custom reason phrase.
pub fn reason_only(status: StatusCode, reason: impl Into<String>) -> Response {
    let mut response = empty(status);
    if let Ok(reason) = ReasonPhrase::try_from(reason.into()) {
        response.extensions_mut().insert(reason);
    }
    response
}

/// A pretty-printed JSON response.
pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response {
    match to_pretty_json(value) {
        Ok(body) => {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sets_reason_and_body() {
        let response = message(StatusCode::NOT_FOUND, "company acme not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let reason = response.extensions().get::<ReasonPhrase>().unwrap();
        assert_eq!(reason.as_bytes(), b"company acme not found");
        assert_eq!(response.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
    }

    #[test]
    fn test_illegal_reason_phrase_is_skipped() {
        let response = message(StatusCode::BAD_REQUEST, "line one\nline two");
        assert!(response.extensions().get::<ReasonPhrase>().is_none());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_json_response() {
        let response = json(StatusCode::OK, &serde_json::json!({"id": "acme"}));
        assert_eq!(response.headers()[header::CONTENT_TYPE], APPLICATION_JSON);
    }
}
