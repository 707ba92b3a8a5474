//! Request dispatch: prefix stripping, route resolution, body buffering, handler call.

use std::time::Instant;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::http::handlers::HandlerContext;
use crate::http::request::request_id_of;
use crate::http::response::{self, APPLICATION_JSON};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::RouteError;

const ROUTE_NOT_FOUND: &str = "route not found";

/// Failure to turn a request body into JSON.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("{0}")]
    Read(axum::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Strip the API prefix on a segment boundary.
pub fn strip_api_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Methods whose body is buffered and parsed before the handler runs.
pub fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Buffer the whole body and parse it. An empty body is `{}`.
pub async fn read_json_body(body: Body, limit: usize) -> Result<Value, BodyError> {
    let bytes = to_bytes(body, limit).await.map_err(BodyError::Read)?;
    if bytes.is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Run one request through the route table and its handler.
pub async fn dispatch(state: &AppState, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id_of(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let resolved = strip_api_prefix(&path, &state.api_prefix)
        .ok_or_else(|| RouteError::NotFound(path.clone()))
        .and_then(|relative| state.routes.resolve(relative, &method));

    let matched = match resolved {
        Ok(m) => m,
        Err(err) => {
            tracing::warn!(request_id = %request_id, method = %method, path = %path, error = %err, "No route matched");
            metrics::record_request(method.as_str(), 404, metrics::UNMATCHED_ROUTE, start);
            return response::message(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND);
        }
    };
    let handler = *matched.handler;
    let params = matched.params;
    let template = matched.route.template().as_str();

    let body = if carries_body(&method) {
        match read_json_body(request.into_body(), state.max_body_size).await {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(request_id = %request_id, route = %template, error = %err, "Unreadable request body");
                metrics::record_request(method.as_str(), 400, template, start);
                let mut response = response::reason_only(StatusCode::BAD_REQUEST, err.to_string());
                set_json_content_type(&mut response);
                return response;
            }
        }
    } else {
        Value::Null
    };

    let mut response = {
        let mut store = state.store.lock();
        handler(
            &mut store,
            HandlerContext {
                urls: &state.urls,
                params: &params,
                body,
            },
        )
    };
    set_json_content_type(&mut response);

    let status = response.status();
    tracing::debug!(
        request_id = %request_id,
        method = %method,
        route = %template,
        status = status.as_u16(),
        "Request handled"
    );
    metrics::record_request(method.as_str(), status.as_u16(), template, start);
    response
}

fn set_json_content_type(response: &mut Response) {
    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static(APPLICATION_JSON));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_api_prefix() {
        assert_eq!(strip_api_prefix("/api/v1/companies", "/api/v1"), Some("/companies"));
        assert_eq!(strip_api_prefix("/api/v1", "/api/v1"), Some(""));
        assert_eq!(strip_api_prefix("/api/v1companies", "/api/v1"), None);
        assert_eq!(strip_api_prefix("/companies", "/api/v1"), None);
        assert_eq!(strip_api_prefix("/companies", ""), Some("/companies"));
    }

    #[test]
    fn test_carries_body() {
        assert!(carries_body(&Method::POST));
        assert!(carries_body(&Method::PUT));
        assert!(carries_body(&Method::PATCH));
        assert!(!carries_body(&Method::GET));
        assert!(!carries_body(&Method::DELETE));
    }

    #[tokio::test]
    async fn test_read_json_body() {
        let value = read_json_body(Body::from(r#"{"id":"acme"}"#), 1024).await.unwrap();
        assert_eq!(value["id"], "acme");

        let value = read_json_body(Body::empty(), 1024).await.unwrap();
        assert_eq!(value, Value::Object(Map::new()));

        let err = read_json_body(Body::from("{not json"), 1024).await.unwrap_err();
        assert!(matches!(err, BodyError::Parse(_)));

        let err = read_json_body(Body::from(vec![b' '; 64]), 16).await.unwrap_err();
        assert!(matches!(err, BodyError::Read(_)));
    }
}
