//! HTTP routes for Walkboard

pub mod comments;
pub mod feedback;
pub mod health;
pub mod tags;
pub mod users;
pub mod walks;

pub use comments::handle_comments_request;
pub use feedback::handle_feedback_request;
pub use health::{health_check, version_info};
pub use tags::handle_tags_request;
pub use users::handle_users_request;
pub use walks::handle_walks_request;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::types::{Result, WalkboardError};

pub(crate) type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Error body shape for every fault response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

pub(crate) fn full_body(data: impl Into<Bytes>) -> BoxBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

pub(crate) fn empty_body() -> BoxBody {
    Full::new(Bytes::new())
        .map_err(|never| match never {})
        .boxed()
}

pub(crate) fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<BoxBody> {
    let json = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(full_body(json))
        .unwrap()
}

/// Map a typed fault to its response
pub(crate) fn error_response(err: &WalkboardError) -> Response<BoxBody> {
    json_response(
        err.status(),
        &ErrorResponse {
            error: err.to_string(),
            code: Some(err.code().to_string()),
        },
    )
}

pub(crate) fn no_content_response() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .body(empty_body())
        .unwrap()
}

pub(crate) fn method_not_allowed() -> Response<BoxBody> {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &ErrorResponse {
            error: "Method not allowed".to_string(),
            code: None,
        },
    )
}

pub(crate) fn route_not_found() -> Response<BoxBody> {
    json_response(
        StatusCode::NOT_FOUND,
        &ErrorResponse {
            error: "Not Found".to_string(),
            code: None,
        },
    )
}

/// Owned Authorization header value, taken before the body is consumed
pub(crate) fn auth_header(req: &Request<Incoming>) -> Option<String> {
    req.headers()
        .get(hyper::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

const MAX_BODY_BYTES: usize = 65536;

pub(crate) async fn read_body(req: Request<Incoming>) -> Result<Bytes> {
    let body = req
        .collect()
        .await
        .map_err(|e| WalkboardError::Validation(format!("Failed to read body: {e}")))?;

    let bytes = body.to_bytes();
    if bytes.len() > MAX_BODY_BYTES {
        return Err(WalkboardError::Validation("Request body too large".into()));
    }
    Ok(bytes)
}

pub(crate) async fn parse_json_body<T: for<'de> Deserialize<'de>>(
    req: Request<Incoming>,
) -> Result<T> {
    let bytes = read_body(req).await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| WalkboardError::Validation(format!("Invalid JSON body: {e}")))
}

pub(crate) async fn parse_form_body<T: for<'de> Deserialize<'de>>(
    req: Request<Incoming>,
) -> Result<T> {
    let bytes = read_body(req).await?;
    serde_urlencoded::from_bytes(&bytes)
        .map_err(|e| WalkboardError::Validation(format!("Invalid form body: {e}")))
}

/// Parse a positive entity id from a path segment
pub(crate) fn parse_id(segment: &str, what: &str) -> Result<i64> {
    segment
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| WalkboardError::Validation(format!("Invalid {what} ID")))
}
