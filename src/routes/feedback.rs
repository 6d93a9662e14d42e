//! HTTP routes for feedback
//!
//! - POST  /api/v1/feedback/              - create feedback against a walk
//! - GET   /api/v1/feedback/{id}          - read feedback (archived reads as 404)
//! - PUT   /api/v1/feedback/{id}          - update feedback
//! - PATCH /api/v1/feedback/{id}/archive  - archive (idempotent)

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::routes::{
    auth_header, error_response, json_response, method_not_allowed, parse_id, parse_json_body,
    route_not_found, BoxBody,
};
use crate::server::AppState;
use crate::services::feedback::{self, FeedbackCreate, FeedbackUpdate};
use crate::store::schemas::UserRecord;
use crate::types::Result;

pub async fn handle_feedback_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<BoxBody> {
    let user = match state
        .identity
        .resolve_active(&state.store, auth_header(&req).as_deref())
    {
        Ok(u) => u,
        Err(e) => return error_response(&e),
    };

    let method = req.method().clone();
    let subpath = path.strip_prefix("/api/v1/feedback").unwrap_or("");
    let subpath = subpath.trim_end_matches('/');

    match (method, subpath) {
        (Method::POST, "") => handle_create(req, state, user).await,

        (Method::PATCH, p) if p.ends_with("/archive") => {
            let id_segment = p.strip_prefix('/').and_then(|s| s.strip_suffix("/archive"));
            match id_segment.ok_or(()).and_then(|s| parse_id(s, "feedback").map_err(|_| ())) {
                Ok(id) => respond(
                    feedback::archive_feedback(&state.store, &user, id),
                    StatusCode::OK,
                ),
                Err(()) => route_not_found(),
            }
        }

        (method, p) if p.starts_with('/') && !p[1..].contains('/') => {
            let id = match parse_id(&p[1..], "feedback") {
                Ok(id) => id,
                Err(e) => return error_response(&e),
            };
            match method {
                Method::GET => respond(feedback::get_feedback(&state.store, id), StatusCode::OK),
                Method::PUT => handle_update(req, state, user, id).await,
                _ => method_not_allowed(),
            }
        }

        (_, "") => method_not_allowed(),
        _ => route_not_found(),
    }
}

async fn handle_create(
    req: Request<Incoming>,
    state: Arc<AppState>,
    user: UserRecord,
) -> Response<BoxBody> {
    let input: FeedbackCreate = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    respond(
        feedback::create_feedback(&state.store, &user, input),
        StatusCode::CREATED,
    )
}

async fn handle_update(
    req: Request<Incoming>,
    state: Arc<AppState>,
    user: UserRecord,
    feedback_id: i64,
) -> Response<BoxBody> {
    let input: FeedbackUpdate = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    respond(
        feedback::update_feedback(&state.store, &user, feedback_id, input),
        StatusCode::OK,
    )
}

fn respond<T: serde::Serialize>(result: Result<T>, status: StatusCode) -> Response<BoxBody> {
    match result {
        Ok(body) => json_response(status, &body),
        Err(e) => error_response(&e),
    }
}
