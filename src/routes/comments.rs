//! HTTP routes for comments
//!
//! - POST   /api/v1/comments/feedback/{id}/comments - comment on feedback
//! - PUT    /api/v1/comments/{id}                   - edit own comment
//! - DELETE /api/v1/comments/{id}                   - delete own comment

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::routes::{
    auth_header, error_response, json_response, method_not_allowed, no_content_response,
    parse_id, parse_json_body, route_not_found, BoxBody,
};
use crate::server::AppState;
use crate::services::comments::{self, CommentCreate, CommentUpdate};
use crate::store::schemas::UserRecord;

pub async fn handle_comments_request(
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
    let subpath = path.strip_prefix("/api/v1/comments").unwrap_or("");
    let subpath = subpath.trim_end_matches('/');

    match (method, subpath) {
        (Method::POST, p) if p.starts_with("/feedback/") && p.ends_with("/comments") => {
            let id_segment = p
                .strip_prefix("/feedback/")
                .and_then(|s| s.strip_suffix("/comments"));
            match id_segment
                .ok_or(())
                .and_then(|s| parse_id(s, "feedback").map_err(|_| ()))
            {
                Ok(feedback_id) => handle_create(req, state, user, feedback_id).await,
                Err(()) => route_not_found(),
            }
        }

        (method, p) if p.starts_with('/') && !p[1..].contains('/') => {
            let id = match parse_id(&p[1..], "comment") {
                Ok(id) => id,
                Err(e) => return error_response(&e),
            };
            match method {
                Method::PUT => handle_update(req, state, user, id).await,
                Method::DELETE => match comments::delete_comment(&state.store, &user, id) {
                    Ok(()) => no_content_response(),
                    Err(e) => error_response(&e),
                },
                _ => method_not_allowed(),
            }
        }

        _ => route_not_found(),
    }
}

async fn handle_create(
    req: Request<Incoming>,
    state: Arc<AppState>,
    user: UserRecord,
    feedback_id: i64,
) -> Response<BoxBody> {
    let input: CommentCreate = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    match comments::create_comment(&state.store, &user, feedback_id, input) {
        Ok(comment) => json_response(StatusCode::CREATED, &comment),
        Err(e) => error_response(&e),
    }
}

async fn handle_update(
    req: Request<Incoming>,
    state: Arc<AppState>,
    user: UserRecord,
    comment_id: i64,
) -> Response<BoxBody> {
    let input: CommentUpdate = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    match comments::update_comment(&state.store, &user, comment_id, input) {
        Ok(comment) => json_response(StatusCode::OK, &comment),
        Err(e) => error_response(&e),
    }
}
