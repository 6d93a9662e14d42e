//! HTTP routes for walks
//!
//! - POST   /api/v1/walks/              - create a walk
//! - GET    /api/v1/walks/{id}          - read a walk
//! - PUT    /api/v1/walks/{id}          - update a walk
//! - PATCH  /api/v1/walks/{id}/archive  - archive (idempotent)
//! - DELETE /api/v1/walks/{id}          - delete a walk and its feedback

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::routes::{
    auth_header, error_response, json_response, method_not_allowed, no_content_response,
    parse_id, parse_json_body, route_not_found, BoxBody,
};
use crate::server::AppState;
use crate::services::walks::{self, WalkCreate, WalkUpdate};
use crate::store::schemas::UserRecord;
use crate::types::Result;

pub async fn handle_walks_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<BoxBody> {
    // Every walk operation requires an active principal
    let user = match state
        .identity
        .resolve_active(&state.store, auth_header(&req).as_deref())
    {
        Ok(u) => u,
        Err(e) => return error_response(&e),
    };

    let method = req.method().clone();
    let subpath = path.strip_prefix("/api/v1/walks").unwrap_or("");
    let subpath = subpath.trim_end_matches('/');

    match (method, subpath) {
        (Method::POST, "") => handle_create(req, state, user).await,

        (Method::PATCH, p) if p.ends_with("/archive") => {
            let id_segment = p.strip_prefix('/').and_then(|s| s.strip_suffix("/archive"));
            match id_segment.ok_or(()).and_then(|s| parse_id(s, "walk").map_err(|_| ())) {
                Ok(id) => respond(walks::archive_walk(&state.store, &user, id), StatusCode::OK),
                Err(()) => route_not_found(),
            }
        }

        (method, p) if p.starts_with('/') && !p[1..].contains('/') => {
            let id = match parse_id(&p[1..], "walk") {
                Ok(id) => id,
                Err(e) => return error_response(&e),
            };
            match method {
                Method::GET => respond(walks::get_walk(&state.store, id), StatusCode::OK),
                Method::PUT => handle_update(req, state, user, id).await,
                Method::DELETE => {
                    match walks::delete_walk(&state.store, &user, id) {
                        Ok(()) => no_content_response(),
                        Err(e) => error_response(&e),
                    }
                }
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
    let input: WalkCreate = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let walk = walks::create_walk(&state.store, &user, input);
    json_response(StatusCode::CREATED, &walk)
}

async fn handle_update(
    req: Request<Incoming>,
    state: Arc<AppState>,
    user: UserRecord,
    walk_id: i64,
) -> Response<BoxBody> {
    let input: WalkUpdate = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    respond(
        walks::update_walk(&state.store, &user, walk_id, input),
        StatusCode::OK,
    )
}

fn respond<T: serde::Serialize>(result: Result<T>, status: StatusCode) -> Response<BoxBody> {
    match result {
        Ok(body) => json_response(status, &body),
        Err(e) => error_response(&e),
    }
}
