//! HTTP routes for authentication and the caller's own resources
//!
//! - POST /api/v1/users/auth        - login, returns a bearer token
//! - GET  /api/v1/users/me          - current user info from token
//! - GET  /api/v1/users/me/walks    - walks created or owned by the caller
//! - GET  /api/v1/users/me/feedback - feedback created or owned by the caller

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::routes::{
    auth_header, error_response, json_response, method_not_allowed, parse_form_body,
    route_not_found, BoxBody,
};
use crate::server::AppState;
use crate::services::users::{self, LoginForm};

pub async fn handle_users_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    path: &str,
) -> Response<BoxBody> {
    let method = req.method().clone();
    let subpath = path.strip_prefix("/api/v1/users").unwrap_or("");
    let subpath = subpath.trim_end_matches('/');

    match (method, subpath) {
        (Method::POST, "/auth") => handle_login(req, state).await,
        (Method::GET, "/me") => handle_me(req, state),
        (Method::GET, "/me/walks") => handle_my_walks(req, state),
        (Method::GET, "/me/feedback") => handle_my_feedback(req, state),

        (_, "/auth") | (_, "/me") | (_, "/me/walks") | (_, "/me/feedback") => {
            method_not_allowed()
        }
        _ => route_not_found(),
    }
}

async fn handle_login(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let form: LoginForm = match parse_form_body(req).await {
        Ok(f) => f,
        Err(e) => return error_response(&e),
    };

    match users::login(&state.store, state.identity.jwt(), &form) {
        Ok(token) => json_response(StatusCode::OK, &token),
        Err(e) => error_response(&e),
    }
}

fn handle_me(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    // No active gate here: a disabled user may still see their own account
    let user = match state.identity.resolve(&state.store, auth_header(&req).as_deref()) {
        Ok(u) => u,
        Err(e) => return error_response(&e),
    };

    json_response(StatusCode::OK, &users::current_user(&user))
}

fn handle_my_walks(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user = match state
        .identity
        .resolve_active(&state.store, auth_header(&req).as_deref())
    {
        Ok(u) => u,
        Err(e) => return error_response(&e),
    };

    json_response(StatusCode::OK, &users::my_walks(&state.store, &user))
}

fn handle_my_feedback(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user = match state
        .identity
        .resolve_active(&state.store, auth_header(&req).as_deref())
    {
        Ok(u) => u,
        Err(e) => return error_response(&e),
    };

    json_response(StatusCode::OK, &users::my_feedback(&state.store, &user))
}
