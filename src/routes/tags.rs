//! HTTP routes for the tag catalog
//!
//! - GET /api/v1/tags - list all tags

use hyper::body::Incoming;
use hyper::{Method, Request, Response, StatusCode};
use std::sync::Arc;

use crate::policy::visibility::TagView;
use crate::routes::{auth_header, error_response, json_response, method_not_allowed, BoxBody};
use crate::server::AppState;

pub async fn handle_tags_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    if let Err(e) = state
        .identity
        .resolve_active(&state.store, auth_header(&req).as_deref())
    {
        return error_response(&e);
    }

    if req.method() != Method::GET {
        return method_not_allowed();
    }

    let tags: Vec<TagView> = state.store.tags().iter().map(TagView::from).collect();
    json_response(StatusCode::OK, &tags)
}
