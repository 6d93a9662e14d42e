//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo for async handling. Routing is a plain
//! (method, path) match; resource prefixes dispatch into the route modules.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::auth::{IdentityResolver, JwtValidator};
use crate::config::Args;
use crate::routes;
use crate::store::MemoryStore;
use crate::types::WalkboardError;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub store: Arc<MemoryStore>,
    pub identity: IdentityResolver,
}

impl AppState {
    /// Build state from configuration. The identity resolver is constructed
    /// here from the configured secret, never from ambient process state.
    pub fn new(args: Args) -> Self {
        let jwt = JwtValidator::new(&args.jwt_secret(), args.jwt_expiry_seconds);
        Self {
            args,
            store: Arc::new(MemoryStore::new()),
            identity: IdentityResolver::new(jwt),
        }
    }
}

/// Start the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), WalkboardError> {
    let listener = TcpListener::bind(state.args.listen)
        .await
        .map_err(|e| WalkboardError::Internal(format!("Failed to bind {}: {e}", state.args.listen)))?;

    info!(
        "Walkboard listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    // CORS preflight
    if method == Method::OPTIONS {
        return Ok(preflight_response());
    }

    let response = match (method, path.as_str()) {
        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state))
        }

        // Version info for deployment verification
        (Method::GET, "/version") => routes::version_info(),

        (_, p) if p.starts_with("/api/v1/users") => {
            routes::handle_users_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p.starts_with("/api/v1/walks") => {
            routes::handle_walks_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p.starts_with("/api/v1/feedback") => {
            routes::handle_feedback_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p.starts_with("/api/v1/comments") => {
            routes::handle_comments_request(req, Arc::clone(&state), &path).await
        }

        (_, p) if p == "/api/v1/tags" || p.starts_with("/api/v1/tags/") => {
            routes::handle_tags_request(req, Arc::clone(&state)).await
        }

        // Not found
        _ => not_found_response(&path),
    };

    Ok(response)
}

/// CORS preflight response
fn preflight_response() -> Response<BoxBody> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Headers", "Content-Type, Authorization")
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, PATCH, DELETE, OPTIONS")
        .header("Access-Control-Max-Age", "86400")
        .body(Full::new(Bytes::new()).map_err(|never| match never {}).boxed())
        .unwrap()
}

/// Not found response
fn not_found_response(path: &str) -> Response<BoxBody> {
    let body = serde_json::json!({
        "error": "Not Found",
        "path": path,
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .body(
            Full::new(Bytes::from(body.to_string()))
                .map_err(|never| match never {})
                .boxed(),
        )
        .unwrap()
}
