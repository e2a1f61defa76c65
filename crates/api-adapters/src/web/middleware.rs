//! Layers shared by both servers: request ids, tracing, compression, CORS.

use std::path::Path;
use std::time::Duration;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info_span, warn};

/// CORS for the given methods. With an origin, credentials are allowed for
/// that origin only; without one, any origin may call but without
/// credentials.
pub fn cors_policy(allowed_origin: Option<&str>, methods: Vec<Method>) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    match allowed_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(AllowOrigin::exact(origin)).allow_credentials(true),
        Some(Err(e)) => {
            warn!(error = %e, "invalid CORS origin, allowing any origin without credentials");
            base.allow_origin(Any)
        }
        None => base.allow_origin(Any),
    }
}

/// Wraps a router in the standard layer stack. The request id is assigned
/// outermost so the trace span can record it.
pub fn with_standard_layers(router: Router, cors: CorsLayer) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        info_span!("http", method = %request.method(), uri = %request.uri(), request_id)
    });

    router
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Serves a built single-page frontend for every path the API does not
/// claim; unknown paths get `index.html` so client-side routes resolve.
pub fn with_frontend(router: Router, dist_dir: &Path) -> Router {
    let index = ServeFile::new(dist_dir.join("index.html"));
    router.fallback_service(ServeDir::new(dist_dir).not_found_service(index))
}
