//! # Axum web layer
//!
//! Two routers over the same services: the public API the frontend talks to,
//! and the admin API the moderator dashboard talks to. Each binary serves one
//! of them.

pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use domains::{KeepResolution, PostRepository};
use services::{ModerationService, PostService};
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::signal;
use tracing::{error, info};

use crate::metrics::Metrics;

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub moderation: Arc<ModerationService>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(repo: Arc<dyn PostRepository>, keep: KeepResolution) -> Self {
        Self {
            posts: Arc::new(PostService::new(Arc::clone(&repo))),
            moderation: Arc::new(ModerationService::new(repo, keep)),
            metrics: Arc::new(Metrics::new()),
        }
    }
}

/// Feed, submission, and reporting.
pub fn public_router(state: AppState) -> Router {
    Router::new()
        .route("/posts/feed", get(handlers::public::feed))
        .route("/create/post", post(handlers::public::create_post))
        .route("/place/{id}/report", post(handlers::public::report_post))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
}

/// Review queue and moderator resolutions.
pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/reported", get(handlers::admin::reported))
        .route("/{id}/delete", delete(handlers::admin::delete_post))
        .route("/{id}/keep", put(handlers::admin::keep_post))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
}

/// Binds `addr` and serves `router` until Ctrl+C or SIGTERM.
pub async fn serve(router: Router, addr: impl ToSocketAddrs) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
