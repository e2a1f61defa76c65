//! # moments
//!
//! Public server: feed, submissions, reports, and optionally the built
//! frontend. Storage is chosen by `database.url`.

use anyhow::Context;
use api_adapters::web::{self, middleware, AppState};
use axum::http::Method;
use domains::KeepResolution;
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = configs::load().context("loading configuration")?;
    configs::init_tracing(&settings.log);

    let repo = storage_adapters::connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("connecting to the post store")?;

    let keep = if settings.moderation.restore_on_keep {
        KeepResolution::Restore
    } else {
        KeepResolution::ClearFlag
    };
    let state = AppState::new(repo, keep);

    let mut router = web::public_router(state);
    if let Some(dist_dir) = settings.frontend.dist_dir.as_deref() {
        tracing::info!(dir = %dist_dir.display(), "serving frontend bundle");
        router = middleware::with_frontend(router, dist_dir);
    }
    let cors = middleware::cors_policy(
        settings.cors.allowed_origin.as_deref(),
        vec![Method::GET, Method::POST, Method::OPTIONS],
    );
    let router = middleware::with_standard_layers(router, cors);

    web::serve(router, (settings.server.host.as_str(), settings.server.port))
        .await
        .context("public server failed")?;
    Ok(())
}
