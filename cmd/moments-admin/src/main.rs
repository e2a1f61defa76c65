//! # moments-admin
//!
//! Moderator API: the review queue plus delete and keep resolutions. Shares
//! the post store with the public server.

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
    tracing::info!(?keep, "keep resolution");
    tracing::warn!(
        host = %settings.admin.host,
        "admin API has no authentication; keep it off public networks"
    );

    let cors = middleware::cors_policy(
        settings.admin.allowed_origin.as_deref(),
        vec![Method::GET, Method::PUT, Method::DELETE, Method::OPTIONS],
    );
    let router = middleware::with_standard_layers(web::admin_router(AppState::new(repo, keep)), cors);

    web::serve(router, (settings.admin.host.as_str(), settings.admin.port))
        .await
        .context("admin server failed")?;
    Ok(())
}
