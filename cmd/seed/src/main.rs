//! Fills the configured post store with a handful of sample moments.

use anyhow::Context;
use domains::PostDraft;
use secrecy::ExposeSecret;
use services::PostService;

const SAMPLES: &[(&str, &str, &str, Option<&str>)] = &[
    ("first snow on the balcony", "Joy", "https://picsum.photos/seed/snow/600", Some("Oslo")),
    ("missed the last train home again", "Regret", "https://picsum.photos/seed/train/600", None),
    ("grandma's recipe finally worked", "Nostalgia", "https://picsum.photos/seed/soup/600", Some("Kitchen")),
    ("i still think about that summer", "Longing", "https://picsum.photos/seed/desk/600", None),
    ("sunrise run, nobody around", "Peace", "https://picsum.photos/seed/run/600", Some("Riverside")),
];

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
    let posts = PostService::new(repo);

    for (caption, mood, image_url, location) in SAMPLES {
        let draft = PostDraft {
            image_url: Some(image_url.to_string()),
            caption: Some(caption.to_string()),
            mood: Some(mood.to_string()),
            location: location.map(str::to_string),
            sender: None,
        };
        posts.create(draft).await.with_context(|| format!("seeding '{caption}'"))?;
    }

    tracing::info!(count = SAMPLES.len(), "seeded sample moments");
    Ok(())
}
