//! # storage-adapters
//!
//! Concrete `PostRepository` backends and the URL-based selection between
//! them. The binaries call [`connect`] once at startup and hand the result to
//! every service.

use std::sync::Arc;

use domains::{DomainError, DomainResult, PostRepository};

pub mod memory;
#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::MemoryPostRepository;
#[cfg(feature = "db-sqlite")]
pub use sqlite::SqlitePostRepository;

/// Opens the post store named by `url`.
///
/// * `memory://` keeps posts in process memory.
/// * `sqlite:<path>` / `sqlite::memory:` (feature `db-sqlite`).
#[cfg_attr(not(feature = "db-sqlite"), allow(unused_variables))]
pub async fn connect(url: &str, max_connections: u32) -> DomainResult<Arc<dyn PostRepository>> {
    if url.starts_with("memory:") {
        tracing::warn!("using in-memory post store; data is lost on restart");
        return Ok(Arc::new(MemoryPostRepository::new()));
    }

    #[cfg(feature = "db-sqlite")]
    if url.starts_with("sqlite:") {
        return Ok(Arc::new(SqlitePostRepository::connect(url, max_connections).await?));
    }

    // The URL may carry credentials, so only its scheme is reported.
    let scheme = url.split(':').next().unwrap_or_default();
    Err(DomainError::storage(format!("unsupported database scheme '{scheme}'")))
}
