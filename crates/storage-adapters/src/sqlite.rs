//! # SqlitePostRepository
//!
//! Maps the `posts` table onto the domain `Post`.
//!
//! Report reasons live in a JSON array column so that a report is a single
//! `UPDATE ... RETURNING`: increment, append, and escalation happen in one
//! statement and cannot interleave with another report on the same row.

use std::fmt::Display;
use std::str::FromStr;

use async_trait::async_trait;
use domains::{
    DomainError, DomainResult, FeedFilter, KeepResolution, Mood, Post, PostId, PostRepository, PostStatus,
    ESCALATION_THRESHOLD,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};
use tracing::{error, info};
use uuid::Uuid;

const POST_COLUMNS: &str =
    "id, image_url, caption, mood, location, sender, status, is_reported, report_count, report_reasons, created_at";

pub struct SqlitePostRepository {
    pool: SqlitePool,
}

fn storage_err(err: impl Display) -> DomainError {
    error!(error = %err, "sqlite operation failed");
    DomainError::storage(err)
}

fn parse_id(raw: &str) -> DomainResult<PostId> {
    Uuid::parse_str(raw).map(PostId).map_err(storage_err)
}

fn post_from_row(row: &SqliteRow) -> DomainResult<Post> {
    let id: String = row.try_get("id").map_err(storage_err)?;
    let mood: String = row.try_get("mood").map_err(storage_err)?;
    let status: String = row.try_get("status").map_err(storage_err)?;
    let report_count: i64 = row.try_get("report_count").map_err(storage_err)?;
    let report_reasons: String = row.try_get("report_reasons").map_err(storage_err)?;

    Ok(Post {
        id: parse_id(&id)?,
        image_url: row.try_get("image_url").map_err(storage_err)?,
        caption: row.try_get("caption").map_err(storage_err)?,
        mood: Mood::from_str(&mood).map_err(storage_err)?,
        location: row.try_get("location").map_err(storage_err)?,
        sender: row.try_get("sender").map_err(storage_err)?,
        status: PostStatus::from_str(&status)?,
        is_reported: row.try_get("is_reported").map_err(storage_err)?,
        report_count: u32::try_from(report_count).map_err(storage_err)?,
        report_reasons: serde_json::from_str(&report_reasons).map_err(storage_err)?,
        created_at: row.try_get("created_at").map_err(storage_err)?,
    })
}

fn posts_from_rows(rows: &[SqliteRow]) -> DomainResult<Vec<Post>> {
    rows.iter().map(post_from_row).collect()
}

impl SqlitePostRepository {
    /// Opens the pool and applies the embedded migrations.
    ///
    /// `sqlite::memory:` databases exist per connection, so they get a single
    /// connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> DomainResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(storage_err)?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new();
        if in_memory {
            pool_options = pool_options.max_connections(1).idle_timeout(None).max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(max_connections.max(1));
        }

        let pool = pool_options.connect_with(options).await.map_err(storage_err)?;
        sqlx::migrate!("./migrations").run(&pool).await.map_err(storage_err)?;

        info!(in_memory, "sqlite post store ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn insert(&self, post: &Post) -> DomainResult<()> {
        let reasons = serde_json::to_string(&post.report_reasons).map_err(storage_err)?;
        sqlx::query(
            "INSERT INTO posts (id, image_url, caption, mood, location, sender, status, is_reported, report_count, report_reasons, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(post.id.to_string())
        .bind(post.image_url.as_str())
        .bind(post.caption.as_str())
        .bind(post.mood.as_str())
        .bind(post.location.as_deref())
        .bind(post.sender.as_str())
        .bind(post.status.as_str())
        .bind(post.is_reported)
        .bind(i64::from(post.report_count))
        .bind(reasons)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(storage_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn find_visible(&self, filter: &FeedFilter) -> DomainResult<Vec<Post>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {POST_COLUMNS} FROM posts WHERE status = "));
        query.push_bind(PostStatus::Active.as_str());

        if let Some(mood) = filter.mood {
            query.push(" AND mood = ").push_bind(mood.as_str());
        }

        let terms = filter.search_terms();
        if !terms.is_empty() {
            query.push(" AND (");
            for (i, term) in terms.into_iter().enumerate() {
                if i > 0 {
                    query.push(" OR ");
                }
                query.push("instr(lower(caption), lower(").push_bind(term).push(")) > 0");
            }
            query.push(")");
        }

        query.push(" ORDER BY created_at DESC, id DESC");

        let rows = query.build().fetch_all(&self.pool).await.map_err(storage_err)?;
        posts_from_rows(&rows)
    }

    async fn find_reported(&self) -> DomainResult<Vec<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE is_reported = 1 ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await.map_err(storage_err)?;
        posts_from_rows(&rows)
    }

    async fn record_report(&self, id: PostId, reason: &str) -> DomainResult<Option<Post>> {
        // Right-hand sides see the pre-update row, hence `report_count + 1`.
        let sql = format!(
            "UPDATE posts SET \
                is_reported = 1, \
                report_count = report_count + 1, \
                report_reasons = json_insert(report_reasons, '$[#]', ?), \
                status = CASE WHEN report_count + 1 >= ? THEN ? ELSE status END \
             WHERE id = ? \
             RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(reason)
            .bind(i64::from(ESCALATION_THRESHOLD))
            .bind(PostStatus::Reported.as_str())
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err)?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn resolve_keep(&self, id: PostId, resolution: KeepResolution) -> DomainResult<Option<Post>> {
        let row = match resolution {
            KeepResolution::ClearFlag => {
                let sql = format!("UPDATE posts SET is_reported = 0 WHERE id = ? RETURNING {POST_COLUMNS}");
                sqlx::query(&sql)
                    .bind(id.to_string())
                    .fetch_optional(&self.pool)
                    .await
            }
            KeepResolution::Restore => {
                let sql = format!(
                    "UPDATE posts SET is_reported = 0, status = ?, report_count = 0, report_reasons = '[]' \
                     WHERE id = ? RETURNING {POST_COLUMNS}"
                );
                sqlx::query(&sql)
                    .bind(PostStatus::Active.as_str())
                    .bind(id.to_string())
                    .fetch_optional(&self.pool)
                    .await
            }
        }
        .map_err(storage_err)?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn delete(&self, id: PostId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(storage_err)?;
        Ok(result.rows_affected() > 0)
    }
}
