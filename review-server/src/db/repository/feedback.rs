//! Internal Feedback Repository

use super::{RepoError, RepoResult};
use shared::models::{FeedbackStatus, InternalFeedback};
use sqlx::{Sqlite, SqlitePool};

const SELECT_FEEDBACK: &str = "SELECT f.id, f.text, f.status, f.created_at, \
     f.associated_server_id AS server_id, s.name AS server_name \
     FROM internal_feedback f LEFT JOIN server s ON s.id = f.associated_server_id";

/// Escape LIKE wildcards so user input matches literally
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

async fn fetch_one<'e, E>(executor: E, id: i64) -> RepoResult<Option<InternalFeedback>>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("{SELECT_FEEDBACK} WHERE f.id = ?");
    let row = sqlx::query_as::<_, InternalFeedback>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InternalFeedback>> {
    fetch_one(pool, id).await
}

/// Store a private note with status `new`
pub async fn create(
    pool: &SqlitePool,
    text: &str,
    server_id: Option<i64>,
    created_at: i64,
) -> RepoResult<InternalFeedback> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO internal_feedback (text, associated_server_id, status, created_at) \
         VALUES (?, ?, 'new', ?) RETURNING id",
    )
    .bind(text)
    .bind(server_id)
    .bind(created_at)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create feedback".into()))
}

/// Newest first, optionally filtered by status and by a substring of the
/// text or server name
pub async fn list(
    pool: &SqlitePool,
    status: Option<FeedbackStatus>,
    search: Option<&str>,
) -> RepoResult<Vec<InternalFeedback>> {
    let sql = format!(
        "{SELECT_FEEDBACK} \
         WHERE (?1 IS NULL OR f.status = ?1) \
           AND (?2 IS NULL OR f.text LIKE ?2 ESCAPE '\\' OR s.name LIKE ?2 ESCAPE '\\') \
         ORDER BY f.created_at DESC, f.id DESC"
    );
    let rows = sqlx::query_as::<_, InternalFeedback>(&sql)
        .bind(status.map(|s| s.as_str()))
        .bind(search.map(like_pattern))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_by_status(pool: &SqlitePool, status: FeedbackStatus) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM internal_feedback WHERE status = ?")
        .bind(status.as_str())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Move an entry forward in its triage lifecycle.
///
/// Re-applying the current status is a no-op; moving backwards is a
/// [`RepoError::Validation`].
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    next: FeedbackStatus,
) -> RepoResult<InternalFeedback> {
    let mut tx = pool.begin().await?;

    let current = fetch_one(&mut *tx, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Feedback {id} not found")))?;

    if !current.status.can_transition_to(next) {
        return Err(RepoError::Validation(format!(
            "Cannot move feedback from {} to {}",
            current.status, next
        )));
    }

    if current.status == next {
        return Ok(current);
    }

    sqlx::query("UPDATE internal_feedback SET status = ? WHERE id = ?")
        .bind(next.as_str())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let updated = fetch_one(&mut *tx, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Feedback {id} not found")))?;

    tx.commit().await?;
    Ok(updated)
}
