//! Append-only visit logs: generated reviews, dish selections and
//! qualitative tags

use super::RepoResult;
use shared::models::{GeneratedReview, MenuSelectionEntry, QualitativeEntry, ResetSummary};
use sqlx::SqlitePool;

/// Everything one successful generation appends
#[derive(Debug, Clone, Default)]
pub struct VisitLog {
    /// Only set when the customer named a server
    pub server_name: Option<String>,
    pub mode: Option<String>,
    pub dishes: Vec<MenuSelectionEntry>,
    pub qualitative: Vec<QualitativeEntry>,
    pub created_at: i64,
}

pub async fn insert_review(
    pool: &SqlitePool,
    server_name: &str,
    mode: Option<&str>,
    created_at: i64,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO generated_review (server_name, created_at, mode) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(server_name)
    .bind(created_at)
    .bind(mode)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Write a visit's log rows in one transaction
pub async fn record_visit(pool: &SqlitePool, visit: &VisitLog) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    if let Some(server_name) = visit.server_name.as_deref() {
        sqlx::query("INSERT INTO generated_review (server_name, created_at, mode) VALUES (?, ?, ?)")
            .bind(server_name)
            .bind(visit.created_at)
            .bind(visit.mode.as_deref())
            .execute(&mut *tx)
            .await?;
    }

    for dish in &visit.dishes {
        sqlx::query(
            "INSERT INTO menu_selection (dish_name, dish_category, created_at) VALUES (?, ?, ?)",
        )
        .bind(&dish.dish_name)
        .bind(&dish.dish_category)
        .bind(visit.created_at)
        .execute(&mut *tx)
        .await?;
    }

    for entry in &visit.qualitative {
        sqlx::query(
            "INSERT INTO qualitative_feedback (category, value, created_at) VALUES (?, ?, ?)",
        )
        .bind(&entry.category)
        .bind(&entry.value)
        .bind(visit.created_at)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn count_for_server(pool: &SqlitePool, server_name: &str) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM generated_review WHERE server_name = ?")
        .bind(server_name)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Reviews created at or after `since` (Unix millis); `None` counts all
pub async fn count_since(pool: &SqlitePool, since: Option<i64>) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM generated_review WHERE ?1 IS NULL OR created_at >= ?1")
            .bind(since)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<GeneratedReview>> {
    let rows = sqlx::query_as::<_, GeneratedReview>(
        "SELECT id, server_name, created_at, mode FROM generated_review \
         ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Empty every log table, including internal feedback. Catalog tables are
/// kept.
pub async fn reset_all(pool: &SqlitePool) -> RepoResult<ResetSummary> {
    let mut tx = pool.begin().await?;

    let generated_reviews = sqlx::query("DELETE FROM generated_review")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let menu_selections = sqlx::query("DELETE FROM menu_selection")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let qualitative_feedback = sqlx::query("DELETE FROM qualitative_feedback")
        .execute(&mut *tx)
        .await?
        .rows_affected();
    let internal_feedback = sqlx::query("DELETE FROM internal_feedback")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    Ok(ResetSummary {
        generated_reviews,
        menu_selections,
        qualitative_feedback,
        internal_feedback,
    })
}
