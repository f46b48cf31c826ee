//! Menu Option Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuOption, MenuOptionCreate, MenuOptionSummary, MenuOptionUpdate};
use shared::util::title_case;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuOption>> {
    let options = sqlx::query_as::<_, MenuOption>(
        "SELECT id, text, category FROM menu_option ORDER BY category, text",
    )
    .fetch_all(pool)
    .await?;
    Ok(options)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuOption>> {
    let option =
        sqlx::query_as::<_, MenuOption>("SELECT id, text, category FROM menu_option WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(option)
}

/// Category of the option whose text matches `text`, ignoring case.
/// Option texts are stored title-cased.
pub async fn find_category_by_text(pool: &SqlitePool, text: &str) -> RepoResult<Option<String>> {
    let category: Option<String> = sqlx::query_scalar(
        "SELECT category FROM menu_option WHERE text = ? COLLATE NOCASE ORDER BY id LIMIT 1",
    )
    .bind(title_case(text))
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

/// Options grouped by category, each group sorted by text
pub async fn find_grouped(
    pool: &SqlitePool,
) -> RepoResult<BTreeMap<String, Vec<MenuOptionSummary>>> {
    let mut grouped: BTreeMap<String, Vec<MenuOptionSummary>> = BTreeMap::new();
    for option in find_all(pool).await? {
        grouped
            .entry(option.category)
            .or_default()
            .push(MenuOptionSummary {
                id: option.id,
                text: option.text,
            });
    }
    Ok(grouped)
}

/// Insert an option; `data` must already be normalized
pub async fn create(pool: &SqlitePool, data: &MenuOptionCreate) -> RepoResult<MenuOption> {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO menu_option (text, category) VALUES (?, ?) RETURNING id")
            .bind(&data.text)
            .bind(&data.category)
            .fetch_one(pool)
            .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu option".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: &MenuOptionUpdate) -> RepoResult<MenuOption> {
    let rows = sqlx::query(
        "UPDATE menu_option SET text = COALESCE(?1, text), category = COALESCE(?2, category) WHERE id = ?3",
    )
    .bind(&data.text)
    .bind(&data.category)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu option {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu option {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menu_option WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu option {id} not found")));
    }
    Ok(())
}
