//! Server (staff roster) Repository
//!
//! Review log rows reference servers by display name, so rename and delete
//! touch `generated_review` inside the same transaction.

use super::{RepoError, RepoResult};
use shared::models::{Server, ServerCreate, ServerSummary, ServerUpdate};
use shared::util::title_case;
use sqlx::SqlitePool;

/// What a server delete removed or detached
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDeletion {
    pub server: Server,
    pub reviews_removed: u64,
    pub feedback_detached: u64,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Server>> {
    let servers =
        sqlx::query_as::<_, Server>("SELECT id, name, image_url FROM server ORDER BY name")
            .fetch_all(pool)
            .await?;
    Ok(servers)
}

pub async fn find_summaries(pool: &SqlitePool) -> RepoResult<Vec<ServerSummary>> {
    let servers = sqlx::query_as::<_, ServerSummary>("SELECT id, name FROM server ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(servers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Server>> {
    let server =
        sqlx::query_as::<_, Server>("SELECT id, name, image_url FROM server WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(server)
}

/// Lookup by display name, ignoring case (accented letters included).
/// Stored names are title-cased, so `name` is title-cased before comparing.
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Server>> {
    let server = sqlx::query_as::<_, Server>(
        "SELECT id, name, image_url FROM server WHERE name = ? COLLATE NOCASE LIMIT 1",
    )
    .bind(title_case(name))
    .fetch_optional(pool)
    .await?;
    Ok(server)
}

/// Insert a server; `data` must already be normalized
pub async fn create(pool: &SqlitePool, data: &ServerCreate) -> RepoResult<Server> {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO server (name, image_url) VALUES (?, ?) RETURNING id")
            .bind(&data.name)
            .bind(&data.image_url)
            .fetch_one(pool)
            .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create server".into()))
}

/// Apply a normalized update.
///
/// `image_url: Some("")` clears the image. A rename re-keys the server's
/// review log rows.
pub async fn update(pool: &SqlitePool, id: i64, data: &ServerUpdate) -> RepoResult<Server> {
    let mut tx = pool.begin().await?;

    let current =
        sqlx::query_as::<_, Server>("SELECT id, name, image_url FROM server WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Server {id} not found")))?;

    if let Some(name) = data.name.as_deref()
        && name != current.name
    {
        sqlx::query("UPDATE server SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let rekeyed = sqlx::query("UPDATE generated_review SET server_name = ? WHERE server_name = ?")
            .bind(name)
            .bind(&current.name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(server_id = id, rekeyed, "Re-keyed review log after rename");
    }

    if let Some(image_url) = data.image_url.as_deref() {
        sqlx::query("UPDATE server SET image_url = NULLIF(?, '') WHERE id = ?")
            .bind(image_url)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    let updated =
        sqlx::query_as::<_, Server>("SELECT id, name, image_url FROM server WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Delete a server, detaching its feedback and dropping its review log rows
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<ServerDeletion> {
    let mut tx = pool.begin().await?;

    let server =
        sqlx::query_as::<_, Server>("SELECT id, name, image_url FROM server WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Server {id} not found")))?;

    let feedback_detached = sqlx::query(
        "UPDATE internal_feedback SET associated_server_id = NULL WHERE associated_server_id = ?",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let reviews_removed = sqlx::query("DELETE FROM generated_review WHERE server_name = ?")
        .bind(&server.name)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM server WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ServerDeletion {
        server,
        reviews_removed,
        feedback_detached,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::{feedback, review_log};

    async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn new_server(name: &str) -> ServerCreate {
        ServerCreate {
            name: name.to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let created = create(&pool, &new_server("Léa")).await.unwrap();
        assert_eq!(created.name, "Léa");
        assert!(created.image_url.is_none());

        let found = find_by_name(&pool, "léa").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        let found = find_by_name(&pool, " LÉA ").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(find_by_name(&pool, "Marco").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let pool = test_pool().await;
        create(&pool, &new_server("Marco")).await.unwrap();
        let err = create(&pool, &new_server("Marco")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_all_sorted_by_name() {
        let pool = test_pool().await;
        create(&pool, &new_server("Zoé")).await.unwrap();
        create(&pool, &new_server("Anna")).await.unwrap();
        let names: Vec<_> = find_all(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Anna", "Zoé"]);
    }

    #[tokio::test]
    async fn test_rename_rekeys_review_log() {
        let pool = test_pool().await;
        let server = create(&pool, &new_server("Marco")).await.unwrap();
        review_log::insert_review(&pool, "Marco", None, 1_000)
            .await
            .unwrap();

        let update_data = ServerUpdate {
            name: Some("Marco Rossi".into()),
            image_url: None,
        };
        let updated = update(&pool, server.id, &update_data).await.unwrap();
        assert_eq!(updated.name, "Marco Rossi");

        assert_eq!(review_log::count_for_server(&pool, "Marco").await.unwrap(), 0);
        assert_eq!(
            review_log::count_for_server(&pool, "Marco Rossi")
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_update_clears_image() {
        let pool = test_pool().await;
        let server = create(
            &pool,
            &ServerCreate {
                name: "Anna".into(),
                image_url: Some("https://cdn.example/anna.jpg".into()),
            },
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            server.id,
            &ServerUpdate {
                name: None,
                image_url: Some(String::new()),
            },
        )
        .await
        .unwrap();
        assert!(updated.image_url.is_none());
        assert_eq!(updated.name, "Anna");
    }

    #[tokio::test]
    async fn test_update_missing_server() {
        let pool = test_pool().await;
        let err = update(&pool, 42, &ServerUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rename_collision() {
        let pool = test_pool().await;
        create(&pool, &new_server("Anna")).await.unwrap();
        let marco = create(&pool, &new_server("Marco")).await.unwrap();
        let err = update(
            &pool,
            marco.id,
            &ServerUpdate {
                name: Some("Anna".into()),
                image_url: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let pool = test_pool().await;
        let lea = create(&pool, &new_server("Léa")).await.unwrap();
        let marco = create(&pool, &new_server("Marco")).await.unwrap();
        review_log::insert_review(&pool, "Léa", None, 1_000)
            .await
            .unwrap();
        review_log::insert_review(&pool, "Léa", Some("quick"), 2_000)
            .await
            .unwrap();
        review_log::insert_review(&pool, "Marco", None, 3_000)
            .await
            .unwrap();
        let note = feedback::create(&pool, "Bread was stale", Some(lea.id), 4_000)
            .await
            .unwrap();

        let deletion = delete(&pool, lea.id).await.unwrap();
        assert_eq!(deletion.server.name, "Léa");
        assert_eq!(deletion.reviews_removed, 2);
        assert_eq!(deletion.feedback_detached, 1);

        assert!(find_by_id(&pool, lea.id).await.unwrap().is_none());
        assert!(find_by_id(&pool, marco.id).await.unwrap().is_some());
        assert_eq!(review_log::count_for_server(&pool, "Léa").await.unwrap(), 0);
        assert_eq!(review_log::count_for_server(&pool, "Marco").await.unwrap(), 1);

        let kept = feedback::find_by_id(&pool, note.id).await.unwrap().unwrap();
        assert!(kept.server_id.is_none());
        assert!(kept.server_name.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_server() {
        let pool = test_pool().await;
        assert!(matches!(
            delete(&pool, 7).await.unwrap_err(),
            RepoError::NotFound(_)
        ));
    }
}
