//! Dashboard aggregates
//!
//! Read-only `GROUP BY` queries over the visit logs. Nothing computed here
//! is stored.

use super::RepoResult;
use chrono::{Days, NaiveDate, NaiveTime};
use shared::models::{DishStat, QualitativeSynthesis, ServerStat, TrendPoint, ValueCount};
use sqlx::SqlitePool;
use std::collections::HashMap;

/// Days covered by the review trend, today included
pub const TREND_DAYS: u64 = 14;

/// Review counts for every roster server (zero-filled) plus any name that
/// only appears in the log, most reviewed first
pub async fn server_stats(pool: &SqlitePool, since: Option<i64>) -> RepoResult<Vec<ServerStat>> {
    let stats = sqlx::query_as::<_, ServerStat>(
        "SELECT n.name AS server_name, COUNT(r.id) AS count \
         FROM ( \
             SELECT name FROM server \
             UNION \
             SELECT server_name FROM generated_review WHERE ?1 IS NULL OR created_at >= ?1 \
         ) n \
         LEFT JOIN generated_review r \
             ON r.server_name = n.name AND (?1 IS NULL OR r.created_at >= ?1) \
         GROUP BY n.name \
         ORDER BY count DESC, server_name ASC",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

pub async fn menu_performance(pool: &SqlitePool, since: Option<i64>) -> RepoResult<Vec<DishStat>> {
    let stats = sqlx::query_as::<_, DishStat>(
        "SELECT dish_name, dish_category, COUNT(*) AS count \
         FROM menu_selection \
         WHERE ?1 IS NULL OR created_at >= ?1 \
         GROUP BY dish_name, dish_category \
         ORDER BY count DESC, dish_name ASC",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;
    Ok(stats)
}

/// Tag value frequencies per category, values by count descending
pub async fn qualitative_synthesis(pool: &SqlitePool) -> RepoResult<QualitativeSynthesis> {
    let rows = sqlx::query_as::<_, (String, String, i64)>(
        "SELECT category, value, COUNT(*) AS count \
         FROM qualitative_feedback \
         GROUP BY category, value \
         ORDER BY category ASC, count DESC, value ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut synthesis = QualitativeSynthesis::new();
    for (category, value, count) in rows {
        synthesis
            .entry(category)
            .or_default()
            .push(ValueCount { value, count });
    }
    Ok(synthesis)
}

/// First day of the trend window ending on `today`
fn trend_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(TREND_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Daily review counts for the [`TREND_DAYS`] days ending on `today` (UTC),
/// ascending and zero-filled
pub async fn review_trend(pool: &SqlitePool, today: NaiveDate) -> RepoResult<Vec<TrendPoint>> {
    let since = trend_start(today)
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp_millis();

    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT date(created_at / 1000, 'unixepoch') AS day, COUNT(*) AS count \
         FROM generated_review \
         WHERE created_at >= ? \
         GROUP BY day",
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(fill_trend(today, &rows.into_iter().collect()))
}

/// One point per day of the window, missing days counted as zero
pub fn fill_trend(today: NaiveDate, counts: &HashMap<String, i64>) -> Vec<TrendPoint> {
    trend_start(today)
        .iter_days()
        .take(TREND_DAYS as usize)
        .map(|day| {
            let date = day.format("%Y-%m-%d").to_string();
            let count = counts.get(&date).copied().unwrap_or(0);
            TrendPoint { date, count }
        })
        .collect()
}
