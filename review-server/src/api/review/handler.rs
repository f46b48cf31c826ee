//! Review generation handler

use axum::{Json, extract::State};
use shared::models::{
    GenerateReviewRequest, GenerateReviewResponse, MenuSelectionEntry, QualitativeEntry,
    ReviewTag, Server,
};
use shared::util::{now_millis, non_blank};
use sqlx::SqlitePool;

use crate::api::JsonBody;
use crate::core::AppState;
use crate::db::repository::review_log::VisitLog;
use crate::db::repository::{feedback, menu_option, review_log, server};
use crate::review::{TagCategory, VisitSummary, build_prompt, has_content};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Output language when the client sends none
pub const DEFAULT_LANG: &str = "fr";
/// Dish category for dishes missing from the menu
pub const UNCATEGORIZED: &str = "uncategorized";
/// Reply to a request that only carried a private note
pub const FEEDBACK_RECEIVED: &str = "Thank you! Your feedback has been passed on to the team.";

/// POST /generate-review
///
/// Stores the private note (if any), asks the generator for a review and,
/// once it succeeds, appends the visit to the analytics logs. The review is
/// only returned when those logs were written.
pub async fn generate(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenerateReviewRequest>,
) -> AppResult<Json<GenerateReviewResponse>> {

    let note = non_blank(req.private_feedback.as_deref());
    let summary = VisitSummary::from_tags(&req.tags);
    if !has_content(&summary, note.as_deref()) {
        return Err(AppError::new(ErrorCode::EmptyReviewRequest));
    }

    let now = now_millis();
    let roster_server = match summary.server_name.as_deref() {
        Some(name) => server::find_by_name(&state.pool, name).await?,
        None => None,
    };

    if let Some(text) = note.as_deref() {
        let stored =
            feedback::create(&state.pool, text, roster_server.as_ref().map(|s| s.id), now).await?;
        tracing::info!(feedback_id = stored.id, "Private feedback stored");
    }

    if !summary.has_tag_content() {
        return Ok(Json(GenerateReviewResponse::FeedbackOnly {
            message: FEEDBACK_RECEIVED.to_string(),
        }));
    }

    let lang = non_blank(req.lang.as_deref()).unwrap_or_else(|| DEFAULT_LANG.to_string());
    let prompt = build_prompt(&state.config.restaurant_name, &lang, &summary);

    let review = state.generator.generate(&prompt).await.map_err(|e| {
        tracing::error!(error = %e, "Review generation failed");
        AppError::new(ErrorCode::GenerationFailed)
    })?;

    let visit = VisitLog {
        server_name: credited_server(&summary, roster_server.as_ref()),
        mode: non_blank(req.mode.as_deref()),
        dishes: dish_entries(&state.pool, &summary.dishes).await?,
        qualitative: qualitative_entries(&req.tags),
        created_at: now,
    };

    review_log::record_visit(&state.pool, &visit)
        .await
        .map_err(|e| AppError::database(format!("Failed to record visit logs: {e}")))?;

    tracing::info!(
        server = visit.server_name.as_deref().unwrap_or("-"),
        lang = %lang,
        dishes = visit.dishes.len(),
        "Review generated"
    );

    Ok(Json(GenerateReviewResponse::Review { review }))
}

/// Roster spelling when the name is known, otherwise the name as sent
fn credited_server(summary: &VisitSummary, roster: Option<&Server>) -> Option<String> {
    match roster {
        Some(server) => Some(server.name.clone()),
        None => summary.server_name.clone(),
    }
}

/// Attach each dish's menu category
async fn dish_entries(pool: &SqlitePool, dishes: &[String]) -> AppResult<Vec<MenuSelectionEntry>> {
    let mut entries = Vec::with_capacity(dishes.len());
    for dish in dishes {
        let dish_category = menu_option::find_category_by_text(pool, dish)
            .await?
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        entries.push(MenuSelectionEntry {
            dish_name: dish.clone(),
            dish_category,
        });
    }
    Ok(entries)
}

fn qualitative_entries(tags: &[ReviewTag]) -> Vec<QualitativeEntry> {
    tags.iter()
        .filter_map(|tag| {
            let category = TagCategory::parse(&tag.category);
            let value = tag.value.trim();
            let keep = category.is_qualitative() && !category.as_str().is_empty() && !value.is_empty();
            keep.then(|| QualitativeEntry {
                category: category.as_str().to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualitative_entries_skip_identity_and_dishes() {
        let tags = vec![
            ReviewTag::new("server_name", "Léa"),
            ReviewTag::new("reason_for_visit", "Anniversary"),
            ReviewTag::new("liked_dishes", "Tiramisu"),
            ReviewTag::new("atmosphere", " Cosy "),
            ReviewTag::new("service_qualities", ""),
            ReviewTag::new("wine", "Chianti"),
            ReviewTag::new("", "orphan"),
        ];
        let entries = qualitative_entries(&tags);
        assert_eq!(
            entries,
            vec![
                QualitativeEntry {
                    category: "atmosphere".into(),
                    value: "Cosy".into()
                },
                QualitativeEntry {
                    category: "wine".into(),
                    value: "Chianti".into()
                },
            ]
        );
    }

    #[test]
    fn test_credited_server_prefers_roster_spelling() {
        let summary = VisitSummary::from_tags(&[ReviewTag::new("server_name", "léa")]);
        let roster = Server {
            id: 1,
            name: "Léa".into(),
            image_url: None,
        };
        assert_eq!(
            credited_server(&summary, Some(&roster)).as_deref(),
            Some("Léa")
        );
        assert_eq!(credited_server(&summary, None).as_deref(), Some("léa"));
        assert_eq!(credited_server(&VisitSummary::default(), None), None);
    }
}
