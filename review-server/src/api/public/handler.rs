//! Public catalog handler

use axum::{Json, extract::State};

use crate::core::AppState;
use crate::db::repository::{menu_option, server};
use crate::utils::AppResult;
use shared::models::PublicData;

/// GET /api/public/data - roster and menu options for the customer UI
pub async fn data(State(state): State<AppState>) -> AppResult<Json<PublicData>> {
    let servers = server::find_summaries(&state.pool).await?;
    let flavors = menu_option::find_grouped(&state.pool).await?;
    Ok(Json(PublicData { servers, flavors }))
}
