use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::chips::search::searchable_query;
use crate::errors::AppError;
use crate::models::{Field, Item};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub q: String,
}

/// GET /api/get-suggestions?type={field}&q={query}
///
/// Unknown types and too-short queries answer with an empty list.
pub async fn handle_get_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> Result<Json<Vec<Item>>, AppError> {
    let Some(field) = params.field_type.as_deref().and_then(Field::from_type) else {
        warn!(field_type = ?params.field_type, "unknown suggestion type");
        return Ok(Json(Vec::new()));
    };

    let Some(query) = searchable_query(&params.q) else {
        return Ok(Json(Vec::new()));
    };

    let items = state
        .catalog
        .search(field, query, state.config.suggestion_limit)
        .await?;
    Ok(Json(items))
}
