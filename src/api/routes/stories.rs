//! Story handlers: the rendered front page and its JSON twin.

use std::time::Instant;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::StoriesResponse;
use crate::api::AppState;
use crate::error::{Error, Result};
use crate::item::ParsedItem;
use crate::render::{PageData, render_index};

/// Load the ranked ids and aggregate the configured number of stories.
///
/// Running short of stories is not an error here: the partial list is
/// returned and logged. Failing to load the ranked ids is.
async fn load_stories(state: &AppState) -> Result<Vec<ParsedItem>> {
    let n = state.config.server.num_stories;
    let ids = state.client.top_items().await?;

    match state.aggregator.fetch(&ids, n).await {
        Ok(stories) => Ok(stories),
        Err(Error::InsufficientResults { requested, items }) => {
            tracing::warn!(
                requested,
                found = items.len(),
                "Could not load the requested number of stories"
            );
            Ok(items)
        }
        Err(e) => Err(e),
    }
}

/// GET / - Rendered front page
pub async fn index(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    let stories = match load_stories(&state).await {
        Ok(stories) => stories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load top stories");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load top stories",
            )
                .into_response();
        }
    };

    let html = render_index(&PageData {
        stories: &stories,
        requested: state.config.server.num_stories,
        elapsed: start.elapsed(),
        now: chrono::Utc::now(),
    });
    Html(html).into_response()
}

/// GET /api/stories - Story list as JSON
pub async fn list_stories(State(state): State<AppState>) -> Response {
    let start = Instant::now();

    match load_stories(&state).await {
        Ok(stories) => {
            let requested = state.config.server.num_stories;
            let body = StoriesResponse {
                complete: stories.len() >= requested,
                stories,
                requested,
                elapsed_ms: start.elapsed().as_millis() as u64,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
