//! Section handlers
//!
//! The two read endpoints plus the shared 404 fallback. Query parameters
//! are parsed loosely: a missing or malformed `page` means page 0, and
//! the detail lookup takes the raw strings straight into the catalog key
//! so any non-matching pair is a plain miss.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::catalog::{SectionDetail, SectionPage};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListSectionsQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GetSectionQuery {
    pub kind: Option<String>,
    pub index: Option<String>,
}

/// GET /api/sections?page=0
///
/// Paginated section references.
pub async fn list_sections(
    State(state): State<AppState>,
    Query(query): Query<ListSectionsQuery>,
) -> Json<SectionPage> {
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);

    simulate_latency(state.config.sections_delay_ms).await;

    Json(state.catalog.page(page))
}

/// GET /api/section?kind=hero&index=0
///
/// Full detail record for one section.
pub async fn get_section(
    State(state): State<AppState>,
    Query(query): Query<GetSectionQuery>,
) -> Result<Json<SectionDetail>, AppError> {
    simulate_latency(state.config.section_delay_ms).await;

    let kind = query.kind.as_deref().unwrap_or("");
    let index = query.index.as_deref().unwrap_or("");

    state
        .catalog
        .detail(kind, index)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Fallback for unknown routes and wrong methods on known routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

async fn simulate_latency(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
