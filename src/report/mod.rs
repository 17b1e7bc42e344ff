pub mod json;
pub mod md;

use crate::error::DeckError;
use crate::search::SearchRequest;
use crate::types::card::Catalog;
use crate::types::report::SearchOutcome;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizeReport {
    pub generated_at: String,
    pub catalog_digest: String,
    pub mode: String,
    pub deck_size: usize,
    pub pinned: Vec<String>,
    pub dummy_traits: Vec<String>,
    pub outcome: SearchOutcome,
}

impl OptimizeReport {
    pub fn new(
        catalog: &Catalog,
        mode: &str,
        request: &SearchRequest,
        outcome: SearchOutcome,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            catalog_digest: catalog.fingerprint(),
            mode: mode.to_string(),
            deck_size: request.deck_size,
            pinned: request.pinned.clone(),
            dummy_traits: request.dummy_traits.clone(),
            outcome,
        }
    }
}

/// `display_limit` only affects the text format; JSON always carries every kept deck.
pub fn render(
    report: &OptimizeReport,
    format: OutputFormat,
    display_limit: usize,
) -> Result<String, DeckError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(DeckError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report, display_limit)),
    }
}
