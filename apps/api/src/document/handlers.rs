//! Axum route handlers for the Document API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::document::{
    apply_budget, extract, merge, read_candidate_value, serialize, MergeReport, Preferences,
    StructuredDocument,
};
use crate::errors::AppError;
use crate::state::AppState;
use crate::tagging::derive_tags;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub document: StructuredDocument,
    pub tags: Vec<String>,
}

/// `payload` is either generator text or a JSON document.
#[derive(Debug, Deserialize)]
pub struct CandidateRequest {
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub document: StructuredDocument,
}

#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    #[serde(default)]
    pub original: Value,
    /// Null or empty when the generator produced nothing usable.
    #[serde(default)]
    pub candidate: Value,
}

#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub document: StructuredDocument,
    pub report: MergeReport,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SerializeRequest {
    #[serde(default)]
    pub document: Value,
}

#[derive(Debug, Serialize)]
pub struct SerializeResponse {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TagsRequest {
    #[serde(default)]
    pub document: Value,
    #[serde(default)]
    pub preferences: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents/extract
///
/// Extracts a StructuredDocument from résumé text and derives its tags.
pub async fn handle_extract(
    payload: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, AppError> {
    let Json(request) = payload?;
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let document = extract(&request.text);
    let tags = derive_tags(&document, &Preferences::default());
    info!(
        "Extracted document with {} experiences and {} tags",
        document.experiences.len(),
        tags.len()
    );

    Ok(Json(ExtractResponse { document, tags }))
}

/// POST /api/v1/documents/candidate
///
/// Reads a generator payload (JSON, fenced JSON or text) leniently.
pub async fn handle_candidate(
    payload: Result<Json<CandidateRequest>, JsonRejection>,
) -> Result<Json<DocumentResponse>, AppError> {
    let Json(request) = payload?;
    let document = read_candidate_value(&request.payload);
    Ok(Json(DocumentResponse { document }))
}

/// POST /api/v1/documents/merge
///
/// Merges a candidate rewrite into the original without losing any original entity.
/// Without a usable candidate the original is only trimmed to the page budget.
pub async fn handle_merge(
    State(state): State<AppState>,
    payload: Result<Json<MergeRequest>, JsonRejection>,
) -> Result<Json<MergeResponse>, AppError> {
    let Json(request) = payload?;
    if request.original.is_null() {
        return Err(AppError::Validation("original document is required".to_string()));
    }

    let budget = &state.config.page_budget;
    let original = read_candidate_value(&request.original);
    let candidate = read_candidate_value(&request.candidate);

    let (document, report) = if candidate.is_empty() {
        warn!("Empty candidate; returning the original trimmed to the page budget");
        (apply_budget(&original, budget), MergeReport::default())
    } else {
        let merged = merge(&original, &candidate, budget);
        (merged.document, merged.report)
    };
    let text = serialize(&document);

    Ok(Json(MergeResponse {
        document,
        report,
        text,
    }))
}

/// POST /api/v1/documents/serialize
pub async fn handle_serialize(
    payload: Result<Json<SerializeRequest>, JsonRejection>,
) -> Result<Json<SerializeResponse>, AppError> {
    let Json(request) = payload?;
    let document = read_candidate_value(&request.document);
    Ok(Json(SerializeResponse {
        text: serialize(&document),
    }))
}

/// POST /api/v1/documents/tags
pub async fn handle_tags(
    payload: Result<Json<TagsRequest>, JsonRejection>,
) -> Result<Json<TagsResponse>, AppError> {
    let Json(request) = payload?;
    let document = read_candidate_value(&request.document);
    let preferences = match request.preferences {
        Some(value) if !value.is_null() => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Ignoring malformed preferences: {e}");
            Preferences::default()
        }),
        _ => Preferences::default(),
    };

    Ok(Json(TagsResponse {
        tags: derive_tags(&document, &preferences),
    }))
}
