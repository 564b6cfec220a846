//! Clinical text cleaning endpoints.
//!
//! Two endpoints:
//! - `POST /api/clean-text` — normalize `rawText`, return cleaned text + rule log
//! - `GET /api/clean-text/rules` — catalog of rules in application order

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::normalizer::{self, NormalizationLogEntry, RuleInfo};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanTextRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanTextResponse {
    pub success: bool,
    pub clean_text: String,
    pub logs: Vec<NormalizationLogEntry>,
}

#[derive(Debug, Serialize)]
pub struct RuleCatalogResponse {
    pub rules: Vec<RuleInfo>,
}

/// `POST /api/clean-text` — normalize clinical free text.
///
/// The body is validated before the normalizer runs; any shape problem is a
/// 400 with `{ "error": ... }`.
pub async fn clean(
    payload: Result<Json<CleanTextRequest>, JsonRejection>,
) -> Result<Json<CleanTextResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(status = %rejection.status(), "Rejected clean-text request");
        ApiError::from(rejection)
    })?;

    let normalized = normalizer::normalize(&request.raw_text);

    Ok(Json(CleanTextResponse {
        success: true,
        clean_text: normalized.clean_text,
        logs: normalized.logs,
    }))
}

/// `GET /api/clean-text/rules` — list every normalization rule.
pub async fn rules() -> Json<RuleCatalogResponse> {
    Json(RuleCatalogResponse {
        rules: normalizer::rule_catalog(),
    })
}
