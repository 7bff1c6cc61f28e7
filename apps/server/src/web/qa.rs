//! Contextual document Q&A handler.
//!
//! The upload pipeline does not extract text yet, so questions are answered
//! against a fixed demo document. The adapter seam is real; the document
//! source is the placeholder.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{ApiError, ErrorCode};
use crate::state::AppState;
use crate::web::require_user;

/// Stand-in for extracted document text.
///
/// TODO: replace with per-job extracted text once uploads carry content.
const DEMO_DOCUMENT: &str = "This document is a placeholder for the text of \
the user's uploaded file. It describes the V-Print Hub campus printing \
service: students book a fifteen-minute pickup slot, upload a document, \
configure copies, pages, color, and paper size, and pay from their campus \
wallet or by UPI before printing begins.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QaRequest {
    pub question: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QaResponse {
    pub answer: String,
}

/// `POST /qa` - ask a question about the (demo) document.
pub async fn qa_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<QaRequest>,
) -> Result<Json<QaResponse>, ApiError> {
    let user_id = require_user(&headers)?;

    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::validation("question must not be empty"));
    }

    let qa = state.qa.as_ref().ok_or_else(|| {
        warn!(user_id = %user_id, "Q&A requested but no OpenAI key is configured");
        ApiError::new(
            ErrorCode::QaUnavailable,
            "Document Q&A is not configured on this server",
        )
    })?;

    let answer = qa.answer(question, DEMO_DOCUMENT).await.map_err(|e| {
        error!(user_id = %user_id, error = %e, "Q&A backend failed");
        ApiError::new(
            ErrorCode::QaFailed,
            "Sorry, I couldn't get an answer for that question. Please try again.",
        )
    })?;

    Ok(Json(QaResponse { answer }))
}
