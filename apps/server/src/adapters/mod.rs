//! External service adapters.
//!
//! The only external collaborator today is the document Q&A language model.
//! The handler depends on the [`DocumentQa`] trait, never on a concrete
//! client, so tests can substitute a canned implementation.

pub mod qa_llm;

use async_trait::async_trait;

/// Failure modes of the Q&A backend.
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    /// The backend request could not be built or sent.
    #[error("Q&A request failed: {0}")]
    RequestFailed(String),

    /// The backend responded but produced no usable answer.
    #[error("Q&A backend returned no answer")]
    EmptyAnswer,
}

/// Answers questions about a document's text.
#[async_trait]
pub trait DocumentQa: Send + Sync {
    /// Answers `question` grounded in `document_text`.
    async fn answer(&self, question: &str, document_text: &str) -> Result<String, QaError>;
}
