//! Generation provider trait

use crate::types::{Completion, GenerationRequest};

/// Result type for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("rate limited: retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Generation provider trait.
///
/// Implementations return whole completions; the workflow engine and the
/// chat facade both consume final text plus usage totals, so there is no
/// streaming surface here.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: GenerationRequest) -> GenerationResult<Completion>;
}
