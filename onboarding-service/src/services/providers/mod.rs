//! Generative model provider abstraction.
//!
//! The gateway only depends on [`TextProvider`], so the Gemini client and
//! the in-process mock are interchangeable.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Whether a credential was supplied at startup.
    fn is_configured(&self) -> bool;

    /// Generate a text response for a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
