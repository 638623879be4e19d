use crate::config::GeminiSettings;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{ProviderError, TextProvider};
use std::sync::Arc;

/// Returned when no API key was configured at startup.
pub const CREDENTIAL_MISSING_MESSAGE: &str = "Error: GEMINI_API_KEY not found in .env file.";

/// Returned when the model call fails for any reason.
pub const SERVICE_UNREACHABLE_MESSAGE: &str =
    "Sorry, I couldn't connect to my brain right now. But let's keep going!";

/// Boundary to the generative model. `generate` always yields text: the
/// model's answer, or one of the two fixed notices above.
#[derive(Clone)]
pub struct ModelGateway {
    provider: Arc<dyn TextProvider>,
}

impl ModelGateway {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Gateway backed by Gemini, configured from the loaded settings.
    pub fn gemini(settings: &GeminiSettings) -> Result<Self, ProviderError> {
        let provider = GeminiTextProvider::new(GeminiConfig::from(settings))?;
        Ok(Self::new(Arc::new(provider)))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    pub async fn generate(&self, prompt: &str) -> String {
        if !self.provider.is_configured() {
            tracing::warn!("Model credential not configured; skipping generation");
            return CREDENTIAL_MISSING_MESSAGE.to_string();
        }

        match self.provider.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Model generation failed");
                SERVICE_UNREACHABLE_MESSAGE.to_string()
            }
        }
    }
}
