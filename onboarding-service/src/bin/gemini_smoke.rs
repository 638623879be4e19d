//! One-shot connectivity check: verifies the API key against the model list,
//! then sends a fixed prompt to the configured Gemini model and prints the
//! reply or the provider error.

use onboarding_service::config::OnboardingConfig;
use onboarding_service::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use onboarding_service::services::providers::TextProvider;
use service_core::observability::init_tracing;
use std::process::ExitCode;

const SMOKE_PROMPT: &str = "Hello, imply a test.";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match OnboardingConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing("gemini-smoke", &config.log_level, None);

    let provider = match GeminiTextProvider::new(GeminiConfig::from(&config.gemini)) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = provider.health_check().await {
        println!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Sending request to {}...", provider.model());

    match provider.generate(SMOKE_PROMPT).await {
        Ok(text) => {
            println!("Response: {}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
