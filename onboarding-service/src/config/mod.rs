use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::fmt;

/// Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for onboarding feedback.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";

/// Transport timeout for a single generateContent call.
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;

/// Vite dev server origins allowed to call the API from a browser.
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone, Deserialize)]
pub struct OnboardingConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub gemini: GeminiSettings,
    pub cors: CorsConfig,
}

#[derive(Clone, Deserialize)]
pub struct GeminiSettings {
    /// Absent when `GEMINI_API_KEY` is unset or empty. The service still
    /// starts; the gateway answers with a fixed notice instead.
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

// Keeps the credential out of logs.
impl fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl OnboardingConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let is_prod = environment == "prod";

        let api_key = get_optional_env("GEMINI_API_KEY");
        if api_key.is_none() && is_prod {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_API_KEY is required in production but not set"
            )));
        }

        Ok(OnboardingConfig {
            common: common_config,
            environment,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            gemini: GeminiSettings {
                api_key,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), false)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), false)?,
                timeout_secs: parse_timeout_secs(get_optional_env("GEMINI_TIMEOUT_SECS").as_deref()),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_CORS_ORIGINS),
                    false,
                )?),
            },
        })
    }
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        OnboardingConfig {
            common: core_config::Config { port: 8000 },
            environment: "dev".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            gemini: GeminiSettings {
                api_key: None,
                model: DEFAULT_GEMINI_MODEL.to_string(),
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
                timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            },
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}

/// Transport timeout in seconds. Unparsable or zero values fall back to the
/// default; a zero timeout would fail every model call.
fn parse_timeout_secs(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else {
        return DEFAULT_GEMINI_TIMEOUT_SECS;
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => {
            tracing::warn!(
                default = DEFAULT_GEMINI_TIMEOUT_SECS,
                "GEMINI_TIMEOUT_SECS must be at least 1; using default"
            );
            DEFAULT_GEMINI_TIMEOUT_SECS
        }
        Ok(secs) => secs,
        Err(e) => {
            tracing::warn!(
                value = %raw,
                error = %e,
                default = DEFAULT_GEMINI_TIMEOUT_SECS,
                "Invalid GEMINI_TIMEOUT_SECS; using default"
            );
            DEFAULT_GEMINI_TIMEOUT_SECS
        }
    }
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if let Some(def) = default {
                Ok(def.to_string())
            } else if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
