use crate::error::AppError;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Build a credentialed CORS layer restricted to `allowed_origins`.
///
/// Origins that are not valid header values are rejected up front so a typo
/// in configuration fails startup instead of silently widening access.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, AppError> {
    let origins = allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
        })
        .collect::<Result<Vec<HeaderValue>, AppError>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ]))
}
