//! Application startup and lifecycle management.

use crate::config::OnboardingConfig;
use crate::handlers::{
    feedback::ai_feedback,
    health::{health_check, not_found, root},
};
use crate::services::{ModelGateway, PromptFormatter};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::cors_layer, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<OnboardingConfig>,
    pub formatter: PromptFormatter,
    pub gateway: ModelGateway,
}

impl AppState {
    pub fn new(config: OnboardingConfig, gateway: ModelGateway) -> Self {
        Self {
            config: Arc::new(config),
            formatter: PromptFormatter::default(),
            gateway,
        }
    }
}

pub fn build_router(state: AppState) -> Result<Router, AppError> {
    let cors = cors_layer(&state.config.cors.allowed_origins)?;

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/onboarding/ai-feedback", post(ai_feedback))
        .fallback(not_found)
        .with_state(state)
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors);

    Ok(app)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the Gemini-backed gateway.
    pub async fn build(config: OnboardingConfig) -> Result<Self, AppError> {
        let gateway = ModelGateway::gemini(&config.gemini).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::ConfigError(anyhow::anyhow!(e))
        })?;

        if gateway.is_configured() {
            tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");
        } else {
            tracing::warn!("GEMINI_API_KEY not set; AI feedback will return a configuration notice");
        }

        Self::build_with_gateway(config, gateway).await
    }

    /// Build the application around an already constructed gateway.
    pub async fn build_with_gateway(
        config: OnboardingConfig,
        gateway: ModelGateway,
    ) -> Result<Self, AppError> {
        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState::new(config, gateway))?;

        tracing::info!("Onboarding service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped by Ctrl-C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Run the application until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
