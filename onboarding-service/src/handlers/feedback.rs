use crate::dtos::{AiFeedbackRequest, AiFeedbackResponse};
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Generate AI feedback for an onboarding step.
///
/// Always answers 200: formatting and model failures are absorbed into
/// fallback text by the formatter and gateway.
pub async fn ai_feedback(
    State(state): State<AppState>,
    Json(request): Json<AiFeedbackRequest>,
) -> Json<AiFeedbackResponse> {
    tracing::info!(step_id = %request.step_id, "Received AI feedback request");

    let prompt = state
        .formatter
        .format(&request.prompt_key, &request.input_data);
    tracing::info!(
        step_id = %request.step_id,
        prompt_key = %request.prompt_key,
        prompt = %prompt,
        "Generated prompt"
    );

    let text = state.gateway.generate(&prompt).await;

    Json(AiFeedbackResponse { text })
}
