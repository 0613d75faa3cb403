use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::feedback::FeedbackRequest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    /// `success` when delivered, `logged` when only recorded locally.
    pub status: &'static str,
    pub message: String,
    pub feedback_id: String,
}

/// POST /send-feedback
pub async fn handle_send_feedback(
    State(state): State<AppState>,
    Json(feedback): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    feedback.validate()?;
    let feedback_id = format!("FB-{}", Utc::now().timestamp_millis());
    info!(
        "Feedback {feedback_id} from <{}> rating={:?}: {}",
        feedback.email.trim(),
        feedback.rating,
        feedback.subject_line()
    );

    let delivered = match &state.mailer {
        Some(mailer) => match mailer.send(&feedback).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Feedback {feedback_id} delivery failed: {e}");
                false
            }
        },
        None => false,
    };

    let (status, message) = if delivered {
        ("success", "Feedback received successfully")
    } else {
        ("logged", "Feedback received and logged")
    };
    Ok(Json(FeedbackResponse {
        status,
        message: message.to_string(),
        feedback_id,
    }))
}
