//! User feedback routes.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use cardcraft_core::storage::{Feedback, NewFeedback};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::validate_feedback;

const INVALID_FEEDBACK: &str = "Invalid feedback data";

/// `POST /api/feedback`
pub async fn create_feedback(
    State(state): State<AppState>,
    body: Result<Json<NewFeedback>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(feedback) = body.map_err(|rejection| ApiError::Invalid {
        message: INVALID_FEEDBACK,
        errors: vec![rejection.body_text()],
    })?;
    validate_feedback(&feedback).map_err(|errors| ApiError::invalid(INVALID_FEEDBACK, errors))?;

    let feedback = state.store.create_feedback(feedback).await?;
    tracing::info!(id = feedback.id, kind = ?feedback.kind, "feedback received");
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// `GET /api/feedback`
pub async fn list_feedback(State(state): State<AppState>) -> Result<Json<Vec<Feedback>>, ApiError> {
    Ok(Json(state.store.all_feedback().await?))
}

/// `GET /api/feedback/{id}`
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Feedback>, ApiError> {
    Ok(Json(state.store.feedback_by_id(id).await?))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_and_list() {
        let app = app();
        let (status, created) = send(
            &app,
            json_request(
                "POST",
                "/api/feedback",
                json!({
                    "type": "feature",
                    "subject": "Dark mode",
                    "description": "Please add a dark editor theme",
                    "email": ""
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);
        assert_eq!(created["status"], "open");
        assert_eq!(created["type"], "feature");
        assert!(created.get("email").is_none());

        let (_, list) = send(&app, get("/api/feedback")).await;
        assert_eq!(list.as_array().map(Vec::len), Some(1));

        let (status, one) = send(&app, get("/api/feedback/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(one["subject"], "Dark mode");

        let (status, body) = send(&app, get("/api/feedback/9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Feedback not found");
    }

    #[tokio::test]
    async fn test_rejects_invalid_feedback() {
        let app = app();
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/feedback",
                json!({
                    "type": "bug",
                    "subject": "",
                    "description": "Broken",
                    "email": "nobody"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid feedback data");
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));

        let (status, _) = send(
            &app,
            json_request("POST", "/api/feedback", json!({ "type": "praise" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
