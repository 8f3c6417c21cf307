//! Template catalog routes.

use axum::Json;
use axum::extract::{Path, Query, State};
use cardcraft_core::Template;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TemplatesQuery {
    pub category: Option<String>,
}

/// `GET /api/templates?category=`: all templates, or one category.
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplatesQuery>,
) -> Json<Vec<Template>> {
    let templates = match query.category.as_deref() {
        Some(category) => state.templates.by_category(category).into_iter().cloned().collect(),
        None => state.templates.all().to_vec(),
    };
    Json(templates)
}

/// `GET /api/templates/{id}`
pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>, ApiError> {
    state
        .templates
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Template not found"))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_list_and_filter() {
        let app = app();
        let (status, all) = send(&app, get("/api/templates")).await;
        assert_eq!(status, StatusCode::OK);
        let total = all.as_array().map(Vec::len).unwrap_or_default();
        assert!(total >= 6);

        let (_, quotes) = send(&app, get("/api/templates?category=Quote%20Cards")).await;
        let quotes = quotes.as_array().unwrap();
        assert!(!quotes.is_empty());
        assert!(quotes.iter().all(|t| t["category"] == "Quote Cards"));

        let (_, everything) = send(&app, get("/api/templates?category=all")).await;
        assert_eq!(everything.as_array().map(Vec::len), Some(total));
    }

    #[tokio::test]
    async fn test_get_template() {
        let app = app();
        let (status, template) = send(&app, get("/api/templates/clean-quote")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(template["id"], "clean-quote");
        assert!(template["content"]["elements"].is_array());

        let (status, body) = send(&app, get("/api/templates/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Template not found");
    }
}
