//! Card CRUD, share lookup, showcase and image export routes.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use cardcraft_core::share::{self, SharePlatform, ShareOptions};
use cardcraft_core::storage::{Card, CardUpdate, DEFAULT_USER_ID, NewCard};
use cardcraft_render::{Renderer, SvgRenderer};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{validate_card_update, validate_new_card};

const INVALID_CARD: &str = "Invalid card data";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsQuery {
    pub user_id: Option<u64>,
}

/// `GET /api/cards?userId=`: cards owned by a user (default user 1).
pub async fn list_cards(
    State(state): State<AppState>,
    Query(query): Query<CardsQuery>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);
    Ok(Json(state.store.user_cards(user_id).await?))
}

/// `POST /api/cards`: save a new card.
pub async fn create_card(
    State(state): State<AppState>,
    body: Result<Json<NewCard>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(card) = body.map_err(|rejection| ApiError::Invalid {
        message: INVALID_CARD,
        errors: vec![rejection.body_text()],
    })?;
    validate_new_card(&card).map_err(|errors| ApiError::invalid(INVALID_CARD, errors))?;

    let card = state.store.create_card(card).await?;
    tracing::info!(id = card.id, share_id = %card.share_id, "card created");
    Ok((StatusCode::CREATED, Json(card)))
}

/// `GET /api/cards/{id}`
pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Card>, ApiError> {
    Ok(Json(state.store.get_card(id).await?))
}

/// `PUT /api/cards/{id}`: partial update.
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Result<Json<CardUpdate>, JsonRejection>,
) -> Result<Json<Card>, ApiError> {
    let Json(update) = body.map_err(|rejection| ApiError::Invalid {
        message: INVALID_CARD,
        errors: vec![rejection.body_text()],
    })?;
    validate_card_update(&update).map_err(|errors| ApiError::invalid(INVALID_CARD, errors))?;

    Ok(Json(state.store.update_card(id, update).await?))
}

/// `DELETE /api/cards/{id}`
pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_card(id).await? {
        return Err(ApiError::NotFound("Card not found"));
    }
    tracing::info!(id, "card deleted");
    Ok(Json(json!({ "message": "Card deleted successfully" })))
}

/// `GET /api/cards/share/{share_id}`
pub async fn get_shared_card(
    State(state): State<AppState>,
    Path(share_id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    Ok(Json(state.store.card_by_share_id(&share_id).await?))
}

/// `GET /api/cards/showcase`: public cards for the landing page.
pub async fn showcase(State(state): State<AppState>) -> Result<Json<Vec<Card>>, ApiError> {
    Ok(Json(state.store.showcase_cards().await?))
}

/// `GET /api/cards/{id}/image.svg`
pub async fn card_image(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state.store.get_card(id).await?;
    let renderer = SvgRenderer::new();
    let svg = renderer.render(&card.content)?;
    Ok(([(header::CONTENT_TYPE, renderer.content_type())], svg))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinks {
    pub page_url: String,
    pub links: BTreeMap<&'static str, String>,
    pub clipboard_text: String,
}

/// `GET /api/cards/{id}/share-links`: public page URL and social intents.
pub async fn share_links(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ShareLinks>, ApiError> {
    let card = state.store.get_card(id).await?;
    let page_url = share::card_share_url(&state.config.public_url, &card.share_id);
    let options = ShareOptions {
        title: Some(card.title),
        ..ShareOptions::default()
    };

    let mut links = BTreeMap::new();
    for platform in [
        SharePlatform::Twitter,
        SharePlatform::Facebook,
        SharePlatform::Linkedin,
        SharePlatform::Weibo,
    ] {
        let url = share::share_url(platform, &page_url, &options)
            .map_err(|err| ApiError::BadRequest(format!("invalid share url: {err}")))?;
        if let Some(url) = url {
            links.insert(platform.name(), url.to_string());
        }
    }

    Ok(Json(ShareLinks {
        clipboard_text: share::clipboard_text(&page_url, &options),
        page_url,
        links,
    }))
}
