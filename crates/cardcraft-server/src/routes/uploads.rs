//! Image upload and retrieval.

use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::{AppState, Upload};

/// Accepted image types and the file extension stored for each.
const ALLOWED_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
];

/// Form field carrying the file.
const FILE_FIELD: &str = "image";

/// Room for multipart boundaries and part headers on top of the file limit.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

const NAME_LEN: usize = 10;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// `POST /api/upload`: `multipart/form-data` with the file in the `image` field.
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let max = state.config.max_upload_bytes;
    let mut multipart = multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| read_error(err, max))?
    {
        if field.name() == Some(FILE_FIELD) {
            return store_upload(&state, field).await.map(Json);
        }
    }
    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

async fn store_upload(state: &AppState, field: Field<'_>) -> Result<UploadResponse, ApiError> {
    let max = state.config.max_upload_bytes;
    let mime = field
        .content_type()
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();
    let Some(&(content_type, extension)) = ALLOWED_TYPES.iter().find(|(t, _)| *t == mime) else {
        tracing::warn!(%mime, "rejected upload");
        return Err(ApiError::BadRequest(
            "Invalid file type. Only images are allowed.".to_string(),
        ));
    };

    let bytes = field.bytes().await.map_err(|err| read_error(err, max))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("No file uploaded".to_string()));
    }
    if bytes.len() > max {
        return Err(too_large(max));
    }

    let mut name = uuid::Uuid::new_v4().simple().to_string();
    name.truncate(NAME_LEN);
    name.push_str(extension);

    tracing::info!(%name, size = bytes.len(), "image uploaded");
    state.uploads.insert(name.clone(), Upload { content_type, bytes });
    Ok(UploadResponse {
        url: format!("/uploads/{name}"),
    })
}

fn too_large(max: usize) -> ApiError {
    ApiError::PayloadTooLarge(format!("File too large. Maximum size is {}.", human_size(max)))
}

fn read_error(err: MultipartError, max: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(max)
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// `GET /uploads/{name}`
pub async fn get_upload(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let upload = state
        .uploads
        .get(&name)
        .map(|entry| entry.value().clone())
        .ok_or(ApiError::NotFound("File not found"))?;
    Ok(([(header::CONTENT_TYPE, upload.content_type)], upload.bytes))
}

fn human_size(bytes: usize) -> String {
    const MB: usize = 1024 * 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else {
        format!("{bytes} bytes")
    }
}
