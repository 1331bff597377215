//! Image upload handler.
//!
//! Images picked on the device arrive here as multipart uploads. The bytes
//! are sniffed (never trusted by file name), written under the configured
//! upload directory with a fresh name, and served back from `/media`.

use std::io::Cursor;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use image::{ImageFormat, ImageReader};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A stored upload, addressed by its public URL.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL to store as the image handle on a card.
    pub url: String,
    pub file_name: String,
    pub content_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
}

/// Accepted formats and the extension they are stored under.
fn stored_extension(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Png => Some("png"),
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::WebP => Some("webp"),
        _ => None,
    }
}

/// POST /api/v1/uploads
///
/// Accepts `multipart/form-data` with a `file` field holding a PNG, JPEG, or
/// WebP image.
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResponse>>)> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some(data.to_vec());
        }
    }

    let data = file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    let format = image::guess_format(&data)
        .map_err(|_| AppError::BadRequest("File is not a recognized image".into()))?;
    let ext = stored_extension(format).ok_or_else(|| {
        AppError::BadRequest("Unsupported image format. Supported: PNG, JPEG, WebP".into())
    })?;
    let (width, height) = ImageReader::with_format(Cursor::new(&data), format)
        .into_dimensions()
        .map_err(|e| AppError::BadRequest(format!("Invalid image: {e}")))?;

    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let file_name = format!("{}.{ext}", Uuid::new_v4().simple());
    tokio::fs::write(state.config.upload_dir.join(&file_name), &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::info!(
        user_id = auth.user_id,
        file_name = %file_name,
        size_bytes = data.len(),
        width,
        height,
        "Image uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                url: format!("{}/media/{file_name}", state.config.public_base_url),
                content_type: format.to_mime_type(),
                size_bytes: data.len(),
                file_name,
                width,
                height,
            },
        }),
    ))
}
