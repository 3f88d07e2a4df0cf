use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, ResponseError};
use futures::StreamExt;

use crate::config::UploadConfig;
use crate::services::upload_service::{self, UploadResponse};
use crate::utils::AppError;

/// POST /api/uploads - stores one JPG/PNG/WEBP image (multipart, field `file`)
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "Uploads",
    responses(
        (status = 200, description = "Image stored", body = UploadResponse),
        (status = 400, description = "No file, unsupported type or file too large")
    )
)]
pub async fn upload_image(config: web::Data<UploadConfig>, mut payload: Multipart) -> HttpResponse {
    log::info!("📤 POST /uploads");

    match receive_image(&config, &mut payload).await {
        Ok(stored) => {
            log::info!("✅ Stored upload {}", stored.path);
            HttpResponse::Ok().json(stored)
        }
        Err(e) => {
            log::warn!("❌ Upload rejected: {}", e);
            e.error_response()
        }
    }
}

/// Takes the first part carrying a filename; plain form fields are skipped.
async fn receive_image(
    config: &UploadConfig,
    payload: &mut Multipart,
) -> Result<UploadResponse, AppError> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::bad_request(format!("Malformed multipart body: {}", e)))?;

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let original_name = match filename {
            Some(name) => name,
            None => {
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| AppError::bad_request(format!("Malformed multipart body: {}", e)))?;
                }
                continue;
            }
        };

        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();
        let extension = upload_service::extension_for(&content_type).ok_or_else(|| {
            AppError::bad_request("Only JPG, PNG and WEBP images are allowed")
        })?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::bad_request(format!("Upload interrupted: {}", e)))?;
            if bytes.len() + chunk.len() > config.max_bytes {
                return Err(upload_service::too_large(config.max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        return upload_service::save_image(config, &original_name, extension, &bytes).await;
    }

    Err(AppError::bad_request("No file uploaded"))
}
