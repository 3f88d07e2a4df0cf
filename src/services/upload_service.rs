use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::UploadConfig;
use crate::utils::AppError;

/// URL prefix the upload directory is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

const MAX_STEM_LEN: usize = 60;

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Absolute URL of the stored image
    pub url: String,
    pub filename: String,
    /// Server-relative path, `/uploads/<filename>`
    pub path: String,
}

/// Maps an allowed image MIME type to the extension it is stored with.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type.trim().to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Lower-cases the original file stem and collapses everything outside
/// `[a-z0-9]` into single dashes.
pub fn sanitize_stem(original_name: &str) -> String {
    let file_name = original_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(original_name);
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };

    let mut out = String::with_capacity(stem.len());
    for ch in stem.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }

    let trimmed: String = out.trim_matches('-').chars().take(MAX_STEM_LEN).collect();
    let trimmed = trimmed.trim_end_matches('-');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<unix-millis>-<sanitized-stem>.<ext>`
pub fn stored_filename(timestamp_millis: i64, original_name: &str, extension: &str) -> String {
    format!("{}-{}.{}", timestamp_millis, sanitize_stem(original_name), extension)
}

/// Writes an already validated image to the upload directory.
pub async fn save_image(
    config: &UploadConfig,
    original_name: &str,
    extension: &str,
    bytes: &[u8],
) -> Result<UploadResponse, AppError> {
    if bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }
    if bytes.len() > config.max_bytes {
        return Err(too_large(config.max_bytes));
    }

    tokio::fs::create_dir_all(&config.dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

    let filename = stored_filename(
        chrono::Utc::now().timestamp_millis(),
        original_name,
        extension,
    );
    let target = Path::new(&config.dir).join(&filename);

    tokio::fs::write(&target, bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", target.display(), e)))?;

    let path = format!("{}/{}", PUBLIC_PREFIX, filename);
    Ok(UploadResponse {
        url: format!("{}{}", config.public_base_url, path),
        filename,
        path,
    })
}

pub fn too_large(max_bytes: usize) -> AppError {
    AppError::bad_request(format!(
        "File too large: maximum size is {} MB",
        max_bytes as f64 / (1024.0 * 1024.0)
    ))
}
