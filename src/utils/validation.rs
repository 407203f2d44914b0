use crate::errors::AppError;
use crate::models::file::ImageUpload;
use validator::Validate;

pub const MAX_UPLOAD_BYTES: usize = 2_000_000;

const ALLOWED_IMAGE_TYPES: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

pub fn validate_upload_size(size: usize) -> Result<(), AppError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds {} byte limit",
            MAX_UPLOAD_BYTES
        )));
    }
    Ok(())
}

/// Checks the declared name and MIME type against the image allow-list and
/// returns the lowercased extension.
pub fn validate_image_type(file_name: &str, content_type: &str) -> Result<String, AppError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| ALLOWED_IMAGE_TYPES.contains(&ext.as_str()));

    let mime_allowed = content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().to_lowercase())
        .and_then(|essence| {
            essence
                .strip_prefix("image/")
                .map(|subtype| ALLOWED_IMAGE_TYPES.contains(&subtype))
        })
        .unwrap_or(false);

    match extension {
        Some(ext) if mime_allowed => Ok(ext),
        _ => Err(AppError::UnsupportedFileType(
            "Images only (jpeg, jpg, png, gif)".to_string(),
        )),
    }
}

pub fn validate_image(upload: &ImageUpload) -> Result<String, AppError> {
    validate_upload_size(upload.size())?;
    validate_image_type(&upload.file_name, &upload.content_type)
}
