//! Case images: local previews, storage paths and save-time uploads.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gateway::{Gateway, GatewayResult};
use crate::models::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Before,
    After,
}

impl ImageSlot {
    pub fn dir(&self) -> &'static str {
        match self {
            ImageSlot::Before => "cases/before",
            ImageSlot::After => "cases/after",
        }
    }
}

/// File picked in the case form, held until the case is saved
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Wire form of [`ImageUpload`]: a file name and a `data:` URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePayload {
    pub file_name: String,
    pub data_url: String,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Decode `data:<mime>;base64,<payload>`.
    pub fn from_data_url(file_name: &str, data_url: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::new("Invalid image data").field("image", "Expected a base64 data URL");

        let rest = data_url.strip_prefix("data:").ok_or_else(invalid)?;
        let (meta, payload) = rest.split_once(',').ok_or_else(invalid)?;
        let mime = meta.strip_suffix(";base64").ok_or_else(invalid)?;
        let bytes = STANDARD.decode(payload.trim()).map_err(|_| invalid())?;

        let mut upload = Self::new(file_name, bytes);
        if !mime.is_empty() {
            upload.content_type = mime.to_string();
        }
        Ok(upload)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.bytes))
    }
}

impl TryFrom<&ImagePayload> for ImageUpload {
    type Error = ValidationError;

    fn try_from(payload: &ImagePayload) -> Result<Self, Self::Error> {
        Self::from_data_url(&payload.file_name, &payload.data_url)
    }
}

/// Storage path for a new image: `<dir>/<millis>_<random>_<file>`.
/// The random part keeps two uploads in the same millisecond apart.
pub fn upload_path(slot: ImageSlot, file_name: &str, now_ms: i64) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}/{}_{}_{}", slot.dir(), now_ms, &random[..8], sanitize_file_name(file_name))
}

fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

/// Upload and return the public URL.
pub async fn upload_image(gateway: &dyn Gateway, bucket: &str, slot: ImageSlot, image: &ImageUpload) -> GatewayResult<String> {
    let path = upload_path(slot, &image.file_name, chrono::Utc::now().timestamp_millis());
    gateway
        .upload(bucket, &path, image.bytes.clone(), &image.content_type)
        .await?;
    Ok(gateway.public_url(bucket, &path))
}

/// URL for the saved row: the new upload's, or `previous` when there is
/// nothing to upload or the upload failed.
pub async fn upload_or_keep(
    gateway: &dyn Gateway,
    bucket: &str,
    slot: ImageSlot,
    image: Option<&ImageUpload>,
    previous: Option<String>,
) -> Option<String> {
    let Some(image) = image else {
        return previous;
    };
    match upload_image(gateway, bucket, slot, image).await {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::error!("Image upload to {} failed: {}", slot.dir(), e);
            previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryGateway;
    use crate::types::Operation;

    #[test]
    fn data_url_decodes_with_declared_type() {
        let upload = ImageUpload::from_data_url("chair.png", "data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(upload.bytes, b"hello");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.to_data_url(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn malformed_data_url_is_rejected() {
        assert!(ImageUpload::from_data_url("a.png", "https://example.com/a.png").is_err());
        assert!(ImageUpload::from_data_url("a.png", "data:image/png,plain").is_err());
        assert!(ImageUpload::from_data_url("a.png", "data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn content_type_guessed_from_name() {
        assert_eq!(ImageUpload::new("table.jpg", vec![]).content_type, "image/jpeg");
        assert_eq!(ImageUpload::new("notes", vec![]).content_type, "application/octet-stream");
    }

    #[test]
    fn paths_are_unique_and_prefixed() {
        let a = upload_path(ImageSlot::Before, "my chair.jpg", 1700000000000);
        let b = upload_path(ImageSlot::Before, "my chair.jpg", 1700000000000);
        assert!(a.starts_with("cases/before/1700000000000_"));
        assert!(a.ends_with("_my_chair.jpg"));
        assert_ne!(a, b);
        assert!(upload_path(ImageSlot::After, "x.png", 1).starts_with("cases/after/1_"));
    }

    #[tokio::test]
    async fn failed_upload_keeps_previous_url() {
        let gw = MemoryGateway::new();
        gw.fail(Operation::Upload);
        let image = ImageUpload::new("a.png", vec![1, 2, 3]);
        let url = upload_or_keep(&gw, "images", ImageSlot::After, Some(&image), Some("old".to_string())).await;
        assert_eq!(url.as_deref(), Some("old"));

        gw.recover(Operation::Upload);
        let url = upload_or_keep(&gw, "images", ImageSlot::After, Some(&image), None).await;
        assert!(url.unwrap().contains("/images/cases/after/"));
    }
}
