use std::path::Path;

use anyhow::{anyhow, Result};
use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

const MAX_REFERENCE_IMAGE_BYTES: usize = 20 * 1024 * 1024;

pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.starts_with("image/")
}

/// Encodes image bytes as a `data:` URL, defaulting to PNG when the type is unknown.
pub fn to_data_url(data: &[u8]) -> String {
    let mime_type = detect_mime_type(data).unwrap_or_else(|| "image/png".to_string());
    let encoded = general_purpose::STANDARD.encode(data);
    format!("data:{};base64,{}", mime_type, encoded)
}

/// Loads a reference image from disk, rejecting files that are not images.
pub async fn load_reference_image(path: &Path) -> Result<Vec<u8>> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|err| anyhow!("Failed to read reference image {}: {}", path.display(), err))?;
    if data.len() > MAX_REFERENCE_IMAGE_BYTES {
        return Err(anyhow!(
            "Reference image {} is too large ({} bytes)",
            path.display(),
            data.len()
        ));
    }
    match detect_mime_type(&data) {
        Some(mime_type) if is_image_mime(&mime_type) => {
            debug!(
                "Loaded reference image {} ({}, {} bytes)",
                path.display(),
                mime_type,
                data.len()
            );
            Ok(data)
        }
        other => Err(anyhow!(
            "Reference file {} is not a supported image (detected {:?})",
            path.display(),
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn detects_png_and_builds_data_url() {
        assert_eq!(detect_mime_type(PNG_HEADER).as_deref(), Some("image/png"));
        assert!(to_data_url(PNG_HEADER).starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn unknown_bytes_default_to_png() {
        assert!(to_data_url(b"plain text").starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn rejects_non_image_reference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "not an image").expect("write");
        assert!(load_reference_image(&path).await.is_err());

        let png = dir.path().join("ref.png");
        std::fs::write(&png, PNG_HEADER).expect("write");
        assert_eq!(load_reference_image(&png).await.expect("loads"), PNG_HEADER);
    }
}
