//! Helpers for turning images into inline prompt parts.

use crate::v1beta::Part;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error("GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("cannot determine an image type for {0}")]
    UnsupportedMime(String),
}

/// Sniffs the image type from magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c', ..] => Some("image/heic"),
        [_, _, _, _, b'f', b't', b'y', b'p', b'm', b'i', b'f', b'1', ..] => Some("image/heif"),
        _ => None,
    }
}

/// Maps a file extension (case-insensitive, without the dot) to an image MIME type.
pub fn mime_from_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// Normalizes a `Content-Type` value to one of the image types accepted as inline data.
fn supported_image_mime(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    match essence.as_str() {
        "image/jpeg" | "image/jpg" => Some("image/jpeg"),
        "image/png" => Some("image/png"),
        "image/webp" => Some("image/webp"),
        "image/gif" => Some("image/gif"),
        "image/heic" => Some("image/heic"),
        "image/heif" => Some("image/heif"),
        _ => None,
    }
}

fn mime_from_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_from_extension)
}

/// Reads a local image into an inline-data part.
pub async fn load_image(path: impl AsRef<Path>) -> Result<Part, Error> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mime_type = mime_from_path(path)
        .or_else(|| detect_image_mime(&bytes))
        .ok_or_else(|| Error::UnsupportedMime(path.display().to_string()))?;
    debug!(path = %path.display(), mime_type, size = bytes.len(), "loaded image");
    Ok(Part::inline_data(mime_type, bytes))
}

/// Downloads an image into an inline-data part.
///
/// The type comes from the `Content-Type` header when it names a supported image
/// type, then from the URL path extension, then from the bytes themselves.
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Part, Error> {
    let url = url::Url::parse(url)?;
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url: url.to_string(),
            status,
        });
    }

    let header_mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(supported_image_mime);
    let bytes = response.bytes().await?;

    let mime_type = header_mime
        .or_else(|| mime_from_path(Path::new(url.path())))
        .or_else(|| detect_image_mime(&bytes))
        .ok_or_else(|| Error::UnsupportedMime(url.to_string()))?;
    debug!(%url, mime_type, size = bytes.len(), "fetched image");
    Ok(Part::inline_data(mime_type, bytes))
}
