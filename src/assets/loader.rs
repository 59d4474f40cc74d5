use std::path::Path;

use anyhow::Context;

use crate::{
    assets::{decode::decode_image, source::SourceImage},
    foundation::error::{SquareError, SquareResult},
};

/// Media type reported when a path has no recognised image extension.
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Clone, Debug)]
/// A decoded image plus the user-facing file name it came from.
pub struct LoadedImage {
    pub source: SourceImage,
    pub file_name: Option<String>,
}

/// Accept any `image/*` media type; everything else is [`SquareError::UnsupportedFileType`].
pub fn ensure_image_media_type(media_type: &str) -> SquareResult<()> {
    let mt = media_type.trim().to_ascii_lowercase();
    match mt.strip_prefix("image/") {
        Some(subtype) if !subtype.is_empty() => Ok(()),
        _ => Err(SquareError::unsupported_file_type(format!(
            "'{}' is not an image media type",
            media_type.trim()
        ))),
    }
}

/// Guess a media type from the path extension.
pub fn media_type_for_path(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

/// Validate the declared media type, then decode.
pub fn load_image(bytes: &[u8], media_type: &str) -> SquareResult<SourceImage> {
    ensure_image_media_type(media_type)?;
    decode_image(bytes)
}

/// Read and decode an image file from disk.
#[tracing::instrument]
pub fn load_path(path: &Path) -> SquareResult<LoadedImage> {
    let media_type = media_type_for_path(path);
    ensure_image_media_type(media_type)?;

    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let source = load_image(&bytes, media_type)?;
    tracing::debug!(
        width = source.width(),
        height = source.height(),
        media_type,
        "decoded source image"
    );

    Ok(LoadedImage {
        source,
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
