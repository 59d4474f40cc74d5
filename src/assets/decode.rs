use crate::{
    assets::source::SourceImage,
    foundation::error::{SquareError, SquareResult},
};

/// Decode an encoded raster (PNG, JPEG, GIF, WebP, ...) into a [`SourceImage`].
///
/// Undecodable bytes and zero-area images both fail with [`SquareError::InvalidSource`].
pub fn decode_image(bytes: &[u8]) -> SquareResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SquareError::invalid_source(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    SourceImage::from_rgba_image(rgba)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
