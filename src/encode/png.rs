use std::io::Cursor;

use crate::{
    compose::surface::CanvasSurface,
    foundation::error::{SquareError, SquareResult},
};

/// Suffix appended to the source basename of every export.
pub const EXPORT_SUFFIX: &str = "-1x1";
/// Basename used when the source file name is missing or has no stem.
pub const FALLBACK_BASENAME: &str = "image";

/// Straight-alpha copy of the surface, ready for encoders that expect unassociated alpha.
pub fn surface_to_rgba_image(surface: &CanvasSurface) -> SquareResult<image::RgbaImage> {
    let mut rgba = surface.rgba8_premul().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    image::RgbaImage::from_raw(surface.side(), surface.side(), rgba).ok_or_else(|| {
        SquareError::export_failure("surface buffer does not match its dimensions")
    })
}

/// Losslessly encode the surface as PNG, alpha included.
pub fn export_png(surface: &CanvasSurface) -> SquareResult<Vec<u8>> {
    if surface.side() == 0 {
        return Err(SquareError::export_failure("surface is empty"));
    }
    let img = surface_to_rgba_image(surface)?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| SquareError::export_failure(format!("encode png: {e}")))?;
    tracing::debug!(side = surface.side(), bytes = buf.len(), "encoded png");
    Ok(buf)
}

/// `{basename}-1x1.png`, where basename drops the last `.ext` of the original name.
///
/// Names without any dot have no basename and fall back to `image`, like a missing name.
pub fn export_file_name(original: Option<&str>) -> String {
    let base = original
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name))
        .and_then(|name| name.rsplit_once('.').map(|(stem, _ext)| stem))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(FALLBACK_BASENAME);
    format!("{base}{EXPORT_SUFFIX}.png")
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
