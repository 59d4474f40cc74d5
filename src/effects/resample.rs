use image::{
    ImageBuffer, Rgba,
    imageops::{self, FilterType},
};

use crate::{
    assets::source::{SourceImage, rgba8_len},
    foundation::{
        core::PixelRect,
        error::{SquareError, SquareResult},
    },
};

/// A premultiplied RGBA8 raster ready to be drawn onto the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScaledLayer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Resize the whole source to `width x height`. Natural-size requests copy pixels verbatim.
pub fn resize_premul(src: &SourceImage, width: u32, height: u32) -> SquareResult<ScaledLayer> {
    if width == 0 || height == 0 {
        return Err(SquareError::validation("resize target must be non-zero"));
    }
    if (width, height) == src.dimensions() {
        return Ok(ScaledLayer {
            width,
            height,
            data: src.rgba8_premul().to_vec(),
        });
    }

    let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
        src.width(),
        src.height(),
        src.rgba8_premul(),
    )
    .ok_or_else(|| SquareError::invalid_source("source buffer does not match its dimensions"))?;
    let mut data = imageops::resize(&view, width, height, FilterType::Triangle).into_raw();
    clamp_color_to_alpha(&mut data);

    Ok(ScaledLayer {
        width,
        height,
        data,
    })
}

/// Bilinearly sample the part of `src` that lands inside `clip` when the whole source is
/// stretched over `placed`. Only the clipped pixels are materialised, so cover-fit layers that
/// overflow the canvas never allocate their invisible part.
pub fn sample_region_premul(
    src: &SourceImage,
    placed: PixelRect,
    clip: PixelRect,
) -> SquareResult<ScaledLayer> {
    if placed.is_empty() || clip.is_empty() {
        return Err(SquareError::validation("sample region must be non-empty"));
    }

    let xs = axis_taps(src.width(), placed.width, clip.x - placed.x, clip.width);
    let ys = axis_taps(src.height(), placed.height, clip.y - placed.y, clip.height);

    let sw = src.width() as usize;
    let px = src.rgba8_premul();
    let mut data = vec![0u8; rgba8_len(clip.width, clip.height)?];

    for (oy, ty) in ys.iter().enumerate() {
        let row0 = ty.i0 * sw;
        let row1 = ty.i1 * sw;
        for (ox, tx) in xs.iter().enumerate() {
            let p00 = (row0 + tx.i0) * 4;
            let p01 = (row0 + tx.i1) * 4;
            let p10 = (row1 + tx.i0) * 4;
            let p11 = (row1 + tx.i1) * 4;
            let out = (oy * clip.width as usize + ox) * 4;
            for c in 0..4 {
                let top = u32::from(px[p00 + c]) * (256 - tx.w1) + u32::from(px[p01 + c]) * tx.w1;
                let bot = u32::from(px[p10 + c]) * (256 - tx.w1) + u32::from(px[p11 + c]) * tx.w1;
                let v = (top * (256 - ty.w1) + bot * ty.w1 + 32768) >> 16;
                data[out + c] = v.min(255) as u8;
            }
        }
    }

    Ok(ScaledLayer {
        width: clip.width,
        height: clip.height,
        data,
    })
}

#[derive(Clone, Copy, Debug)]
struct Tap {
    i0: usize,
    i1: usize,
    // Weight of `i1` in 1/256ths.
    w1: u32,
}

fn axis_taps(src_len: u32, dst_len: u32, start: i64, count: u32) -> Vec<Tap> {
    let scale = f64::from(src_len) / f64::from(dst_len);
    let last = src_len.saturating_sub(1) as usize;
    (0..count)
        .map(|i| {
            let u = (start + i64::from(i)) as f64;
            // Pixel-center mapping, clamped to the edge texels.
            let s = ((u + 0.5) * scale - 0.5).clamp(0.0, last as f64);
            let i0 = s.floor() as usize;
            let i1 = (i0 + 1).min(last);
            let w1 = ((s - i0 as f64) * 256.0).round() as u32;
            Tap {
                i0,
                i1,
                w1: w1.min(256),
            }
        })
        .collect()
}

fn clamp_color_to_alpha(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/resample.rs"]
mod tests;
