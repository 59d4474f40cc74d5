use crate::{
    effects::resample::ScaledLayer,
    foundation::{
        core::{PixelRect, Rgba8Premul},
        error::{SquareError, SquareResult},
    },
};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(src[i], dc);
    }
    out
}

pub fn fill_in_place(dst: &mut [u8], color: Rgba8Premul) -> SquareResult<()> {
    if !dst.len().is_multiple_of(4) {
        return Err(SquareError::validation(
            "fill_in_place expects an rgba8 buffer",
        ));
    }
    let px = color.to_array();
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
    Ok(())
}

/// Draw `layer` with its top-left corner at `(x, y)` onto a square premultiplied canvas,
/// clipping whatever falls outside.
pub fn draw_layer_over(
    dst: &mut [u8],
    side: u32,
    layer: &ScaledLayer,
    x: i64,
    y: i64,
) -> SquareResult<()> {
    let expected_len = (side as usize)
        .checked_mul(side as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SquareError::invalid_source("canvas buffer size overflow"))?;
    if dst.len() != expected_len {
        return Err(SquareError::validation(
            "draw_layer_over expects dst matching side*side*4",
        ));
    }
    if layer.data.len() != layer.width as usize * layer.height as usize * 4 {
        return Err(SquareError::validation(
            "draw_layer_over expects layer data matching width*height*4",
        ));
    }

    let placed = PixelRect::new(x, y, layer.width, layer.height);
    let Some(visible) = placed.clip_to_square(side) else {
        return Ok(());
    };

    let side = side as usize;
    let lw = layer.width as usize;
    let lx = (visible.x - x) as usize;
    let span = visible.width as usize * 4;
    for row in 0..visible.height as usize {
        let cy = visible.y as usize + row;
        let ly = (visible.y - y) as usize + row;

        let d0 = (cy * side + visible.x as usize) * 4;
        let s0 = (ly * lw + lx) * 4;
        let drow = &mut dst[d0..d0 + span];
        let srow = &layer.data[s0..s0 + span];
        for (d, s) in drow.chunks_exact_mut(4).zip(srow.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
