use crate::{
    compose::params::CompositeParams,
    foundation::{
        core::PixelRect,
        error::{SquareError, SquareResult},
    },
};

/// Largest canvas side we are willing to allocate (matches common browser canvas limits).
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Integer placement of every layer on the square canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CompositeLayout {
    /// Canvas side: the longer source dimension.
    pub size: u32,
    /// Cover-fit placement of the blurred background, when one is drawn.
    pub background: Option<PixelRect>,
    /// Scaled, centered foreground placement.
    pub foreground: PixelRect,
}

/// Compute layer geometry for a `width x height` source. Params are clamped first.
pub fn plan_layout(
    width: u32,
    height: u32,
    params: &CompositeParams,
) -> SquareResult<CompositeLayout> {
    if width == 0 || height == 0 {
        return Err(SquareError::invalid_source(format!(
            "source dimensions must be non-zero (got {width}x{height})"
        )));
    }
    let size = width.max(height);
    if size > MAX_CANVAS_SIDE {
        return Err(SquareError::invalid_source(format!(
            "source side {size} exceeds the {MAX_CANVAS_SIDE}px canvas limit"
        )));
    }

    let params = params.sanitized();

    let background = params.draws_blurred_background().then(|| {
        let short = u64::from(width.min(height));
        let bg_w = round_div(u64::from(width) * u64::from(size), short);
        let bg_h = round_div(u64::from(height) * u64::from(size), short);
        centered(size, bg_w, bg_h)
    });

    let scale = u64::from(params.scale_percent.unsigned_abs());
    let fg_w = round_div(u64::from(width) * scale, 100).max(1);
    let fg_h = round_div(u64::from(height) * scale, 100).max(1);

    Ok(CompositeLayout {
        size,
        background,
        foreground: centered(size, fg_w, fg_h),
    })
}

fn centered(size: u32, w: u32, h: u32) -> PixelRect {
    let size = i64::from(size);
    PixelRect::new(
        (size - i64::from(w)).div_euclid(2),
        (size - i64::from(h)).div_euclid(2),
        w,
        h,
    )
}

fn round_div(num: u64, den: u64) -> u32 {
    ((num + den / 2) / den).min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
