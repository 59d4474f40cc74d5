use crate::{
    assets::source::SourceImage,
    compose::{
        layout::plan_layout,
        params::{CompositeParams, FillMode},
        surface::CanvasSurface,
    },
    effects::{
        blur::blur_rgba8_premul,
        composite::{draw_layer_over, fill_in_place},
        resample::{ScaledLayer, resize_premul, sample_region_premul},
    },
    foundation::{core::Rgba8Premul, error::SquareResult},
};

/// Composite `source` onto a fresh square canvas of side `max(width, height)`.
///
/// 1. clear to transparent
/// 2. paint the background selected by `params.fill_mode`
/// 3. draw the scaled, centered foreground with source-over
///
/// Out-of-range params are clamped. The result depends only on the inputs.
#[tracing::instrument(
    skip(source),
    fields(width = source.width(), height = source.height())
)]
pub fn composite(source: &SourceImage, params: &CompositeParams) -> SquareResult<CanvasSurface> {
    let params = params.sanitized();
    let layout = plan_layout(source.width(), source.height(), &params)?;
    let mut surface = CanvasSurface::transparent(layout.size)?;

    match params.fill_mode {
        FillMode::Blur => {
            if let Some(placed) = layout.background
                && let Some(visible) = placed.clip_to_square(layout.size)
            {
                let region = sample_region_premul(source, placed, visible)?;
                let blurred = blur_rgba8_premul(
                    &region.data,
                    region.width,
                    region.height,
                    params.blur_radius_px as f32,
                )?;
                let layer = ScaledLayer {
                    data: blurred,
                    ..region
                };
                draw_layer_over(
                    surface.rgba8_premul_mut(),
                    layout.size,
                    &layer,
                    visible.x,
                    visible.y,
                )?;
            }
        }
        FillMode::White => fill_in_place(surface.rgba8_premul_mut(), Rgba8Premul::WHITE)?,
        FillMode::Black => fill_in_place(surface.rgba8_premul_mut(), Rgba8Premul::BLACK)?,
        FillMode::Transparent => {}
    }

    let fg = layout.foreground;
    let layer = resize_premul(source, fg.width, fg.height)?;
    draw_layer_over(surface.rgba8_premul_mut(), layout.size, &layer, fg.x, fg.y)?;

    tracing::debug!(
        size = layout.size,
        fill = %params.fill_mode,
        blur = params.blur_radius_px,
        scale = params.scale_percent,
        "composited square"
    );
    Ok(surface)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
