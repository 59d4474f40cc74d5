//! squarefit composites a single photo onto a square canvas.
//!
//! The canvas side is the longer source dimension. The area the photo does not cover is filled
//! with a blurred cover-fit copy of the photo, solid white, solid black, or left transparent.
//! The photo itself can be scaled down before it is centered on top.
//!
//! # Pipeline overview
//!
//! 1. **Load**: file bytes + media type -> [`SourceImage`] ([`load_image`], [`load_path`])
//! 2. **Composite**: [`SourceImage`] + [`CompositeParams`] -> [`CanvasSurface`] ([`composite`])
//! 3. **Export**: [`CanvasSurface`] -> PNG bytes ([`export_png`])
//!
//! [`Session`] ties these together for interactive use. It keeps paired slider/field controls
//! in sync, debounces continuous edits, and maps every failure back to a usable state.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: `composite` is a pure function of its inputs.
//! - **Single-threaded**: nothing spawns threads. Debouncing runs on caller-supplied instants.
//! - **Premultiplied RGBA8** internally. Export converts to straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod effects;
mod encode;
mod foundation;
mod session;

pub use assets::decode::decode_image;
pub use assets::loader::{
    FALLBACK_MEDIA_TYPE, LoadedImage, ensure_image_media_type, load_image, load_path,
    media_type_for_path,
};
pub use assets::source::SourceImage;
pub use compose::compositor::composite;
pub use compose::layout::{CompositeLayout, MAX_CANVAS_SIDE, plan_layout};
pub use compose::params::{
    BLUR_RADIUS_MAX, BLUR_RADIUS_MIN, CompositeParams, DEFAULT_BLUR_RADIUS_PX,
    DEFAULT_SCALE_PERCENT, FillMode, SCALE_PERCENT_MAX, SCALE_PERCENT_MIN, clamp_input,
    clamp_value,
};
pub use compose::surface::CanvasSurface;
pub use effects::blur::{EXACT_KERNEL_MAX_SIGMA, blur_rgba8_premul};
pub use encode::png::{
    EXPORT_SUFFIX, FALLBACK_BASENAME, export_file_name, export_png, surface_to_rgba_image,
};
pub use foundation::core::{PixelRect, Rgba8Premul};
pub use foundation::error::{SquareError, SquareResult};
pub use session::config::{DEBOUNCE_ENV, DEFAULT_DEBOUNCE_MS, SessionConfig};
pub use session::controls::{ControlPair, ControlStates};
pub use session::debounce::Debouncer;
pub use session::state::{ControlEvent, ExportedImage, Session};
