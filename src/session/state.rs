use std::{path::Path, time::Instant};

use crate::{
    assets::{
        loader::{self, LoadedImage},
        source::SourceImage,
    },
    compose::{
        compositor::composite,
        params::{
            BLUR_RADIUS_MAX, BLUR_RADIUS_MIN, CompositeParams, FillMode, SCALE_PERCENT_MAX,
            SCALE_PERCENT_MIN,
        },
        surface::CanvasSurface,
    },
    encode::png::{export_file_name, export_png},
    foundation::error::{SquareError, SquareResult},
    session::{
        config::SessionConfig,
        controls::{ControlPair, ControlStates},
        debounce::Debouncer,
    },
};

/// One user-facing control interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    /// Fill-mode selection changed. Recomputes immediately.
    FillMode(FillMode),
    /// Blur slider dragged. Debounced.
    BlurSlider(i32),
    /// Blur field edited while typing. Debounced.
    BlurField(String),
    /// Blur field committed. Recomputes immediately.
    BlurCommit(String),
    /// Scale slider dragged. Debounced.
    ScaleSlider(i32),
    /// Scale field edited while typing. Debounced.
    ScaleField(String),
    /// Scale field committed. Recomputes immediately.
    ScaleCommit(String),
    /// Restore default params. Recomputes immediately.
    Reset,
}

/// Encoded export plus the file name it should be saved under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// Owns the loaded image, the control values and the latest composite.
///
/// All methods run synchronously on the caller's thread. Every failure leaves the session in a
/// usable state: either the previous image is kept or the session returns to "no image".
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    image: Option<LoadedImage>,
    fill_mode: FillMode,
    blur: ControlPair,
    scale: ControlPair,
    surface: Option<CanvasSurface>,
    debounce: Debouncer,
    loading: bool,
    last_error: Option<String>,
    render_count: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let defaults = config.defaults.sanitized();
        Self {
            debounce: Debouncer::new(config.debounce_window()),
            fill_mode: defaults.fill_mode,
            blur: ControlPair::new(BLUR_RADIUS_MIN, BLUR_RADIUS_MAX, defaults.blur_radius_px),
            scale: ControlPair::new(SCALE_PERCENT_MIN, SCALE_PERCENT_MAX, defaults.scale_percent),
            config,
            image: None,
            surface: None,
            loading: false,
            last_error: None,
            render_count: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current params as the compositor will see them.
    pub fn params(&self) -> CompositeParams {
        CompositeParams {
            fill_mode: self.fill_mode,
            blur_radius_px: self.blur.value(),
            scale_percent: self.scale.value(),
        }
    }

    pub fn blur_control(&self) -> &ControlPair {
        &self.blur
    }

    pub fn scale_control(&self) -> &ControlPair {
        &self.scale
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.image.as_ref().map(|img| &img.source)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.image.as_ref().and_then(|img| img.file_name.as_deref())
    }

    /// Latest composite, if an image is loaded.
    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.surface.as_ref()
    }

    /// Message for the most recent user-visible failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Number of composites run so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn has_pending_recompute(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn controls(&self) -> ControlStates {
        if self.loading {
            return ControlStates::default();
        }
        let ready = self.image.is_some();
        ControlStates {
            file_input: true,
            fill_mode: ready,
            blur: ready && self.fill_mode == FillMode::Blur,
            scale: ready,
            reset: ready,
            export: ready,
        }
    }

    /// Mark a load in progress. Every control is disabled until [`Session::finish_load`].
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply the outcome of an image load.
    ///
    /// Success resets params to the configured defaults and composites right away.
    /// An unsupported file keeps any previously loaded image; any other failure returns the
    /// session to its initial empty state.
    pub fn finish_load(&mut self, result: SquareResult<LoadedImage>) -> SquareResult<()> {
        self.loading = false;
        match result {
            Ok(image) => {
                tracing::debug!(
                    width = image.source.width(),
                    height = image.source.height(),
                    file_name = image.file_name.as_deref().unwrap_or(""),
                    "image loaded"
                );
                self.image = Some(image);
                self.surface = None;
                self.last_error = None;
                self.reset_params();
                self.recompute_now()
            }
            Err(err) => {
                tracing::warn!(error = %err, "image load failed");
                let keep_prior = matches!(err, SquareError::UnsupportedFileType(_));
                if !(keep_prior && self.image.is_some()) {
                    self.reset_to_initial();
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Load from in-memory bytes with a declared media type.
    pub fn load_bytes(
        &mut self,
        file_name: Option<&str>,
        media_type: &str,
        bytes: &[u8],
    ) -> SquareResult<()> {
        self.begin_load();
        let result = loader::load_image(bytes, media_type).map(|source| LoadedImage {
            source,
            file_name: file_name.map(str::to_owned),
        });
        self.finish_load(result)
    }

    /// Load from disk, guessing the media type from the extension.
    pub fn load_path(&mut self, path: &Path) -> SquareResult<()> {
        self.begin_load();
        let result = loader::load_path(path);
        self.finish_load(result)
    }

    /// Apply one control event. Continuous edits are debounced, discrete ones recompute now.
    ///
    /// Events are ignored while no image is loaded, since every control but the file input
    /// is disabled then.
    #[tracing::instrument(skip(self, now))]
    pub fn handle(&mut self, event: ControlEvent, now: Instant) -> SquareResult<()> {
        if self.image.is_none() || self.loading {
            tracing::debug!("control event ignored: no image ready");
            return Ok(());
        }

        match event {
            ControlEvent::FillMode(mode) => {
                self.fill_mode = mode;
                self.recompute_now()
            }
            ControlEvent::BlurSlider(v) => {
                self.blur.slide(v);
                self.schedule(now)
            }
            ControlEvent::BlurField(raw) => {
                self.blur.enter_field(&raw);
                self.schedule(now)
            }
            ControlEvent::BlurCommit(raw) => {
                self.blur.enter_field(&raw);
                self.recompute_now()
            }
            ControlEvent::ScaleSlider(v) => {
                self.scale.slide(v);
                self.schedule(now)
            }
            ControlEvent::ScaleField(raw) => {
                self.scale.enter_field(&raw);
                self.schedule(now)
            }
            ControlEvent::ScaleCommit(raw) => {
                self.scale.enter_field(&raw);
                self.recompute_now()
            }
            ControlEvent::Reset => {
                self.reset_params();
                self.recompute_now()
            }
        }
    }

    /// Run the debounced recompute if its quiet window has elapsed. Returns whether it ran.
    pub fn tick(&mut self, now: Instant) -> SquareResult<bool> {
        if !self.debounce.poll(now) {
            return Ok(false);
        }
        self.recompute_now()?;
        Ok(true)
    }

    /// Run any pending debounced recompute immediately.
    pub fn flush(&mut self) -> SquareResult<bool> {
        if !self.debounce.is_pending() {
            return Ok(false);
        }
        self.recompute_now()?;
        Ok(true)
    }

    /// Encode the current composite as PNG under `{basename}-1x1.png`.
    pub fn export(&mut self) -> SquareResult<ExportedImage> {
        let Some(surface) = self.surface.as_ref() else {
            let err = SquareError::export_failure("no image loaded");
            tracing::warn!(error = %err, "export refused");
            self.last_error = Some(err.to_string());
            return Err(err);
        };

        match export_png(surface) {
            Ok(png) => Ok(ExportedImage {
                file_name: export_file_name(self.file_name()),
                png,
            }),
            Err(err) => {
                let err = match err {
                    SquareError::ExportFailure(_) => err,
                    other => SquareError::export_failure(other.to_string()),
                };
                tracing::warn!(error = %err, "export failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn schedule(&mut self, now: Instant) -> SquareResult<()> {
        self.debounce.schedule(now);
        tracing::debug!(window_ms = self.config.debounce_ms, "recompute debounced");
        Ok(())
    }

    fn recompute_now(&mut self) -> SquareResult<()> {
        // Whatever was pending is superseded by this render.
        self.debounce.cancel();

        let Some(image) = self.image.as_ref() else {
            self.surface = None;
            return Ok(());
        };

        match composite(&image.source, &self.params()) {
            Ok(surface) => {
                self.surface = Some(surface);
                self.render_count += 1;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "composite failed");
                if matches!(err, SquareError::InvalidSource(_)) {
                    self.reset_to_initial();
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn reset_params(&mut self) {
        let defaults = self.config.defaults.sanitized();
        self.fill_mode = defaults.fill_mode;
        self.blur.reset(defaults.blur_radius_px);
        self.scale.reset(defaults.scale_percent);
    }

    fn reset_to_initial(&mut self) {
        self.image = None;
        self.surface = None;
        self.debounce.cancel();
        self.reset_params();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
