// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Viewer session — the state a display layer keeps around the pipeline: the
// loaded image (if any), a live filter preview, and the view scale.
//
// Everything runs synchronously on the caller's thread. Edits requested with
// no image loaded are no-ops reported as `Outcome::NothingToProcess`.

use std::path::Path;

use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{AppConfig, Operation, Outcome, Size};
use image::DynamicImage;
use tracing::{debug, info, instrument};

use crate::image::processor::{apply_operation, open_image, save_image};
use crate::print::PrintWriter;

/// Zoom state of the on-screen image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub scale_factor: f32,
    pub fit_to_window: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            fit_to_window: false,
        }
    }
}

/// One open image plus its viewing state.
pub struct Session {
    config: AppConfig,
    /// The image as it was loaded, for `revert`.
    original: Option<DynamicImage>,
    /// What the user currently sees.
    current: Option<DynamicImage>,
    /// Snapshot taken by the first `preview`; later previews start from it.
    preview_base: Option<DynamicImage>,
    view: ViewState,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        let view = ViewState {
            fit_to_window: config.view.fit_to_window,
            ..ViewState::default()
        };
        Self {
            config,
            original: None,
            current: None,
            preview_base: None,
            view,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // -- Loading ---------------------------------------------------------------

    /// Decode `path` and make it the current image.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<Outcome> {
        let image = open_image(path.as_ref())?;
        Ok(self.load(image))
    }

    /// Replace whatever is loaded with `image` and reset the view.
    pub fn load(&mut self, image: DynamicImage) -> Outcome {
        let outcome = applied(&image);
        self.original = Some(image.clone());
        self.current = Some(image);
        self.preview_base = None;
        self.view.scale_factor = 1.0;
        outcome
    }

    pub fn close(&mut self) {
        self.original = None;
        self.current = None;
        self.preview_base = None;
        self.view.scale_factor = 1.0;
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    /// The image as currently displayed, preview included.
    pub fn image(&self) -> Option<&DynamicImage> {
        self.current.as_ref()
    }

    // -- Editing ---------------------------------------------------------------

    /// Apply `op` to the current image, committing any pending preview first.
    #[instrument(skip_all, fields(op = op.name()))]
    pub fn apply(&mut self, op: &Operation) -> Result<Outcome> {
        let Some(current) = self.current.as_ref() else {
            debug!("No image loaded, nothing to process");
            return Ok(Outcome::NothingToProcess);
        };
        let edited = apply_operation(current, op, &self.config.pipeline)?;
        self.preview_base = None;
        Ok(self.replace_current(edited))
    }

    /// Show `op` applied to the image as it was before the first preview.
    ///
    /// Repeated previews (a slider being dragged) each start from that same
    /// snapshot, so they never compound. Geometric operations cannot be
    /// previewed and are applied directly.
    #[instrument(skip_all, fields(op = op.name()))]
    pub fn preview(&mut self, op: &Operation) -> Result<Outcome> {
        if !op.is_pixel_filter() {
            return self.apply(op);
        }
        let Some(current) = self.current.as_ref() else {
            return Ok(Outcome::NothingToProcess);
        };
        let base = self.preview_base.get_or_insert_with(|| current.clone());
        let edited = apply_operation(base, op, &self.config.pipeline)?;
        Ok(self.replace_current(edited))
    }

    pub fn is_previewing(&self) -> bool {
        self.preview_base.is_some()
    }

    /// Keep the previewed image.
    pub fn commit_preview(&mut self) -> Outcome {
        self.preview_base = None;
        self.current.as_ref().map_or(Outcome::NothingToProcess, applied)
    }

    /// Drop the preview and show the snapshot again.
    pub fn cancel_preview(&mut self) -> Outcome {
        match self.preview_base.take() {
            Some(base) => self.replace_current(base),
            None => self.current.as_ref().map_or(Outcome::NothingToProcess, applied),
        }
    }

    /// Discard every edit since the image was loaded.
    pub fn revert(&mut self) -> Outcome {
        self.preview_base = None;
        match self.original.clone() {
            Some(original) => self.replace_current(original),
            None => Outcome::NothingToProcess,
        }
    }

    fn replace_current(&mut self, image: DynamicImage) -> Outcome {
        let outcome = applied(&image);
        self.current = Some(image);
        outcome
    }

    // -- View ------------------------------------------------------------------

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn can_zoom_in(&self) -> bool {
        self.has_image()
            && !self.view.fit_to_window
            && self.view.scale_factor < self.config.view.max_scale
    }

    pub fn can_zoom_out(&self) -> bool {
        self.has_image()
            && !self.view.fit_to_window
            && self.view.scale_factor > self.config.view.min_scale
    }

    /// Enlarge by the configured step. Returns whether the scale changed.
    pub fn zoom_in(&mut self) -> bool {
        if !self.can_zoom_in() {
            return false;
        }
        self.scale_by(self.config.view.zoom_in_factor);
        true
    }

    /// Shrink by the configured step. Returns whether the scale changed.
    pub fn zoom_out(&mut self) -> bool {
        if !self.can_zoom_out() {
            return false;
        }
        self.scale_by(self.config.view.zoom_out_factor);
        true
    }

    /// Back to 100%.
    pub fn normal_size(&mut self) {
        if self.view.fit_to_window {
            return;
        }
        self.view.scale_factor = 1.0;
    }

    /// Toggle fitting to the viewport. Leaving fit mode returns to 100%.
    pub fn set_fit_to_window(&mut self, fit: bool) {
        self.view.fit_to_window = fit;
        if !fit {
            self.view.scale_factor = 1.0;
        }
    }

    fn scale_by(&mut self, factor: f32) {
        self.view.scale_factor *= factor;
        debug!(scale = self.view.scale_factor, "View scale changed");
    }

    /// On-screen size of the image inside a `viewport`.
    pub fn display_size(&self, viewport: Size) -> Option<Size> {
        let image = self.current.as_ref()?;
        let native = Size::new(image.width(), image.height());
        if self.view.fit_to_window {
            return Some(native.fit_within(viewport));
        }
        let scaled = |v: u32| (v as f32 * self.view.scale_factor).round() as u32;
        Some(Size::new(scaled(native.width), scaled(native.height)))
    }

    // -- Output ----------------------------------------------------------------

    /// Save the current image; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = self.current.as_ref().ok_or(BildwerkError::NoImageLoaded)?;
        save_image(image, path.as_ref())
    }

    /// Render the current image as a one-page PDF with the configured paper.
    pub fn print_to_pdf(&self) -> Result<Vec<u8>> {
        let image = self.current.as_ref().ok_or(BildwerkError::NoImageLoaded)?;
        let bytes = PrintWriter::new(self.config.print).render(image)?;
        info!(bytes = bytes.len(), "Print rendered");
        Ok(bytes)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

fn applied(image: &DynamicImage) -> Outcome {
    Outcome::Applied {
        width: image.width(),
        height: image.height(),
    }
}
