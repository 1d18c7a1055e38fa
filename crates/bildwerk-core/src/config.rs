// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{BildwerkError, Result};
use crate::types::{CropPolicy, LumaCoefficients, PaperSize, ParameterPolicy, ResizeFilter};

pub const CONFIG_FILE: &str = "config.json";

/// Persistent application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub view: ViewConfig,
    pub print: PrintConfig,
}

/// Settings that change what the pipeline computes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Out-of-range filter parameters: reject (default) or clamp.
    pub parameter_policy: ParameterPolicy,
    /// Crop rectangles past the image edge: clamp (default) or reject.
    pub crop_policy: CropPolicy,
    /// Weights for the grayscale luminance.
    pub luma: LumaCoefficients,
    /// Resampling kernel for resize.
    pub resize_filter: ResizeFilter,
}

/// Zoom behaviour of the viewer session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Multiplier applied by "zoom in".
    pub zoom_in_factor: f32,
    /// Multiplier applied by "zoom out".
    pub zoom_out_factor: f32,
    /// Zoom in is disabled once the scale reaches this value.
    pub max_scale: f32,
    /// Zoom out is disabled once the scale falls to this value.
    pub min_scale: f32,
    /// Start new images in fit-to-window mode.
    pub fit_to_window: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_in_factor: 1.25,
            zoom_out_factor: 0.8,
            max_scale: 3.0,
            min_scale: 0.333,
            fit_to_window: false,
        }
    }
}

/// Page layout for print output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    pub paper: PaperSize,
    /// Blank border on every side of the page.
    pub margin_mm: f32,
    /// Resolution at which one image pixel maps onto paper before fitting.
    pub dpi: f32,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margin_mm: 15.0,
            dpi: 150.0,
        }
    }
}

impl AppConfig {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let config: Self = serde_json::from_str(&data).map_err(|err| {
            BildwerkError::Config(format!("{}: {}", path.display(), err))
        })?;
        config.validate()?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Write settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values that would make zoom or print layout meaningless.
    pub fn validate(&self) -> Result<()> {
        let view = &self.view;
        if !(view.zoom_in_factor > 1.0) {
            return Err(BildwerkError::Config(
                "view.zoom_in_factor must be greater than 1".into(),
            ));
        }
        if !(view.zoom_out_factor > 0.0 && view.zoom_out_factor < 1.0) {
            return Err(BildwerkError::Config(
                "view.zoom_out_factor must lie in (0, 1)".into(),
            ));
        }
        if !(view.min_scale > 0.0 && view.min_scale < view.max_scale) {
            return Err(BildwerkError::Config(
                "view.min_scale must be positive and below view.max_scale".into(),
            ));
        }
        let (w_mm, h_mm) = self.print.paper.dimensions_mm();
        let margin = self.print.margin_mm;
        if !(margin >= 0.0 && 2.0 * margin < w_mm.min(h_mm) as f32) {
            return Err(BildwerkError::Config(
                "print.margin_mm leaves no printable area".into(),
            ));
        }
        if !(self.print.dpi > 0.0) {
            return Err(BildwerkError::Config("print.dpi must be positive".into()));
        }
        Ok(())
    }
}

/// Conventional per-user config location: `$XDG_CONFIG_HOME/bildwerk/config.json`,
/// falling back to `$HOME/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg)
    } else {
        PathBuf::from(std::env::var("HOME").ok()?).join(".config")
    };
    Some(base.join("bildwerk").join(CONFIG_FILE))
}
