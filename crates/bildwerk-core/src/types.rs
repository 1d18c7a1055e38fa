// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildwerk filter pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{BildwerkError, Result};

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// What to do with a filter parameter that falls outside its documented range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterPolicy {
    /// Fail with `InvalidParameter`.
    #[default]
    Reject,
    /// Saturate to the nearest bound, the way a slider would.
    Clamp,
}

impl ParameterPolicy {
    /// Check `value` against `[min, max]` under this policy.
    pub fn admit(self, name: &'static str, value: i32, min: i32, max: i32) -> Result<i32> {
        if (min..=max).contains(&value) {
            return Ok(value);
        }
        match self {
            Self::Clamp => {
                tracing::debug!(name, value, min, max, "clamping out-of-range parameter");
                Ok(value.clamp(min, max))
            }
            Self::Reject => Err(BildwerkError::invalid_parameter(
                name,
                value.into(),
                min.into(),
                max.into(),
            )),
        }
    }
}

/// Offset added to the luminance of every pixel by the grayscale filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GrayscaleIntensity(u8);

impl GrayscaleIntensity {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 255;

    pub fn new(value: i32, policy: ParameterPolicy) -> Result<Self> {
        let value = policy.admit("intensity", value, Self::MIN, Self::MAX)?;
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Offset added to the HSL lightness of every pixel by the brightness filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BrightnessDelta(i8);

impl BrightnessDelta {
    pub const MIN: i32 = -100;
    pub const MAX: i32 = 100;

    pub fn new(value: i32, policy: ParameterPolicy) -> Result<Self> {
        let value = policy.admit("delta", value, Self::MIN, Self::MAX)?;
        Ok(Self(value as i8))
    }

    pub fn get(self) -> i32 {
        self.0.into()
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Quarter-turn rotation. No other angles are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// +90 degrees ("rotate right").
    Clockwise,
    /// -90 degrees ("rotate left").
    CounterClockwise,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            90 => Ok(Self::Clockwise),
            -90 => Ok(Self::CounterClockwise),
            other => Err(BildwerkError::UnsupportedAngle(other)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Clockwise => 90,
            Self::CounterClockwise => -90,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Largest size with this aspect ratio that fits inside `bounds`.
    ///
    /// May scale up as well as down. Dimensions truncate toward zero.
    pub fn fit_within(self, bounds: Size) -> Size {
        if self.is_empty() || bounds.is_empty() {
            return Size::default();
        }
        let (w, h) = (u64::from(self.width), u64::from(self.height));
        let (bw, bh) = (u64::from(bounds.width), u64::from(bounds.height));

        let width_at_full_height = bh * w / h;
        if width_at_full_height <= bw {
            Size::new(width_at_full_height.max(1) as u32, bounds.height)
        } else {
            Size::new(bounds.width, (bw * h / w).max(1) as u32)
        }
    }
}

/// Rectangular region in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalised rectangle spanning two corner points, like a dragged
    /// selection that may run in any direction.
    pub fn from_corners(a: (u32, u32), b: (u32, u32)) -> Self {
        let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
        let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the whole rectangle lies inside a `width` x `height` image.
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }

    /// Intersection with the image bounds, or `None` if nothing remains.
    pub fn intersect(&self, width: u32, height: u32) -> Option<CropRect> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        let clipped = CropRect::new(self.x, self.y, w, h);
        (!clipped.is_empty()).then_some(clipped)
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// How to treat a crop rectangle that extends past the image edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropPolicy {
    /// Intersect with the image bounds.
    #[default]
    Clamp,
    /// Fail with `OutOfBoundsRegion`.
    Reject,
}

// ---------------------------------------------------------------------------
// Colour and resampling settings
// ---------------------------------------------------------------------------

/// Channel weights used to derive luminance from RGB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LumaCoefficients {
    /// ITU-R BT.601: 0.299 R + 0.587 G + 0.114 B.
    #[default]
    Rec601,
    /// ITU-R BT.709: 0.2126 R + 0.7152 G + 0.0722 B.
    Rec709,
}

impl LumaCoefficients {
    /// Integer weights scaled so that they sum to 10 000.
    pub fn weights(self) -> (u32, u32, u32) {
        match self {
            Self::Rec601 => (2990, 5870, 1140),
            Self::Rec709 => (2126, 7152, 722),
        }
    }
}

/// Resampling kernel for resize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

/// Standard paper sizes for print output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

impl std::str::FromStr for PaperSize {
    type Err = BildwerkError;

    /// Parses `a4`, `letter`, ... or a custom `WIDTHxHEIGHT` in millimetres.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            other => {
                let parsed: Option<(u32, u32)> = other
                    .split_once('x')
                    .and_then(|(w, h)| Some((w.trim().parse().ok()?, h.trim().parse().ok()?)));
                match parsed {
                    Some((width_mm, height_mm)) if width_mm > 0 && height_mm > 0 => {
                        Ok(Self::Custom {
                            width_mm,
                            height_mm,
                        })
                    }
                    _ => Err(BildwerkError::InvalidArgument(format!("unknown paper size: {s}"))),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// One edit step, as it appears in an edit script.
///
/// Parameters are raw user input; they are validated when the operation is
/// applied, under the active `ParameterPolicy` and `CropPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Grayscale { intensity: i32 },
    Brightness { delta: i32 },
    Rotate { degrees: i32 },
    Crop { x: u32, y: u32, width: u32, height: u32 },
    Resize { width: u32, height: u32 },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale { .. } => "grayscale",
            Self::Brightness { .. } => "brightness",
            Self::Rotate { .. } => "rotate",
            Self::Crop { .. } => "crop",
            Self::Resize { .. } => "resize",
        }
    }

    /// Per-pixel filters keep the geometry and can be previewed live.
    pub fn is_pixel_filter(&self) -> bool {
        matches!(self, Self::Grayscale { .. } | Self::Brightness { .. })
    }

    /// Parse an edit script: a JSON array of operations.
    pub fn parse_script(json: &str) -> Result<Vec<Operation>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The image was replaced; these are its new dimensions.
    Applied { width: u32, height: u32 },
    /// There was no image to work on; nothing changed.
    NothingToProcess,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
