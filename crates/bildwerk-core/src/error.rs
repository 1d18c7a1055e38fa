// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildwerk.

use thiserror::Error;

use crate::types::CropRect;

/// Top-level error type for all Bildwerk operations.
#[derive(Debug, Error)]
pub enum BildwerkError {
    // -- Pipeline errors --
    #[error("no image loaded")]
    NoImageLoaded,

    #[error("parameter `{name}` out of range: {value} is not in [{min}, {max}]")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("unsupported rotation of {0} degrees (only +90 and -90)")]
    UnsupportedAngle(i32),

    #[error("region {rect} lies outside the {width}x{height} image")]
    OutOfBoundsRegion {
        rect: CropRect,
        width: u32,
        height: u32,
    },

    /// A value typed by the user (rectangle, paper name) that does not parse.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Codec errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BildwerkError {
    /// Shorthand for an out-of-range integer parameter.
    pub fn invalid_parameter(name: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::InvalidParameter {
            name,
            value,
            min,
            max,
        }
    }

    /// Local conditions the host can shrug off and keep running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NoImageLoaded
                | Self::InvalidParameter { .. }
                | Self::UnsupportedAngle(_)
                | Self::OutOfBoundsRegion { .. }
                | Self::InvalidArgument(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildwerkError>;
