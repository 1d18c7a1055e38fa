// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for display in a status bar or terminal.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::BildwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Nothing happened and nothing needs doing (e.g. no image open yet).
    Notice,
    /// The user must change an input and try again.
    ActionRequired,
    /// Retrying will not help: unreadable file, unsupported format.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `BildwerkError` into a `HumanError`.
pub fn humanize_error(err: &BildwerkError) -> HumanError {
    match err {
        BildwerkError::NoImageLoaded => HumanError {
            message: "There is no image open.".into(),
            suggestion: "Open an image first.".into(),
            severity: Severity::Notice,
        },

        BildwerkError::InvalidParameter {
            name,
            value,
            min,
            max,
        } => HumanError {
            message: format!("The {name} value {value} is out of range."),
            suggestion: format!("Pick a value between {min} and {max}."),
            severity: Severity::ActionRequired,
        },

        BildwerkError::UnsupportedAngle(degrees) => HumanError {
            message: format!("Images can't be rotated by {degrees} degrees."),
            suggestion: "Rotate left (-90) or right (90) instead.".into(),
            severity: Severity::ActionRequired,
        },

        BildwerkError::OutOfBoundsRegion {
            rect,
            width,
            height,
        } => HumanError {
            message: format!("The selection {rect} is outside the picture."),
            suggestion: format!("Select an area inside the {width}x{height} image."),
            severity: Severity::ActionRequired,
        },

        BildwerkError::InvalidArgument(detail) => HumanError {
            message: "A value you entered wasn't understood.".into(),
            suggestion: format!("Check the command and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        BildwerkError::ImageError(detail) => HumanError {
            message: "The image could not be read or written.".into(),
            suggestion: format!("Check that the file is a valid picture. ({detail})"),
            severity: Severity::Permanent,
        },

        BildwerkError::UnsupportedFormat(detail) => HumanError {
            message: "This image type isn't supported.".into(),
            suggestion: format!("Use PNG, JPEG, BMP, or GIF. ({detail})"),
            severity: Severity::Permanent,
        },

        BildwerkError::Io(io) => HumanError {
            message: "A file could not be accessed.".into(),
            suggestion: format!("Check the path and permissions. ({io})"),
            severity: Severity::ActionRequired,
        },

        BildwerkError::Serialization(detail) => HumanError {
            message: "The edit script could not be understood.".into(),
            suggestion: format!("Check the JSON syntax and operation names. ({detail})"),
            severity: Severity::ActionRequired,
        },

        BildwerkError::Config(detail) => HumanError {
            message: "The settings file has a problem.".into(),
            suggestion: format!("Fix or delete the settings file. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}
