// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — per-pixel filters, geometric edits, and the chainable processor.

pub mod filters;
pub mod processor;
pub mod transform;

pub use filters::{apply_brightness, apply_grayscale};
pub use processor::{ImageProcessor, apply_operation};
pub use transform::{crop, resize, rotate};
