// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-filter — the image filter pipeline.
//
// Provides the per-pixel filters (grayscale with intensity offset, HSL
// brightness), quarter-turn rotation, crop and resize, the colour math they
// rely on, a viewer session with live preview and zoom state, and print
// rendering to PDF.

pub mod color;
pub mod image;
pub mod print;
pub mod session;

// Re-export the primary structs so callers can use `bildwerk_filter::ImageProcessor` etc.
pub use self::image::processor::ImageProcessor;
pub use print::writer::PrintWriter;
pub use session::{Session, ViewState};
