// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print module — place an image on a paper page and render it as PDF.

pub mod writer;

pub use writer::{PageLayout, PrintWriter};
