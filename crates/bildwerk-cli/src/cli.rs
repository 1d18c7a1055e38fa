// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bildwerk")]
#[command(version, about = "Image filter and viewer engine", long_about = None)]
pub struct Cli {
    /// Settings file (defaults to $XDG_CONFIG_HOME/bildwerk/config.json)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Clamp out-of-range filter parameters instead of rejecting them
    #[arg(long, global = true)]
    pub clamp: bool,

    /// Refuse crop rectangles that reach past the image edge
    #[arg(long, global = true)]
    pub strict_crop: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Input image and where to write the result.
#[derive(Debug, Args)]
pub struct InOut {
    /// Input image
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file; the format follows the extension
    #[arg(short, long, value_name = "FILE")]
    pub out: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print dimensions and colour type
    Info {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Convert to gray, lifting luminance by an offset
    Grayscale {
        #[command(flatten)]
        io: InOut,

        /// Luminance offset (0-255)
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        intensity: i32,
    },

    /// Shift HSL lightness, keeping hue and saturation
    Brightness {
        #[command(flatten)]
        io: InOut,

        /// Lightness offset (-100 to 100)
        #[arg(long, allow_negative_numbers = true)]
        delta: i32,
    },

    /// Rotate a quarter turn
    Rotate {
        #[command(flatten)]
        io: InOut,

        /// 90 (right) or -90 (left)
        #[arg(long, allow_negative_numbers = true)]
        degrees: i32,
    },

    /// Cut out a rectangle
    Crop {
        #[command(flatten)]
        io: InOut,

        /// Rectangle as X,Y,WIDTH,HEIGHT
        #[arg(long, value_name = "X,Y,W,H")]
        rect: String,
    },

    /// Fit within a bounding box, keeping aspect ratio
    Resize {
        #[command(flatten)]
        io: InOut,

        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,
    },

    /// Run a JSON edit script
    Apply {
        #[command(flatten)]
        io: InOut,

        /// JSON array of operations
        #[arg(short, long, value_name = "FILE")]
        script: PathBuf,
    },

    /// Render a print-ready single-page PDF
    Print {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output PDF
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// a4, a3, a5, letter, legal, or WIDTHxHEIGHT in mm
        #[arg(long, value_name = "PAPER")]
        paper: Option<String>,
    },
}
