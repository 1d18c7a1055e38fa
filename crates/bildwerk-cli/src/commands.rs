// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command execution. Every command loads one image into a `Session`, edits
// it, and writes the result.

use std::path::Path;

use bildwerk_core::config::default_config_path;
use bildwerk_core::error::{BildwerkError, Result};
use bildwerk_core::{AppConfig, CropPolicy, CropRect, Operation, Outcome, PaperSize, ParameterPolicy};
use bildwerk_filter::Session;
use tracing::info;

use crate::cli::{Cli, Commands, InOut};

/// Resolve settings from the config file and command-line overrides.
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match cli.config.as_ref().cloned().or_else(default_config_path) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if cli.clamp {
        config.pipeline.parameter_policy = ParameterPolicy::Clamp;
    }
    if cli.strict_crop {
        config.pipeline.crop_policy = CropPolicy::Reject;
    }
    Ok(config)
}

pub fn run(cli: &Cli) -> Result<()> {
    let mut session = Session::new(load_config(cli)?);

    match &cli.command {
        Commands::Info { input } => {
            session.open(input)?;
            if let Some(image) = session.image() {
                println!(
                    "{}: {}x{} {:?}",
                    input.display(),
                    image.width(),
                    image.height(),
                    image.color()
                );
            }
            Ok(())
        }
        Commands::Grayscale { io, intensity } => edit(
            &mut session,
            io,
            &[Operation::Grayscale {
                intensity: *intensity,
            }],
        ),
        Commands::Brightness { io, delta } => {
            edit(&mut session, io, &[Operation::Brightness { delta: *delta }])
        }
        Commands::Rotate { io, degrees } => edit(
            &mut session,
            io,
            &[Operation::Rotate { degrees: *degrees }],
        ),
        Commands::Crop { io, rect } => {
            let rect = parse_rect(rect)?;
            edit(
                &mut session,
                io,
                &[Operation::Crop {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                }],
            )
        }
        Commands::Resize { io, width, height } => edit(
            &mut session,
            io,
            &[Operation::Resize {
                width: *width,
                height: *height,
            }],
        ),
        Commands::Apply { io, script } => {
            let ops = Operation::parse_script(&std::fs::read_to_string(script)?)?;
            info!(steps = ops.len(), script = %script.display(), "Edit script loaded");
            edit(&mut session, io, &ops)
        }
        Commands::Print { input, out, paper } => {
            if let Some(paper) = paper {
                let mut config = session.config().clone();
                config.print.paper = paper.parse::<PaperSize>()?;
                config.validate()?;
                session = Session::new(config);
            }
            session.open(input)?;
            let pdf = session.print_to_pdf()?;
            std::fs::write(out, &pdf)?;
            info!(out = %out.display(), bytes = pdf.len(), "Print PDF written");
            Ok(())
        }
    }
}

fn edit(session: &mut Session, io: &InOut, ops: &[Operation]) -> Result<()> {
    session.open(&io.input)?;
    for op in ops {
        if let Outcome::Applied { width, height } = session.apply(op)? {
            info!(op = op.name(), width, height, "Edit applied");
        }
    }
    save(session, &io.out)
}

fn save(session: &Session, out: &Path) -> Result<()> {
    session.save(out)?;
    info!(out = %out.display(), "Result written");
    Ok(())
}

/// Parse `X,Y,W,H`.
pub fn parse_rect(s: &str) -> Result<CropRect> {
    let parts: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|err| BildwerkError::InvalidArgument(format!("invalid rectangle {s:?}: {err}")))?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(CropRect::new(*x, *y, *w, *h)),
        _ => Err(BildwerkError::InvalidArgument(format!(
            "rectangle {s:?} must have four values: X,Y,WIDTH,HEIGHT"
        ))),
    }
}
