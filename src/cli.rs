// SPDX-License-Identifier: MPL-2.0
//! Command-line front end: crop an image file without a UI.
//!
//! ```text
//! lens_crop <input> -o <output> [--ratio R] [--rotate N] [--flip]
//!           [--rect x,y,w,h] [--config-dir DIR]
//! ```
//!
//! The tool drives a [`CropSession`] exactly as an interactive host would:
//! open on the decoded image, rotate/flip, pick the ratio, commit and render.

use crate::config;
use crate::domain::editing::AspectRatio;
use crate::domain::geometry::{Rect, Size};
use crate::editor::{CropEditInfo, CropOptions, CropSession};
use crate::error::{Error, Result};
use crate::media;
use std::ffi::OsString;
use std::path::PathBuf;

/// Viewport the headless session lays out in.
const HEADLESS_VIEWPORT: Size = Size::new(1024.0, 768.0);

pub const USAGE: &str = "\
Usage: lens_crop <input> -o <output> [options]

Options:
  -o, --output <FILE>     Where to write the cropped image
      --ratio <R>         original, freeform, square or W:H (e.g. 16:9)
      --rotate <N>        Quarter turns counter-clockwise
      --flip              Mirror left-to-right (after rotating)
      --rect <x,y,w,h>    Initial crop in upright pixels, before rotating;
                          ignored if it does not match the ratio
      --config-dir <DIR>  Directory holding settings.toml
  -h, --help              Print this help
";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub ratio: Option<AspectRatio>,
    pub rotate: u32,
    pub flip: bool,
    pub rect: Option<Rect>,
    pub config_dir: Option<PathBuf>,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Crop(CliArgs),
}

impl Command {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        if args.contains(["-h", "--help"]) {
            return Ok(Command::Help);
        }

        let output: PathBuf = args.value_from_str(["-o", "--output"]).map_err(arg_error)?;
        let ratio: Option<AspectRatio> = args.opt_value_from_str("--ratio").map_err(arg_error)?;
        let rotate: Option<u32> = args.opt_value_from_str("--rotate").map_err(arg_error)?;
        let flip = args.contains("--flip");
        let rect = args
            .opt_value_from_fn("--rect", parse_rect)
            .map_err(arg_error)?;
        let config_dir: Option<PathBuf> =
            args.opt_value_from_str("--config-dir").map_err(arg_error)?;
        let input: PathBuf = args.free_from_str().map_err(arg_error)?;

        let remaining = args.finish();
        if !remaining.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "unexpected arguments: {:?}",
                remaining
            )));
        }

        Ok(Command::Crop(CliArgs {
            input,
            output,
            ratio,
            rotate: rotate.unwrap_or(0) % 4,
            flip,
            rect,
            config_dir,
        }))
    }
}

fn arg_error(err: pico_args::Error) -> Error {
    Error::InvalidArgument(err.to_string())
}

/// Parses `x,y,w,h` into a rectangle.
pub fn parse_rect(value: &str) -> std::result::Result<Rect, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid rect '{value}': {e}"))?;
    match parts.as_slice() {
        [x, y, w, h] if *w > 0.0 && *h > 0.0 => Ok(Rect::new(*x, *y, *w, *h)),
        [_, _, _, _] => Err(format!("rect '{value}' must have a positive size")),
        _ => Err(format!("rect '{value}' must be x,y,w,h")),
    }
}

/// Crops `args.input` into `args.output` and returns what was committed.
pub fn run(args: &CliArgs) -> Result<CropEditInfo> {
    let (config, warning) = config::load_with_override(args.config_dir.clone());
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }
    let settings = config.editor_settings();

    let loaded = media::load_image(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        orientation = ?loaded.orientation,
        "image loaded"
    );

    // `--rect` is given before rotating, so the ratio it is checked against
    // is the one the rotation will turn into the requested ratio.
    let ratio = args.ratio.unwrap_or(settings.aspect_ratio);
    let initial_ratio = if args.rotate % 2 == 1 {
        ratio.rotated()
    } else {
        ratio
    };
    let options = CropOptions {
        initial_crop: args.rect,
        aspect_ratio: initial_ratio,
        ..CropOptions::default()
    };
    let mut session = CropSession::new(loaded.source(), options, settings, HEADLESS_VIEWPORT, 1.0);

    for _ in 0..args.rotate {
        session.rotate();
    }
    if args.flip {
        session.flip();
    }

    let info = session.commit();
    let cropped = session.render(&loaded.image)?;
    media::save_image(&cropped, &args.output)?;

    tracing::info!(
        rect = ?info.rect,
        quarter_turns = info.transform.rotation_quarter_turns(),
        flipped = info.transform.is_flipped(),
        aspect_ratio = %info.aspect_ratio,
        zoom_scale = info.zoom_scale,
        output = %args.output.display(),
        "crop committed"
    );
    Ok(info)
}
