// SPDX-License-Identifier: MPL-2.0
//! `lens_crop` is the geometry engine behind an interactive image-crop editor.
//!
//! It keeps a crop rectangle under edge/corner drags with aspect-ratio locking
//! and boundary clamping, maps between a zoomed/panned viewport and the source
//! image, and resolves the final pixel-accurate crop after orientation and
//! rotate/flip corrections. A small command-line front end drives the same
//! session headlessly.

#![doc(html_root_url = "https://docs.rs/lens_crop/0.1.0")]

pub mod cli;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod logging;
pub mod media;

#[cfg(test)]
pub mod test_utils;
