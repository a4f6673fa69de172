/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for the volume formats the library understands
//!
//! - [`tiff`]: numbered sequences of single page TIFF files and multi-page TIFF stacks
//! - [`vtk`]: legacy VTK structured points files
//!
//! The free functions here wrap the decoders and encoders of those modules for
//! the common single step conversions.
use std::path::{Path, PathBuf};

use vtkstack_core::options::{DecoderOptions, EncoderOptions};
use vtkstack_tiff::{SequencePattern, READ_INDEX_WIDTH};

use crate::errors::VolumeErrors;
use crate::traits::{DecoderTrait, EncoderTrait};
use crate::volume::Volume;

pub mod tiff;
pub mod vtk;

/// All supported volume formats
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VolumeFormat
{
    /// One single page TIFF file per slice, `{prefix}{index}.tif`
    TiffSequence,
    /// One TIFF file holding every slice as a page
    TiffStack,
    /// Legacy VTK structured points
    Vtk
}

/// Encoder options describing `volume`
pub(crate) fn create_options_for_encoder(
    options: Option<EncoderOptions>, volume: &Volume
) -> EncoderOptions
{
    let (width, height, slices) = volume.dimensions();

    options
        .unwrap_or_default()
        .set_width(width)
        .set_height(height)
        .set_slices(slices)
        .set_depth(volume.depth())
}

/// Load a volume from TIFF files named after `prefix`
///
/// A `page_count` above one reads the sequence `{prefix}00.tif`, `{prefix}01.tif`...
/// anything else reads the multi-page file `{prefix}.tif`.
pub fn load(prefix: &str, page_count: usize, options: DecoderOptions) -> Result<Volume, VolumeErrors>
{
    load_with_digits(prefix, page_count, READ_INDEX_WIDTH, options)
}

/// Like [`load`] with a custom sequence index width
pub fn load_with_digits(
    prefix: &str, page_count: usize, digits: usize, options: DecoderOptions
) -> Result<Volume, VolumeErrors>
{
    tiff::TiffVolumeDecoder::new_with_digits(prefix, page_count, digits, options)?.decode()
}

/// Load a VTK structured points file
pub fn load_vtk(path: &Path, options: DecoderOptions) -> Result<Volume, VolumeErrors>
{
    vtk::VtkVolumeDecoder::new(path, options).decode()
}

/// Write an 8 bit volume as binary VTK to `path`
///
/// # Errors
/// If the volume is not 8 bit or `path` cannot be written,
/// in which case nothing is left at `path`
pub fn save_vtk(volume: &Volume, path: &Path) -> Result<(), VolumeErrors>
{
    vtk::VtkVolumeEncoder::new(path).encode(volume)
}

/// Write every slice of `volume` to `{prefix}0000.tif`, `{prefix}0001.tif`...
///
/// Returns the written files in slice order
pub fn save_tiff_sequence(volume: &Volume, prefix: &str) -> Result<Vec<PathBuf>, VolumeErrors>
{
    let mut encoder = tiff::TiffSequenceEncoder::new(SequencePattern::for_writing(prefix));
    encoder.encode(volume)?;

    Ok(encoder.written().to_vec())
}
