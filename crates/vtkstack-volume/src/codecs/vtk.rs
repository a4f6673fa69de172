/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Legacy VTK structured points files as volumes
use std::path::{Path, PathBuf};

use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::log::info;
use vtkstack_core::options::{DecoderOptions, EncoderOptions};
use vtkstack_core::result::DecodingResult;
use vtkstack_vtk::{VtkDecoder, VtkEncoder, DEFAULT_TITLE};

use crate::buffer::VolumeBuffer;
use crate::codecs::{create_options_for_encoder, VolumeFormat};
use crate::errors::VolumeErrors;
use crate::file_io::{read_file, write_atomically, MMAP_THRESHOLD};
use crate::metadata::VolumeMetadata;
use crate::traits::{DecoderTrait, EncoderTrait};
use crate::volume::Volume;

/// Decodes a volume from a VTK structured points file
pub struct VtkVolumeDecoder
{
    path:           PathBuf,
    options:        DecoderOptions,
    mmap_threshold: u64
}

impl VtkVolumeDecoder
{
    pub fn new(path: &Path, options: DecoderOptions) -> VtkVolumeDecoder
    {
        VtkVolumeDecoder {
            path: path.to_path_buf(),
            options,
            mmap_threshold: MMAP_THRESHOLD
        }
    }

    /// Files below this size are never memory mapped
    pub fn set_mmap_threshold(mut self, threshold: u64) -> Self
    {
        self.mmap_threshold = threshold;
        self
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }
}

impl DecoderTrait for VtkVolumeDecoder
{
    fn decode(&mut self) -> Result<Volume, VolumeErrors>
    {
        info!("Reading VTK file {:?}", self.path);

        let contents = read_file(&self.path, self.options.get_use_mmap(), self.mmap_threshold)?;
        let mut decoder = VtkDecoder::new_with_options(&contents, self.options);

        let pixels = decoder.decode()?;
        let header = decoder
            .header()
            .ok_or(VolumeErrors::GenericStr("VTK headers were not decoded"))?;

        let [nx, ny, nz] = header.dimensions;
        let mut volume = Volume::new(VolumeBuffer::from(pixels), nx, ny, nz)?;

        volume.set_spacing(header.spacing);
        volume.set_origin(header.origin);
        volume.metadata_mut().set_format(VolumeFormat::Vtk);

        Ok(volume)
    }

    fn read_headers(&mut self) -> Result<VolumeMetadata, VolumeErrors>
    {
        let contents = read_file(&self.path, self.options.get_use_mmap(), self.mmap_threshold)?;
        let mut decoder = VtkDecoder::new_with_options(&contents, self.options);

        decoder.decode_headers()?;

        let header = decoder
            .header()
            .ok_or(VolumeErrors::GenericStr("VTK headers were not decoded"))?;

        let [nx, ny, nz] = header.dimensions;
        let mut metadata = VolumeMetadata::default();

        metadata.set_dimensions(nx, ny, nz);
        metadata.set_depth(header.depth);
        metadata.set_spacing(header.spacing);
        metadata.set_origin(header.origin);
        metadata.set_format(VolumeFormat::Vtk);

        Ok(metadata)
    }

    fn name(&self) -> &'static str
    {
        "VTK"
    }
}

/// Writes 8 bit volumes as binary VTK structured points
pub struct VtkVolumeEncoder
{
    path:    PathBuf,
    title:   String,
    options: Option<EncoderOptions>
}

impl VtkVolumeEncoder
{
    pub fn new(path: &Path) -> VtkVolumeEncoder
    {
        VtkVolumeEncoder {
            path:    path.to_path_buf(),
            title:   DEFAULT_TITLE.to_string(),
            options: None
        }
    }

    /// Options other than dimensions and depth, e.g. ASCII output
    pub fn new_with_options(path: &Path, options: EncoderOptions) -> VtkVolumeEncoder
    {
        VtkVolumeEncoder {
            options: Some(options),
            ..Self::new(path)
        }
    }

    pub fn set_title(mut self, title: &str) -> Self
    {
        self.title = title.to_string();
        self
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }
}

impl EncoderTrait for VtkVolumeEncoder
{
    fn name(&self) -> &'static str
    {
        "VTK"
    }

    fn encode_inner(&mut self, volume: &Volume) -> Result<(), VolumeErrors>
    {
        let options = create_options_for_encoder(self.options, volume);
        let data = DecodingResult::from(volume.buffer().clone());

        info!("Writing VTK file {:?}", self.path);

        let encoder = VtkEncoder::new(&data, options)
            .set_title(&self.title)
            .set_spacing(volume.spacing())
            .set_origin(volume.origin());

        write_atomically(&self.path, |sink| {
            encoder.encode(sink)?;
            Ok(())
        })
    }

    fn supported_depths(&self) -> &'static [BitDepth]
    {
        &[BitDepth::Eight]
    }
}
