/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use vtkstack_volume::codecs::tiff::TiffVolumeDecoder;
use vtkstack_volume::codecs::vtk::VtkVolumeDecoder;
use vtkstack_volume::errors::VolumeErrors;
use vtkstack_volume::traits::DecoderTrait;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::cmd_parsers::{get_decoder_options, ConversionRequest, Mode};
use crate::serde::Metadata;

/// Read the headers of the request's input and describe them as JSON
pub fn probe_request(request: &ConversionRequest, cmd_opts: &CmdOptions) -> Result<String, VolumeErrors>
{
    // only headers are read, so limits are lifted
    let options = get_decoder_options(cmd_opts)
        .set_max_width(usize::MAX)
        .set_max_height(usize::MAX)
        .set_max_depth(usize::MAX);

    let (files, metadata): (Vec<PathBuf>, _) = match request.mode
    {
        Mode::TiffToVtk =>
        {
            let mut decoder = TiffVolumeDecoder::new_with_digits(
                &request.prefix,
                request.page_count,
                request.read_digits,
                options
            )?;
            (decoder.input_paths()?, decoder.read_headers()?)
        }
        Mode::VtkToTiffSequence =>
        {
            let path = request.vtk_path();
            let metadata = VtkVolumeDecoder::new(&path, options).read_headers()?;
            (vec![path], metadata)
        }
    };

    serde_json::to_string_pretty(&Metadata::new(&files, &metadata))
        .map_err(|err| VolumeErrors::GenericString(format!("Could not serialize metadata: {err}")))
}

/// Probe input files, extract metadata, and print to standard output.
pub fn probe_input_files(request: &ConversionRequest, cmd_opts: &CmdOptions) -> Result<(), VolumeErrors>
{
    println!("{}", probe_request(request, cmd_opts)?);
    Ok(())
}
