/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;

use log::{debug, info};
use vtkstack_core::bit_depth::BitDepth;
use vtkstack_tiff::SequencePattern;
use vtkstack_volume::codecs::tiff::{TiffSequenceEncoder, TiffVolumeDecoder};
use vtkstack_volume::codecs::vtk::{VtkVolumeDecoder, VtkVolumeEncoder};
use vtkstack_volume::core_filters::depth::Depth;
use vtkstack_volume::errors::VolumeErrors;
use vtkstack_volume::traits::DecoderTrait;
use vtkstack_volume::workflow::WorkFlow;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::cmd_parsers::{get_decoder_options, ConversionRequest, Mode};

/// Build the workflow for `request` and run it to the end
pub fn create_and_exec_workflow_from_cmd(
    request: &ConversionRequest, cmd_opts: &CmdOptions
) -> Result<(), VolumeErrors>
{
    let mut workflow = create_workflow(request, cmd_opts, &mut stdin().lock())?;

    workflow.advance_to_end()
}

/// Build the workflow for `request`
///
/// Paths are verified here, before anything is decoded. Overwrite
/// confirmations are read from `answers`.
pub fn create_workflow<R: BufRead>(
    request: &ConversionRequest, cmd_opts: &CmdOptions, answers: &mut R
) -> Result<WorkFlow, VolumeErrors>
{
    let options = get_decoder_options(cmd_opts);
    let threshold = cmd_opts.mmap_threshold();

    let mut workflow = WorkFlow::new();

    match request.mode
    {
        Mode::TiffToVtk =>
        {
            let decoder = TiffVolumeDecoder::new_with_digits(
                &request.prefix,
                request.page_count,
                request.read_digits,
                options
            )?
            .set_mmap_threshold(threshold);

            let output = request.vtk_path();
            verify_file_paths(
                &decoder.input_paths()?,
                &[output.clone()],
                cmd_opts.override_files,
                answers
            )?;

            workflow
                .chain_decoder(Box::new(decoder))
                .chain_operations(Box::new(Depth::new(BitDepth::Eight)))
                .chain_encoder(Box::new(VtkVolumeEncoder::new(&output)));
        }
        Mode::VtkToTiffSequence =>
        {
            let input = request.vtk_path();
            verify_file_paths(&[input.clone()], &[], cmd_opts.override_files, answers)?;

            let mut decoder = VtkVolumeDecoder::new(&input, options).set_mmap_threshold(threshold);

            // the slice count, and with it the output names, is in the header
            let (_, _, slices) = decoder.read_headers()?.dimensions();
            let pattern = SequencePattern::new(request.tiff_output_prefix(), request.write_digits);
            let outputs = pattern.file_names(slices)?;

            debug!("Writing {} slices to {:?}...", slices, outputs.first());
            verify_file_paths(&[input], &outputs, cmd_opts.override_files, answers)?;

            workflow
                .chain_decoder(Box::new(decoder))
                .chain_encoder(Box::new(TiffSequenceEncoder::new(pattern)));
        }
    }
    Ok(workflow)
}

/// Check inputs exist and ask before replacing outputs
///
/// Without `override_files` every existing output needs a `y` read
/// from `answers`, anything else aborts the conversion.
pub fn verify_file_paths<R: BufRead>(
    inputs: &[PathBuf], outputs: &[PathBuf], override_files: bool, answers: &mut R
) -> Result<(), VolumeErrors>
{
    for in_path in inputs
    {
        if outputs.contains(in_path)
        {
            return Err(VolumeErrors::GenericString(format!(
                "Cannot use {:?} as both input and output",
                in_path
            )));
        }
        if !in_path.exists()
        {
            return Err(VolumeErrors::GenericString(format!(
                "Path {:?}, does not exist",
                in_path
            )));
        }
        if !in_path.is_file()
        {
            return Err(VolumeErrors::GenericString(format!(
                "Path {:?} is not a file",
                in_path
            )));
        }
    }

    for out_path in outputs
    {
        if !out_path.exists()
        {
            continue;
        }
        if out_path.is_dir()
        {
            return Err(VolumeErrors::GenericString(format!(
                "Output {:?} is a directory",
                out_path
            )));
        }
        if override_files
        {
            info!("Overwriting path {:?} ", out_path);
            continue;
        }

        print!("File {:?} exists, overwrite [y/N] ", out_path);
        stdout().flush()?;

        let mut result = String::new();
        answers.read_line(&mut result)?;

        if !result.trim().eq_ignore_ascii_case("y")
        {
            return Err(VolumeErrors::GenericString(format!(
                "Not overwriting file {:?}",
                out_path
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests
{
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;

    use super::*;

    struct Scratch(PathBuf);

    impl Scratch
    {
        fn new(name: &str) -> Scratch
        {
            let dir = std::env::temp_dir().join(format!("vtkstack-bin-{name}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Scratch(dir)
        }

        fn touch(&self, name: &str) -> PathBuf
        {
            let path = self.0.join(name);
            fs::write(&path, b"x").unwrap();
            path
        }
    }

    impl Drop for Scratch
    {
        fn drop(&mut self)
        {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn no_answers() -> Cursor<&'static [u8]>
    {
        Cursor::new(&b""[..])
    }

    #[test]
    fn test_missing_input()
    {
        let scratch = Scratch::new("missing");
        let input = scratch.0.join("im.vtk");

        let err = verify_file_paths(&[input], &[], false, &mut no_answers()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_is_not_an_input()
    {
        let scratch = Scratch::new("dir-input");

        let err = verify_file_paths(&[scratch.0.clone()], &[], false, &mut no_answers()).unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[test]
    fn test_same_input_and_output()
    {
        let scratch = Scratch::new("same");
        let path = scratch.touch("im.tif");

        let err = verify_file_paths(&[path.clone()], &[path], true, &mut no_answers()).unwrap_err();
        assert!(err.to_string().contains("both input and output"));
    }

    #[test]
    fn test_existing_output_prompts()
    {
        let scratch = Scratch::new("prompt");
        let inputs = vec![scratch.touch("im.tif")];
        let outputs = vec![scratch.touch("im.vtk")];
        let paths = (inputs.as_slice(), outputs.as_slice());

        verify_file_paths(paths.0, paths.1, false, &mut Cursor::new(&b"y\n"[..])).unwrap();
        verify_file_paths(paths.0, paths.1, true, &mut no_answers()).unwrap();

        let err = verify_file_paths(paths.0, paths.1, false, &mut Cursor::new(&b"n\n"[..])).unwrap_err();
        assert!(err.to_string().contains("Not overwriting"));

        let err = verify_file_paths(paths.0, paths.1, false, &mut no_answers()).unwrap_err();
        assert!(err.to_string().contains("Not overwriting"));
    }

    #[test]
    fn test_missing_sequence_file_fails_before_decoding()
    {
        let scratch = Scratch::new("sequence");
        scratch.touch("im00.tif");

        let prefix = scratch.0.join("im");
        let request = ConversionRequest {
            mode:         Mode::TiffToVtk,
            prefix:       prefix.to_string_lossy().into_owned(),
            page_count:   2,
            save:         None,
            read_digits:  2,
            write_digits: 4
        };

        let err = create_workflow(&request, &CmdOptions::new(), &mut no_answers())
            .err()
            .unwrap();

        assert!(err.to_string().contains("im01.tif"));
        assert!(!Path::new(&format!("{}.vtk", request.prefix)).exists());
    }
}
