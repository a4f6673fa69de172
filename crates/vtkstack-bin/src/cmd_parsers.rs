/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::debug;
use vtkstack_core::options::DecoderOptions;
use vtkstack_volume::errors::VolumeErrors;

use crate::cmd_args::Tool;
use crate::cmd_parsers::global_options::CmdOptions;

pub mod global_options;

/// Widest index a sequence file name may carry
const MAX_INDEX_WIDTH: usize = 9;

/// Direction of a conversion
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode
{
    TiffToVtk,
    VtkToTiffSequence
}

/// Everything a conversion needs, checked before any file is touched
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionRequest
{
    pub mode:         Mode,
    pub prefix:       String,
    pub page_count:   usize,
    pub save:         Option<String>,
    pub read_digits:  usize,
    pub write_digits: usize
}

impl ConversionRequest
{
    /// The VTK file of this conversion
    ///
    /// For [`Mode::TiffToVtk`] this is the output, `--save` or `{prefix}.vtk`.
    /// For [`Mode::VtkToTiffSequence`] it is the input `{prefix}.vtk`.
    pub fn vtk_path(&self) -> PathBuf
    {
        match (self.mode, &self.save)
        {
            (Mode::TiffToVtk, Some(save)) => PathBuf::from(save),
            _ => PathBuf::from(format!("{}.vtk", self.prefix))
        }
    }

    /// Prefix of the TIFF sequence written by [`Mode::VtkToTiffSequence`]
    pub fn tiff_output_prefix(&self) -> &str
    {
        self.save.as_deref().unwrap_or(&self.prefix)
    }
}

fn check_index_width(name: &str, width: usize) -> Result<usize, VolumeErrors>
{
    if width == 0 || width > MAX_INDEX_WIDTH
    {
        return Err(VolumeErrors::GenericString(format!(
            "--{name} must be between 1 and {MAX_INDEX_WIDTH}, got {width}"
        )));
    }
    Ok(width)
}

/// Turn parsed arguments into a conversion request
pub fn parse_request(args: &ArgMatches, tool: Tool) -> Result<ConversionRequest, VolumeErrors>
{
    let mode = match tool
    {
        Tool::Tiff2Vtk => Mode::TiffToVtk,
        Tool::Combined if args.get_flag("vtk2tiffseq") => Mode::VtkToTiffSequence,
        Tool::Combined => Mode::TiffToVtk
    };
    let prefix = args
        .get_one::<String>("prefix")
        .cloned()
        .unwrap_or_else(|| String::from("im"));

    let page_count = args.get_one::<usize>("pages").copied().unwrap_or(1);

    if tool == Tool::Tiff2Vtk && page_count == 0
    {
        return Err(VolumeErrors::GenericStr(
            "The number of TIF files must be specified!"
        ));
    }
    let save = args.get_one::<String>("save").cloned();

    if let Some(save) = &save
    {
        if save.is_empty()
        {
            return Err(VolumeErrors::GenericStr("--save cannot be empty"));
        }
    }

    let read_digits = check_index_width(
        "digits",
        args.get_one::<usize>("digits")
            .copied()
            .unwrap_or(vtkstack_tiff::READ_INDEX_WIDTH)
    )?;
    let write_digits = match tool
    {
        Tool::Combined => check_index_width(
            "out-digits",
            args.get_one::<usize>("out-digits")
                .copied()
                .unwrap_or(vtkstack_tiff::WRITE_INDEX_WIDTH)
        )?,
        Tool::Tiff2Vtk => vtkstack_tiff::WRITE_INDEX_WIDTH
    };

    let request = ConversionRequest {
        mode,
        prefix,
        page_count,
        save,
        read_digits,
        write_digits
    };
    debug!("Conversion request: {:?}", request);

    Ok(request)
}

/// Decoder options matching the command line
pub fn get_decoder_options(options: &CmdOptions) -> DecoderOptions
{
    DecoderOptions::new_cmd()
        .set_max_width(options.max_width)
        .set_max_height(options.max_height)
        .set_max_depth(options.max_depth)
        .set_strict_mode(options.strict_mode)
        .set_use_mmap(options.use_mmap())
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::cmd_args::{create_cmd_args, normalize_legacy_args};

    fn request(tool: Tool, args: &[&str]) -> Result<ConversionRequest, VolumeErrors>
    {
        let matches = create_cmd_args(tool)
            .try_get_matches_from(normalize_legacy_args(args.iter().copied()))
            .unwrap();
        parse_request(&matches, tool)
    }

    #[test]
    fn test_tiff2vtk_writes_prefix_vtk_by_default()
    {
        let request = request(Tool::Combined, &["vtkstack", "-tiff2vtk", "-prefix", "scan", "-n", "40"])
            .unwrap();

        assert_eq!(request.mode, Mode::TiffToVtk);
        assert_eq!(request.page_count, 40);
        assert_eq!(request.vtk_path(), PathBuf::from("scan.vtk"));
    }

    #[test]
    fn test_tiff2vtk_save_overrides_output()
    {
        let request = request(Tool::Combined, &["vtkstack", "-tiff2vtk", "-save", "out.vtk"]).unwrap();

        assert_eq!(request.vtk_path(), PathBuf::from("out.vtk"));
    }

    #[test]
    fn test_vtk2tiffseq_paths()
    {
        let plain = request(Tool::Combined, &["vtkstack", "-vtk2tiffseq", "-prefix", "vol"]).unwrap();

        assert_eq!(plain.mode, Mode::VtkToTiffSequence);
        assert_eq!(plain.vtk_path(), PathBuf::from("vol.vtk"));
        assert_eq!(plain.tiff_output_prefix(), "vol");
        assert_eq!(plain.write_digits, 4);

        let saved = request(
            Tool::Combined,
            &["vtkstack", "-vtk2tiffseq", "-prefix", "vol", "-save", "slice_"]
        )
        .unwrap();

        // the input stays {prefix}.vtk, only the output prefix changes
        assert_eq!(saved.vtk_path(), PathBuf::from("vol.vtk"));
        assert_eq!(saved.tiff_output_prefix(), "slice_");
    }

    #[test]
    fn test_strict_tool_request()
    {
        let request = request(Tool::Tiff2Vtk, &["tiff2vtk", "-n", "3"]).unwrap();

        assert_eq!(request.mode, Mode::TiffToVtk);
        assert_eq!(request.prefix, "im");
        assert_eq!(request.read_digits, 2);
        assert_eq!(request.vtk_path(), PathBuf::from("ImageData_Original.vtk"));
    }

    #[test]
    fn test_strict_tool_rejects_zero_pages()
    {
        let err = request(Tool::Tiff2Vtk, &["tiff2vtk", "-n", "0"]).unwrap_err();
        assert!(matches!(
            err,
            VolumeErrors::GenericStr("The number of TIF files must be specified!")
        ));
        assert!(!err.is_unsupported());

        // the combined tool reads the multi-page file instead
        let combined = request(Tool::Combined, &["vtkstack", "-tiff2vtk", "-n", "0"]).unwrap();
        assert_eq!(combined.page_count, 0);
    }

    #[test]
    fn test_index_width_is_checked()
    {
        let err = request(Tool::Combined, &["vtkstack", "-tiff2vtk", "-digits", "0"]).unwrap_err();
        assert!(matches!(err, VolumeErrors::GenericString(_)));

        let err = request(Tool::Combined, &["vtkstack", "-tiff2vtk", "-out-digits", "12"]).unwrap_err();
        assert!(matches!(err, VolumeErrors::GenericString(_)));

        let wide = request(Tool::Combined, &["vtkstack", "-tiff2vtk", "-digits", "3"]).unwrap();
        assert_eq!(wide.read_digits, 3);
    }

    #[test]
    fn test_decoder_options_follow_flags()
    {
        let mut cmd = CmdOptions::new();
        cmd.strict_mode = true;
        cmd.max_depth = 10;
        cmd.mmap = crate::cmd_args::MmapOptions::No;

        let options = get_decoder_options(&cmd);

        assert!(options.get_strict_mode());
        assert!(!options.get_use_mmap());
        assert_eq!(options.get_max_depth(), 10);
    }
}
