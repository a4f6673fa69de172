/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, ArgGroup, Command, ValueEnum};

use crate::cmd_args::help_strings::{
    DIGITS_HELP, PAGES_HELP, PREFIX_HELP, PROBE_HELP, TIFF2VTK_HELP, VTK2TIFFSEQ_HELP
};

pub mod help_strings;

/// Output name of the strict converter when `--save` is absent
pub const DEFAULT_SAVE_NAME: &str = "ImageData_Original.vtk";

/// Long flags that may also be spelled with a single dash
const LEGACY_FLAGS: &[&str] = &[
    "prefix",
    "save",
    "tiff2vtk",
    "vtk2tiffseq",
    "digits",
    "out-digits"
];

/// Which executable is parsing its arguments
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tool
{
    /// `vtkstack`, converts in either direction
    Combined,
    /// `tiff2vtk`, TIFF to VTK only, page count mandatory
    Tiff2Vtk
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MmapOptions
{
    No,
    Always,
    Auto
}

impl ValueEnum for MmapOptions
{
    fn value_variants<'a>() -> &'a [Self]
    {
        &[Self::No, Self::Auto, Self::Always]
    }

    fn to_possible_value(&self) -> Option<PossibleValue>
    {
        Some(match self
        {
            Self::No => PossibleValue::new("no"),
            Self::Always => PossibleValue::new("always"),
            Self::Auto => PossibleValue::new("auto")
        })
    }
}

/// Rewrite `-prefix im` style flags to `--prefix im`
///
/// Only flags in [`LEGACY_FLAGS`] are touched, short flags like `-n` and
/// anything after a bare `--` pass through unchanged.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>
{
    let mut escaped = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if escaped
            {
                return arg;
            }
            if arg == "--"
            {
                escaped = true;
                return arg;
            }
            let rewritten = arg.to_str().and_then(|text| {
                let name = text.strip_prefix('-').filter(|name| !name.starts_with('-'))?;
                let key = name.split_once('=').map_or(name, |(key, _)| key);

                LEGACY_FLAGS
                    .contains(&key)
                    .then(|| OsString::from(format!("-{text}")))
            });
            rewritten.unwrap_or(arg)
        })
        .collect()
}

#[rustfmt::skip]
pub fn create_cmd_args(tool: Tool) -> Command {
    let command = match tool {
        Tool::Combined => Command::new("vtkstack")
            .about("Convert microscopy stacks between TIFF and VTK structured points")
            .arg(Arg::new("pages")
                .short('n')
                .long("pages")
                .help("Number of TIFF files in the stack")
                .long_help(PAGES_HELP)
                .value_parser(value_parser!(usize))
                .default_value("1"))
            .arg(Arg::new("save")
                .long("save")
                .help("Output file, or output prefix for vtk2tiffseq")
                .value_parser(value_parser!(String)))
            .arg(Arg::new("tiff2vtk")
                .long("tiff2vtk")
                .action(ArgAction::SetTrue)
                .help_heading("MODES")
                .help("Convert a TIFF stack to VTK")
                .long_help(TIFF2VTK_HELP))
            .arg(Arg::new("vtk2tiffseq")
                .long("vtk2tiffseq")
                .action(ArgAction::SetTrue)
                .help_heading("MODES")
                .help("Convert a VTK file to a TIFF sequence")
                .long_help(VTK2TIFFSEQ_HELP))
            .group(ArgGroup::new("mode")
                .args(["tiff2vtk", "vtk2tiffseq"])
                .required(true))
            .arg(Arg::new("out-digits")
                .long("out-digits")
                .help_heading("ADVANCED")
                .help("Width of the zero padded index of output sequence files")
                .value_parser(value_parser!(usize))
                .default_value("4")),
        Tool::Tiff2Vtk => Command::new("tiff2vtk")
            .about("Convert a TIFF stack to an 8 bit VTK structured points file")
            .arg(Arg::new("pages")
                .short('n')
                .long("pages")
                .help("Number of TIFF files in the stack")
                .long_help(PAGES_HELP)
                .value_parser(value_parser!(usize))
                .required(true))
            .arg(Arg::new("save")
                .long("save")
                .help("Output VTK file")
                .value_parser(value_parser!(String))
                .default_value(DEFAULT_SAVE_NAME))
    };

    command
        .arg(Arg::new("prefix")
            .long("prefix")
            .help("Stem of the input file names")
            .long_help(PREFIX_HELP)
            .value_parser(value_parser!(String))
            .default_value("im"))
        .arg(Arg::new("digits")
            .long("digits")
            .help_heading("ADVANCED")
            .help("Width of the zero padded index of input sequence files")
            .long_help(DIGITS_HELP)
            .value_parser(value_parser!(usize))
            .default_value("2"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print volume metadata as JSON and exit")
            .long_help(PROBE_HELP))
        .arg(Arg::new("all-yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Overwrite existing output files without asking"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat extra pages in sequence files as errors"))
        .arg(Arg::new("mmap")
            .long("mmap")
            .help_heading("ADVANCED")
            .help("Influence the use of memory maps")
            .long_help("Change use of memory maps and how they are used for decoding.\nMemory maps are preferred for large stacks to keep memory usage low.")
            .value_parser(value_parser!(MmapOptions)))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Largest slice width to decode")
            .value_parser(value_parser!(usize))
            .default_value("65536"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Largest slice height to decode")
            .value_parser(value_parser!(usize))
            .default_value("65536"))
        .arg(Arg::new("max-depth")
            .long("max-depth")
            .help_heading("ADVANCED")
            .help("Largest number of slices to decode")
            .value_parser(value_parser!(usize))
            .default_value("65536"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display progress information, the default"))
}

#[cfg(test)]
mod tests
{
    use clap::error::ErrorKind;
    use vtkstack_tiff::{READ_INDEX_WIDTH, WRITE_INDEX_WIDTH};

    use super::*;

    fn legacy(args: &[&str]) -> Vec<OsString>
    {
        normalize_legacy_args(args.iter().copied())
    }

    #[test]
    fn test_legacy_flags_are_rewritten()
    {
        let args = legacy(&["vtkstack", "-prefix", "scan", "-n", "5", "-tiff2vtk", "-save=out.vtk"]);

        assert_eq!(
            args,
            ["vtkstack", "--prefix", "scan", "-n", "5", "--tiff2vtk", "--save=out.vtk"]
                .map(OsString::from)
        );
    }

    #[test]
    fn test_values_and_escaped_args_are_kept()
    {
        let args = legacy(&["vtkstack", "--prefix", "-x", "--", "-save"]);

        assert_eq!(args, ["vtkstack", "--prefix", "-x", "--", "-save"].map(OsString::from));
    }

    #[test]
    fn test_combined_tool_defaults()
    {
        let matches = create_cmd_args(Tool::Combined)
            .try_get_matches_from(legacy(&["vtkstack", "-tiff2vtk"]))
            .unwrap();

        assert_eq!(matches.get_one::<String>("prefix").unwrap(), "im");
        assert_eq!(*matches.get_one::<usize>("pages").unwrap(), 1);
        assert_eq!(*matches.get_one::<usize>("digits").unwrap(), READ_INDEX_WIDTH);
        assert_eq!(*matches.get_one::<usize>("out-digits").unwrap(), WRITE_INDEX_WIDTH);
        assert!(matches.get_one::<String>("save").is_none());
        assert!(matches.get_flag("tiff2vtk"));
    }

    #[test]
    fn test_combined_tool_requires_one_mode()
    {
        let command = create_cmd_args(Tool::Combined);

        let err = command
            .clone()
            .try_get_matches_from(["vtkstack"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = command
            .try_get_matches_from(legacy(&["vtkstack", "-tiff2vtk", "-vtk2tiffseq"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_strict_tool_requires_page_count()
    {
        let err = create_cmd_args(Tool::Tiff2Vtk)
            .try_get_matches_from(legacy(&["tiff2vtk", "-prefix", "im"]))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_strict_tool_default_output()
    {
        let matches = create_cmd_args(Tool::Tiff2Vtk)
            .try_get_matches_from(legacy(&["tiff2vtk", "-n", "12"]))
            .unwrap();

        assert_eq!(matches.get_one::<String>("save").unwrap(), DEFAULT_SAVE_NAME);
        assert_eq!(*matches.get_one::<usize>("pages").unwrap(), 12);
    }

    #[test]
    fn test_mmap_values()
    {
        let matches = create_cmd_args(Tool::Combined)
            .try_get_matches_from(["vtkstack", "--vtk2tiffseq", "--mmap", "always"])
            .unwrap();

        assert_eq!(
            *matches.get_one::<MmapOptions>("mmap").unwrap(),
            MmapOptions::Always
        );
    }
}
