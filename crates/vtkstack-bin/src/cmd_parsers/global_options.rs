/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::parser::ValueSource;
use clap::parser::ValueSource::CommandLine;
use clap::ArgMatches;
use log::{info, Level};
use vtkstack_volume::file_io::MMAP_THRESHOLD;

use crate::cmd_args::MmapOptions;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions
{
    pub mmap:           MmapOptions,
    pub max_width:      usize,
    pub max_height:     usize,
    pub max_depth:      usize,
    pub strict_mode:    bool,
    pub override_files: bool,
    pub probe:          bool
}

impl CmdOptions
{
    pub fn new() -> CmdOptions
    {
        CmdOptions {
            mmap:           MmapOptions::Auto,
            max_width:      1 << 16,
            max_height:     1 << 16,
            max_depth:      1 << 16,
            strict_mode:    false,
            override_files: false,
            probe:          false
        }
    }

    /// Whether inputs may be memory mapped at all
    pub fn use_mmap(&self) -> bool
    {
        self.mmap != MmapOptions::No
    }

    /// Smallest file size that gets memory mapped
    pub fn mmap_threshold(&self) -> u64
    {
        match self.mmap
        {
            MmapOptions::Always => 1,
            MmapOptions::Auto | MmapOptions::No => MMAP_THRESHOLD
        }
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions
{
    let mut cmd_options = CmdOptions::new();

    if let Some(mmap_opt) = options.value_source("mmap")
    {
        if mmap_opt == CommandLine
        {
            if let Some(mmap) = options.get_one::<MmapOptions>("mmap")
            {
                info!("Setting mmap to be {:?}", mmap);
                cmd_options.mmap = *mmap;
            }
        }
    }
    if let Some(width) = options.get_one::<usize>("max-width")
    {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height")
    {
        cmd_options.max_height = *height;
    }
    if let Some(depth) = options.get_one::<usize>("max-depth")
    {
        cmd_options.max_depth = *depth;
    }

    if options.value_source("all-yes") == Some(ValueSource::CommandLine)
    {
        info!("Setting all commands to yes");
        cmd_options.override_files = true;
    }
    if options.value_source("strict") == Some(ValueSource::CommandLine)
    {
        info!("Enabling strict mode");
        cmd_options.strict_mode = true;
    }
    cmd_options.probe = options.get_flag("probe");

    cmd_options
}

/// Pick the log level from the logging flags, `Info` when none is given
pub fn log_level(options: &ArgMatches) -> Level
{
    if options.get_flag("debug")
    {
        Level::Debug
    }
    else if options.get_flag("trace")
    {
        Level::Trace
    }
    else if options.get_flag("warn")
    {
        Level::Warn
    }
    else
    {
        Level::Info
    }
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches)
{
    let log_level = log_level(options);

    if let Err(err) = simple_logger::init_with_level(log_level)
    {
        eprintln!("Could not set up logging: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
