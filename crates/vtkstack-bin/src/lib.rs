/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Command line front ends
//!
//! Two executables share this crate, `vtkstack` converts in either
//! direction and `tiff2vtk` only converts TIFF stacks to VTK, insisting on
//! an explicit page count.
use std::process::exit;

use log::{error, warn};
use vtkstack_volume::errors::VolumeErrors;

use crate::cmd_args::Tool;
use crate::probe_files::probe_input_files;
use crate::workflow::create_and_exec_workflow_from_cmd;

mod cmd_args;
mod cmd_parsers;
mod probe_files;
mod serde;
mod workflow;

/// Printed when the input holds scalars we cannot convert
const UNSUPPORTED_MESSAGE: &str = "Bit Depth Not Supported.";

/// Entry point of the combined converter
pub fn main()
{
    run(Tool::Combined);
}

/// Entry point of the strict TIFF to VTK converter
pub fn tiff2vtk_main()
{
    run(Tool::Tiff2Vtk);
}

fn run(tool: Tool)
{
    let args = cmd_args::normalize_legacy_args(std::env::args_os());
    let options = cmd_args::create_cmd_args(tool).get_matches_from(args);

    cmd_parsers::global_options::setup_logger(&options);

    let parsed_opts = cmd_parsers::global_options::parse_options(&options);

    let result = cmd_parsers::parse_request(&options, tool).and_then(|request| {
        if parsed_opts.probe
        {
            probe_input_files(&request, &parsed_opts)
        }
        else
        {
            create_and_exec_workflow_from_cmd(&request, &parsed_opts)
        }
    });

    if let Err(err) = result
    {
        exit(report_error(&err));
    }
}

/// Log `err` and return the process exit code for it
///
/// Unsupported scalar types are not failures, the message is printed
/// and the run ends normally.
fn report_error(err: &VolumeErrors) -> i32
{
    if err.is_unsupported()
    {
        warn!("{:?}", err);
        println!("{UNSUPPORTED_MESSAGE}");
        return 0;
    }
    println!();
    error!(" Could not complete workflow, reason {:?}", err);
    println!();

    -1
}
