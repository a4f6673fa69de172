/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub static PREFIX_HELP: &str = "Stem shared by the input and output file names.

In sequence mode slices are read from {prefix}00.tif, {prefix}01.tif...
otherwise the multi-page file {prefix}.tif is read.
The vtk2tiffseq mode reads {prefix}.vtk";

pub static PAGES_HELP: &str = "Number of TIFF files making up the stack.

A count above one reads a numbered sequence of single page files,
a count of one (or zero) reads every page of the multi-page file {prefix}.tif";

pub static TIFF2VTK_HELP: &str = "Convert a TIFF stack to a binary VTK structured points file.

16 bit stacks are stretched from their intensity range to 0-255 before
writing, 8 bit stacks are written unchanged.";

pub static VTK2TIFFSEQ_HELP: &str = "Convert a VTK structured points file to a TIFF sequence.

Every z slice of {prefix}.vtk is written to its own file,
{save}0000.tif, {save}0001.tif..., or {prefix}0000.tif... without --save";

pub static DIGITS_HELP: &str = "Width of the zero padded index of input sequence files.

Two digits can name at most 100 files, widen this for longer sequences.
Output sequences are padded separately, see --out-digits";

pub static PROBE_HELP: &str = "Print volume metadata as JSON and exit.

Only headers are read, nothing is converted or written.";
