/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::log::trace;
use vtkstack_core::options::EncoderOptions;
use vtkstack_core::result::DecodingResult;

use crate::errors::VtkErrors;
use crate::header::{
    scalar_type_name, VtkEncoding, DEFAULT_SCALARS_NAME, DEFAULT_TITLE, MAX_TITLE_LEN,
    VTK_VERSION_LINE
};

/// A legacy VTK structured points encoder
///
/// Width, height and slices of the options map to `nx`, `ny` and `nz`.
pub struct VtkEncoder<'a>
{
    data:         &'a DecodingResult,
    options:      EncoderOptions,
    spacing:      [f64; 3],
    origin:       [f64; 3],
    title:        String
}

impl<'a> VtkEncoder<'a>
{
    pub fn new(data: &'a DecodingResult, options: EncoderOptions) -> VtkEncoder<'a>
    {
        VtkEncoder {
            data,
            options,
            spacing: [1.0; 3],
            origin: [0.0; 3],
            title: DEFAULT_TITLE.to_string()
        }
    }

    pub fn set_spacing(mut self, spacing: [f64; 3]) -> Self
    {
        self.spacing = spacing;
        self
    }

    pub fn set_origin(mut self, origin: [f64; 3]) -> Self
    {
        self.origin = origin;
        self
    }

    /// Set the title line
    ///
    /// The title must fit on one line, so line breaks become spaces and
    /// anything past 255 characters is dropped.
    pub fn set_title(mut self, title: &str) -> Self
    {
        self.title = title
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .take(MAX_TITLE_LEN - 1)
            .collect();
        self
    }

    fn encoding(&self) -> VtkEncoding
    {
        if self.options.vtk_encode_ascii()
        {
            VtkEncoding::Ascii
        }
        else
        {
            VtkEncoding::Binary
        }
    }

    fn check(&self) -> Result<(), VtkErrors>
    {
        let (nx, ny, nz) = (
            self.options.get_width(),
            self.options.get_height(),
            self.options.get_slices()
        );
        if nx == 0 || ny == 0 || nz == 0
        {
            return Err(VtkErrors::Generic("Volume dimensions cannot be zero"));
        }
        if self.data.depth() != self.options.get_depth()
        {
            return Err(VtkErrors::DepthMismatch(
                self.options.get_depth(),
                self.data.depth()
            ));
        }
        let expected = self
            .options
            .voxel_count()
            .ok_or(VtkErrors::TooLargeDimensions("voxel count", usize::MAX, usize::MAX))?;

        if expected != self.data.len()
        {
            return Err(VtkErrors::TooShortInput(expected, self.data.len()));
        }
        Ok(())
    }

    fn header_text(&self) -> String
    {
        let [sx, sy, sz] = self.spacing;
        let [ox, oy, oz] = self.origin;

        format!(
            "{VTK_VERSION_LINE}\n{}\n{}\nDATASET STRUCTURED_POINTS\nDIMENSIONS {} {} {}\n\
             SPACING {sx} {sy} {sz}\nORIGIN {ox} {oy} {oz}\nPOINT_DATA {}\n\
             SCALARS {} {} 1\nLOOKUP_TABLE default\n",
            self.title,
            self.encoding().keyword(),
            self.options.get_width(),
            self.options.get_height(),
            self.options.get_slices(),
            self.data.len(),
            DEFAULT_SCALARS_NAME,
            scalar_type_name(self.options.get_depth())
        )
    }

    /// Encode the volume into `sink`, returning the number of bytes written
    pub fn encode<W: Write>(&self, mut sink: W) -> Result<usize, VtkErrors>
    {
        self.check()?;

        let header = self.header_text();
        sink.write_all(header.as_bytes())?;

        let mut written = header.len();

        written += match self.encoding()
        {
            VtkEncoding::Binary => self.write_binary(&mut sink)?,
            VtkEncoding::Ascii => self.write_ascii(&mut sink)?
        };
        sink.write_all(b"\n")?;
        sink.flush()?;

        written += 1;
        trace!("Wrote {} bytes of VTK", written);

        Ok(written)
    }

    fn write_binary<W: Write>(&self, sink: &mut W) -> Result<usize, VtkErrors>
    {
        match self.data
        {
            DecodingResult::U8(data) =>
            {
                sink.write_all(data)?;
                Ok(data.len())
            }
            DecodingResult::U16(data) =>
            {
                let bytes: Vec<u8> = data.iter().flat_map(|x| x.to_be_bytes()).collect();
                sink.write_all(&bytes)?;
                Ok(bytes.len())
            }
        }
    }

    /// One grid row per line
    fn write_ascii<W: Write>(&self, sink: &mut W) -> Result<usize, VtkErrors>
    {
        let row = self.options.get_width();
        let mut text = String::new();

        match self.data
        {
            DecodingResult::U8(data) => push_rows(&mut text, data, row),
            DecodingResult::U16(data) => push_rows(&mut text, data, row)
        }
        sink.write_all(text.as_bytes())?;

        Ok(text.len())
    }

    pub const fn depth(&self) -> BitDepth
    {
        self.options.get_depth()
    }
}

fn push_rows<T: ToString>(text: &mut String, data: &[T], row: usize)
{
    for (i, chunk) in data.chunks(row).enumerate()
    {
        if i != 0
        {
            text.push('\n');
        }
        let values: Vec<String> = chunk.iter().map(ToString::to_string).collect();
        text.push_str(&values.join(" "));
    }
}
