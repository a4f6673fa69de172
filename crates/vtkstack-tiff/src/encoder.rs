/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Encoding support for grayscale TIFF pages
use std::io::{Seek, Write};

use tiff::encoder::{colortype, TiffEncoder as RawTiffEncoder};
use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::options::EncoderOptions;
use vtkstack_core::result::DecodingResult;

use crate::errors::TiffErrors;

/// A grayscale TIFF encoder
///
/// Every call to [`encode_page`](TiffEncoder::encode_page) appends one
/// page to the file, so a single encoder can produce either a single page
/// file or a multi-page stack.
///
/// Width, height and depth come from the [`EncoderOptions`], the number of
/// slices in the options is ignored.
pub struct TiffEncoder<W: Write + Seek>
{
    encoder: RawTiffEncoder<W>,
    options: EncoderOptions,
    pages:   usize
}

impl<W: Write + Seek> TiffEncoder<W>
{
    pub fn new(sink: W, options: EncoderOptions) -> Result<TiffEncoder<W>, TiffErrors>
    {
        let width = options.get_width();
        let height = options.get_height();

        if width == 0 || height == 0
        {
            return Err(TiffErrors::Generic("Cannot encode pages with a zero dimension"));
        }
        if u32::try_from(width).is_err()
        {
            return Err(TiffErrors::TooLargeDimensions("width", width, u32::MAX as usize));
        }
        if u32::try_from(height).is_err()
        {
            return Err(TiffErrors::TooLargeDimensions("height", height, u32::MAX as usize));
        }
        Ok(TiffEncoder {
            encoder: RawTiffEncoder::new(sink)?,
            options,
            pages: 0
        })
    }

    /// Encode a single page of pixels
    ///
    /// The pixel type must match the depth configured in the options
    pub fn encode_page(&mut self, pixels: &DecodingResult) -> Result<(), TiffErrors>
    {
        let expected = self.options.get_width() * self.options.get_height();

        if pixels.len() != expected
        {
            return Err(TiffErrors::TooShortInput(expected, pixels.len()));
        }
        if pixels.depth() != self.options.get_depth()
        {
            return Err(TiffErrors::Generic(
                "Pixel depth does not match the depth configured for the encoder"
            ));
        }
        // checked on construction
        let width = self.options.get_width() as u32;
        let height = self.options.get_height() as u32;

        match pixels
        {
            DecodingResult::U8(data) =>
            {
                self.encoder
                    .write_image::<colortype::Gray8>(width, height, data)?;
            }
            DecodingResult::U16(data) =>
            {
                self.encoder
                    .write_image::<colortype::Gray16>(width, height, data)?;
            }
        }
        self.pages += 1;

        Ok(())
    }

    /// Number of pages written so far
    pub const fn pages_written(&self) -> usize
    {
        self.pages
    }

    pub const fn depth(&self) -> BitDepth
    {
        self.options.get_depth()
    }
}
