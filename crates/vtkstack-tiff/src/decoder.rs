/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{Read, Seek};

use tiff::decoder::{Decoder, Limits};
use tiff::ColorType;
use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::log::{debug, trace};
use vtkstack_core::options::DecoderOptions;
use vtkstack_core::result::DecodingResult;

use crate::errors::TiffErrors;

/// A single decoded grayscale page
#[derive(Clone, Debug)]
pub struct TiffPage
{
    pub width:  usize,
    pub height: usize,
    pub pixels: DecodingResult
}

impl TiffPage
{
    pub const fn depth(&self) -> BitDepth
    {
        self.pixels.depth()
    }
}

/// A grayscale TIFF decoder that walks every page of a file
///
/// Each page is treated as one z slice of a volume, so single page
/// files produce one slice and multi-page files produce a stack.
pub struct TiffDecoder<R: Read + Seek>
{
    decoder:         Decoder<R>,
    options:         DecoderOptions,
    width:           usize,
    height:          usize,
    depth:           Option<BitDepth>,
    pages_read:      usize,
    decoded_headers: bool
}

impl<R: Read + Seek> TiffDecoder<R>
{
    /// Create a new decoder reading from `reader`
    ///
    /// This reads the TIFF file header, so it fails
    /// early on files that are not TIFF at all
    pub fn new(reader: R) -> Result<TiffDecoder<R>, TiffErrors>
    {
        Self::new_with_options(reader, DecoderOptions::default())
    }

    /// Create a new decoder with non default options as opposed to
    /// `new`
    pub fn new_with_options(
        reader: R, options: DecoderOptions
    ) -> Result<TiffDecoder<R>, TiffErrors>
    {
        // page size limits are enforced by us through `DecoderOptions`
        let decoder = Decoder::new(reader)?.with_limits(Limits::unlimited());

        Ok(TiffDecoder {
            decoder,
            options,
            width: 0,
            height: 0,
            depth: None,
            pages_read: 0,
            decoded_headers: false
        })
    }

    /// Decode the headers of the current page
    ///
    /// This checks that the page is a single channel 8 or 16 bit page
    /// whose dimensions are within the configured limits
    pub fn decode_headers(&mut self) -> Result<(), TiffErrors>
    {
        if self.decoded_headers
        {
            return Ok(());
        }
        let (width, height) = self.decoder.dimensions()?;
        let (width, height) = (width as usize, height as usize);

        if width > self.options.get_max_width()
        {
            return Err(TiffErrors::TooLargeDimensions(
                "width",
                width,
                self.options.get_max_width()
            ));
        }
        if height > self.options.get_max_height()
        {
            return Err(TiffErrors::TooLargeDimensions(
                "height",
                height,
                self.options.get_max_height()
            ));
        }

        let depth = match self.decoder.colortype()?
        {
            ColorType::Gray(bits) =>
            {
                BitDepth::from_bits(u16::from(bits)).ok_or(TiffErrors::UnsupportedDepth(bits))?
            }
            other => return Err(TiffErrors::UnsupportedColorType(format!("{other:?}")))
        };

        trace!("Page {} width: {}", self.pages_read, width);
        trace!("Page {} height: {}", self.pages_read, height);
        trace!("Page {} depth: {:?}", self.pages_read, depth);

        self.width = width;
        self.height = height;
        self.depth = Some(depth);
        self.decoded_headers = true;

        Ok(())
    }

    /// Decode the current page
    pub fn decode_page(&mut self) -> Result<TiffPage, TiffErrors>
    {
        self.decode_headers()?;

        let pixels = match self.decoder.read_image()?
        {
            tiff::decoder::DecodingResult::U8(data) => DecodingResult::U8(data),
            tiff::decoder::DecodingResult::U16(data) => DecodingResult::U16(data),
            _ => return Err(TiffErrors::Generic("Decoder returned samples of unexpected width"))
        };

        let expected = self.width * self.height;

        if pixels.len() != expected
        {
            return Err(TiffErrors::TooShortInput(expected, pixels.len()));
        }
        self.pages_read += 1;

        Ok(TiffPage {
            width: self.width,
            height: self.height,
            pixels
        })
    }

    /// Whether the file holds another page after the current one
    pub fn more_pages(&self) -> bool
    {
        self.decoder.more_images()
    }

    /// Move to the next page, returning false if there is none
    pub fn next_page(&mut self) -> Result<bool, TiffErrors>
    {
        if !self.decoder.more_images()
        {
            return Ok(false);
        }
        self.decoder.next_image()?;
        self.decoded_headers = false;

        Ok(true)
    }

    /// Decode every page from the current one to the end of the file
    ///
    /// The number of pages is bounded by the `max_depth` option.
    pub fn decode_pages(&mut self) -> Result<Vec<TiffPage>, TiffErrors>
    {
        let mut pages = vec![self.decode_page()?];

        while self.next_page()?
        {
            if pages.len() >= self.options.get_max_depth()
            {
                return Err(TiffErrors::TooLargeDimensions(
                    "page count",
                    pages.len() + 1,
                    self.options.get_max_depth()
                ));
            }
            pages.push(self.decode_page()?);
        }
        debug!("Decoded {} pages", pages.len());

        Ok(pages)
    }

    /// Return the width and height of the current page
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)>
    {
        if self.decoded_headers
        {
            return Some((self.width, self.height));
        }
        None
    }

    /// Return the bit depth of the current page
    ///
    /// Returns `None` if headers haven't been decoded
    pub const fn get_depth(&self) -> Option<BitDepth>
    {
        if self.decoded_headers
        {
            return self.depth;
        }
        None
    }

    /// Number of pages fully decoded so far
    pub const fn pages_read(&self) -> usize
    {
        self.pages_read
    }
}
