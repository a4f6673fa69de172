/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors possible when reading or writing TIFF pages
pub enum TiffErrors
{
    /// Error reported by the underlying TIFF codec
    TiffError(tiff::TiffError),
    /// File could not be opened, read or written
    IoError(std::io::Error),
    /// Pages have a sample width that is neither 8 nor 16 bits
    UnsupportedDepth(u8),
    /// Pages are not single channel grayscale
    UnsupportedColorType(String),
    /// Page dimensions are above the configured limits.
    /// Contains the name of the dimension, its value and the limit
    TooLargeDimensions(&'static str, usize, usize),
    /// Input buffer length does not match the page dimensions,
    /// contains expected and found lengths
    TooShortInput(usize, usize),
    /// More pages requested than the index width can address,
    /// contains the requested count and the index width
    TooManyPages(usize, usize),
    /// A generated file name is longer than the file system allows,
    /// contains the file name and its length in bytes
    FileNameTooLong(String, usize),
    Generic(&'static str)
}

impl Debug for TiffErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            TiffErrors::TiffError(err) => writeln!(f, "TIFF error: {err}"),
            TiffErrors::IoError(err) => writeln!(f, "I/O error: {err}"),
            TiffErrors::UnsupportedDepth(bits) =>
            {
                writeln!(f, "Unsupported bit depth {bits}, only 8 and 16 bit pages are supported")
            }
            TiffErrors::UnsupportedColorType(color) =>
            {
                writeln!(
                    f,
                    "Unsupported color type {color}, only single channel grayscale pages are supported"
                )
            }
            TiffErrors::TooLargeDimensions(name, value, limit) =>
            {
                writeln!(f, "Too large {name} {value}, the configured limit is {limit}")
            }
            TiffErrors::TooShortInput(expected, found) =>
            {
                writeln!(f, "Too short of input, expected {expected}, found {found}")
            }
            TiffErrors::TooManyPages(count, digits) =>
            {
                writeln!(
                    f,
                    "Cannot address {count} pages with a {digits} digit index, widen the index"
                )
            }
            TiffErrors::FileNameTooLong(name, len) =>
            {
                writeln!(f, "File name {name:?} is {len} bytes long, above the allowed maximum")
            }
            TiffErrors::Generic(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for TiffErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for TiffErrors {}

impl TiffErrors
{
    /// Whether this error is an unsupported page type rather
    /// than a broken or missing file
    pub const fn is_unsupported(&self) -> bool
    {
        matches!(
            self,
            TiffErrors::UnsupportedDepth(_) | TiffErrors::UnsupportedColorType(_)
        )
    }
}

impl From<tiff::TiffError> for TiffErrors
{
    fn from(value: tiff::TiffError) -> Self
    {
        TiffErrors::TiffError(value)
    }
}

impl From<std::io::Error> for TiffErrors
{
    fn from(value: std::io::Error) -> Self
    {
        TiffErrors::IoError(value)
    }
}

impl From<&'static str> for TiffErrors
{
    fn from(value: &'static str) -> Self
    {
        TiffErrors::Generic(value)
    }
}
