/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during volume loading, processing and writing
use std::fmt::{Debug, Display, Formatter};

use vtkstack_core::bit_depth::BitDepth;
use vtkstack_tiff::TiffErrors;
use vtkstack_vtk::VtkErrors;

/// All possible volume errors that can occur.
///
/// This is the grandfather of volume errors and contains
/// all decoding, processing and encoding errors possible
pub enum VolumeErrors
{
    TiffErrors(TiffErrors),
    VtkErrors(VtkErrors),
    IoErrors(std::io::Error),
    /// Scalars are neither 8 nor 16 bit, contains the bit count
    UnsupportedDepth(u16),
    /// Input is not single channel grayscale
    UnsupportedColorType(String),
    /// An operation or encoder cannot handle this depth.
    ///
    /// Contains the depth found, the name of the operation and
    /// the depths it supports
    UnsupportedDepthForOperation(BitDepth, &'static str, &'static [BitDepth]),
    /// A slice differs from the first one, contains the slice index, the
    /// expected `(width, height, depth)` and the one found
    SliceMismatch(usize, (usize, usize, BitDepth), (usize, usize, BitDepth)),
    /// Buffer length does not match dimensions, contains expected and found
    DimensionsMisMatch(usize, usize),
    /// A sequence is longer than its index width allows, contains
    /// the page count and the index width
    TooManyPages(usize, usize),
    /// A generated file name is too long, contains the name and its length
    FileNameTooLong(String, usize),
    NoVolumeForOperations,
    NoVolumeForEncoding,
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for VolumeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self
        {
            Self::TiffErrors(ref error) => writeln!(f, "TIFF error: {error:?}"),
            Self::VtkErrors(ref error) => writeln!(f, "VTK error: {error:?}"),
            Self::IoErrors(ref error) => writeln!(f, "I/O error: {error}"),
            Self::UnsupportedDepth(bits) =>
            {
                writeln!(f, "Unsupported bit depth {bits}, only 8 and 16 bit scalars are supported")
            }
            Self::UnsupportedColorType(color) =>
            {
                writeln!(f, "Unsupported color type {color}, only grayscale is supported")
            }
            Self::UnsupportedDepthForOperation(present, operation, supported) =>
            {
                writeln!(
                    f,
                    "Unsupported depth {present:?} for the operation {operation}\nSupported depths are {supported:?}"
                )
            }
            Self::SliceMismatch(index, expected, found) =>
            {
                writeln!(
                    f,
                    "Slice {index} is {}x{} {:?} but the first slice is {}x{} {:?}",
                    found.0, found.1, found.2, expected.0, expected.1, expected.2
                )
            }
            Self::DimensionsMisMatch(expected, found) =>
            {
                writeln!(f, "Dimensions mismatch, expected {expected} but found {found}")
            }
            Self::TooManyPages(count, digits) =>
            {
                writeln!(
                    f,
                    "Cannot address {count} pages with a {digits} digit index, widen the index"
                )
            }
            Self::FileNameTooLong(name, len) =>
            {
                writeln!(f, "File name {name:?} is {len} bytes long, above the allowed maximum")
            }
            Self::NoVolumeForOperations =>
            {
                writeln!(f, "No volume found for which we can execute operations")
            }
            Self::NoVolumeForEncoding => writeln!(f, "No volume found for which we can encode"),
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::GenericStr(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for VolumeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for VolumeErrors {}

impl VolumeErrors
{
    /// Whether the input uses a scalar type we do not handle.
    ///
    /// Such errors are reported but are not failures of the run
    pub fn is_unsupported(&self) -> bool
    {
        match self
        {
            Self::UnsupportedDepth(_) | Self::UnsupportedColorType(_) => true,
            Self::TiffErrors(error) => error.is_unsupported(),
            Self::VtkErrors(error) => error.is_unsupported(),
            _ => false
        }
    }
}

impl From<TiffErrors> for VolumeErrors
{
    fn from(from: TiffErrors) -> Self
    {
        match from
        {
            TiffErrors::UnsupportedDepth(bits) => VolumeErrors::UnsupportedDepth(u16::from(bits)),
            TiffErrors::UnsupportedColorType(color) => VolumeErrors::UnsupportedColorType(color),
            TiffErrors::TooManyPages(count, digits) => VolumeErrors::TooManyPages(count, digits),
            TiffErrors::FileNameTooLong(name, len) => VolumeErrors::FileNameTooLong(name, len),
            TiffErrors::IoError(error) => VolumeErrors::IoErrors(error),
            other => VolumeErrors::TiffErrors(other)
        }
    }
}

impl From<VtkErrors> for VolumeErrors
{
    fn from(from: VtkErrors) -> Self
    {
        match from
        {
            VtkErrors::IoError(error) => VolumeErrors::IoErrors(error),
            other => VolumeErrors::VtkErrors(other)
        }
    }
}

impl From<std::io::Error> for VolumeErrors
{
    fn from(from: std::io::Error) -> Self
    {
        VolumeErrors::IoErrors(from)
    }
}

impl From<String> for VolumeErrors
{
    fn from(from: String) -> Self
    {
        VolumeErrors::GenericString(from)
    }
}

impl From<&'static str> for VolumeErrors
{
    fn from(from: &'static str) -> Self
    {
        VolumeErrors::GenericStr(from)
    }
}
