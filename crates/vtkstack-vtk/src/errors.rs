/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use vtkstack_core::bit_depth::BitDepth;

/// Errors possible when decoding or encoding VTK files
pub enum VtkErrors
{
    /// The file does not start with `# vtk DataFile`
    InvalidMagic,
    /// A header line could not be understood, contains the
    /// line number and a description
    MalformedHeader(usize, String),
    /// The dataset is not `STRUCTURED_POINTS`
    UnsupportedDataset(String),
    /// Scalars are of a type other than `unsigned_char` or `unsigned_short`
    UnsupportedScalarType(String),
    /// Scalars have more than one component
    UnsupportedComponents(usize),
    /// ASCII payload found but the options disallow it
    AsciiNotAllowed,
    /// `POINT_DATA` disagrees with `DIMENSIONS`, contains expected and found
    PointCountMismatch(usize, usize),
    /// Dimensions are above the configured limits or overflow
    TooLargeDimensions(&'static str, usize, usize),
    /// An ASCII scalar could not be parsed for the declared type
    InvalidScalar(String),
    /// The payload ended early, contains expected and found
    /// number of scalars
    IncompleteData(usize, usize),
    /// Encoder data does not match its options, contains expected and
    /// found lengths
    TooShortInput(usize, usize),
    /// The encoder was given data of a different depth than configured
    DepthMismatch(BitDepth, BitDepth),
    IoError(std::io::Error),
    Generic(&'static str)
}

impl Debug for VtkErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            VtkErrors::InvalidMagic => writeln!(f, "VTK magic line `# vtk DataFile` not found"),
            VtkErrors::MalformedHeader(line, reason) =>
            {
                writeln!(f, "Malformed VTK header at line {line}: {reason}")
            }
            VtkErrors::UnsupportedDataset(dataset) =>
            {
                writeln!(f, "Unsupported dataset {dataset}, only STRUCTURED_POINTS is supported")
            }
            VtkErrors::UnsupportedScalarType(kind) =>
            {
                writeln!(
                    f,
                    "Unsupported scalar type {kind}, only unsigned_char and unsigned_short are supported"
                )
            }
            VtkErrors::UnsupportedComponents(components) =>
            {
                writeln!(f, "Unsupported number of scalar components {components}, expected 1")
            }
            VtkErrors::AsciiNotAllowed => writeln!(f, "ASCII VTK files are disabled"),
            VtkErrors::PointCountMismatch(expected, found) =>
            {
                writeln!(f, "POINT_DATA mismatch, expected {expected} but found {found}")
            }
            VtkErrors::TooLargeDimensions(name, value, limit) =>
            {
                writeln!(f, "Too large {name} {value}, the configured limit is {limit}")
            }
            VtkErrors::InvalidScalar(token) =>
            {
                writeln!(f, "Invalid scalar value {token:?} in ASCII payload")
            }
            VtkErrors::IncompleteData(expected, found) =>
            {
                writeln!(f, "Incomplete data, expected {expected} scalars but found {found}")
            }
            VtkErrors::TooShortInput(expected, found) =>
            {
                writeln!(f, "Too short of input, expected {expected}, found {found}")
            }
            VtkErrors::DepthMismatch(expected, found) =>
            {
                writeln!(f, "Expected {expected:?} data but found {found:?}")
            }
            VtkErrors::IoError(err) => writeln!(f, "I/O error: {err}"),
            VtkErrors::Generic(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for VtkErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for VtkErrors {}

impl VtkErrors
{
    /// Whether this error is an unsupported scalar type rather
    /// than a broken file
    pub const fn is_unsupported(&self) -> bool
    {
        matches!(
            self,
            VtkErrors::UnsupportedScalarType(_) | VtkErrors::UnsupportedComponents(_)
        )
    }
}

impl From<std::io::Error> for VtkErrors
{
    fn from(value: std::io::Error) -> Self
    {
        VtkErrors::IoError(value)
    }
}

impl From<&'static str> for VtkErrors
{
    fn from(value: &'static str) -> Self
    {
        VtkErrors::Generic(value)
    }
}
