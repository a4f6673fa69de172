/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use vtkstack_core::bit_depth::BitDepth;

use crate::errors::VtkErrors;

/// Every legacy VTK file starts with this
pub const VTK_MAGIC: &str = "# vtk DataFile";

/// First line written by the encoder
pub const VTK_VERSION_LINE: &str = "# vtk DataFile Version 3.0";

/// Title written when none is configured
pub const DEFAULT_TITLE: &str = "vtk output";

/// Name of the scalar array written when none is configured
pub const DEFAULT_SCALARS_NAME: &str = "scalars";

/// Longest title the format allows
pub const MAX_TITLE_LEN: usize = 256;

/// Encoding of the scalar payload
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VtkEncoding
{
    Ascii,
    Binary
}

impl VtkEncoding
{
    pub const fn keyword(self) -> &'static str
    {
        match self
        {
            VtkEncoding::Ascii => "ASCII",
            VtkEncoding::Binary => "BINARY"
        }
    }
}

/// Everything a structured points file says about its volume
#[derive(Clone, Debug, PartialEq)]
pub struct VtkHeader
{
    pub title:        String,
    pub encoding:     VtkEncoding,
    /// Grid size as `[nx, ny, nz]`
    pub dimensions:   [usize; 3],
    pub spacing:      [f64; 3],
    pub origin:       [f64; 3],
    pub depth:        BitDepth,
    pub scalars_name: String
}

impl Default for VtkHeader
{
    fn default() -> Self
    {
        VtkHeader {
            title:        DEFAULT_TITLE.to_string(),
            encoding:     VtkEncoding::Binary,
            dimensions:   [0; 3],
            spacing:      [1.0; 3],
            origin:       [0.0; 3],
            depth:        BitDepth::Eight,
            scalars_name: DEFAULT_SCALARS_NAME.to_string()
        }
    }
}

impl VtkHeader
{
    /// Number of voxels in the grid, `None` on overflow
    pub fn voxel_count(&self) -> Option<usize>
    {
        let [nx, ny, nz] = self.dimensions;

        nx.checked_mul(ny)?.checked_mul(nz)
    }
}

/// Name VTK uses for the scalar type of a bit depth
pub const fn scalar_type_name(depth: BitDepth) -> &'static str
{
    match depth
    {
        BitDepth::Eight => "unsigned_char",
        BitDepth::Sixteen => "unsigned_short"
    }
}

/// Map a VTK scalar type name to a bit depth
pub fn depth_from_scalar_type(name: &str) -> Result<BitDepth, VtkErrors>
{
    match name.to_ascii_lowercase().as_str()
    {
        "unsigned_char" => Ok(BitDepth::Eight),
        "unsigned_short" => Ok(BitDepth::Sixteen),
        _ => Err(VtkErrors::UnsupportedScalarType(name.to_string()))
    }
}
