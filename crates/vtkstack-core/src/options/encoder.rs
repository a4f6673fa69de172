/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use bitflags::bitflags;

use crate::bit_depth::BitDepth;

bitflags! {
    /// Encoder options that are flags
    #[derive(Copy, Debug, Clone, PartialEq, Eq)]
    struct EncoderFlags: u32 {
        /// Whether VTK files should be written as ASCII text
        /// instead of big endian binary
        const VTK_ENCODE_ASCII = 0b0000_0001;
    }
}

impl Default for EncoderFlags
{
    fn default() -> Self
    {
        EncoderFlags::empty()
    }
}

/// Options shared by the encoders in
/// the `vtkstack-` family of crates
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions
{
    width:  usize,
    height: usize,
    slices: usize,
    depth:  BitDepth,
    flags:  EncoderFlags
}

impl Default for EncoderOptions
{
    fn default() -> Self
    {
        Self {
            width:  0,
            height: 0,
            slices: 1,
            depth:  BitDepth::Eight,
            flags:  EncoderFlags::default()
        }
    }
}

impl EncoderOptions
{
    /// Get the width for which the volume will be encoded in
    pub const fn get_width(&self) -> usize
    {
        self.width
    }

    /// Get height for which the volume will be encoded in
    pub const fn get_height(&self) -> usize
    {
        self.height
    }

    /// Get number of slices (z extent) the volume will be encoded with
    pub const fn get_slices(&self) -> usize
    {
        self.slices
    }

    /// Get the depth for which the volume will be encoded in
    pub const fn get_depth(&self) -> BitDepth
    {
        self.depth
    }

    /// Whether VTK output is ASCII instead of binary
    pub const fn vtk_encode_ascii(&self) -> bool
    {
        self.flags.contains(EncoderFlags::VTK_ENCODE_ASCII)
    }

    /// Number of voxels described by these options
    ///
    /// Returns `None` if the product overflows
    pub fn voxel_count(&self) -> Option<usize>
    {
        self.width
            .checked_mul(self.height)?
            .checked_mul(self.slices)
    }

    /// Set width for the volume to be encoded
    pub fn set_width(mut self, width: usize) -> Self
    {
        self.width = width;
        self
    }

    /// Set height for the volume to be encoded
    pub fn set_height(mut self, height: usize) -> Self
    {
        self.height = height;
        self
    }

    /// Set the number of slices for the volume to be encoded
    pub fn set_slices(mut self, slices: usize) -> Self
    {
        self.slices = slices;
        self
    }

    /// Set depth for the volume to be encoded
    pub fn set_depth(mut self, depth: BitDepth) -> Self
    {
        self.depth = depth;
        self
    }

    /// Write VTK files as ASCII text
    pub fn set_vtk_encode_ascii(mut self, yes: bool) -> Self
    {
        self.flags.set(EncoderFlags::VTK_ENCODE_ASCII, yes);
        self
    }
}
