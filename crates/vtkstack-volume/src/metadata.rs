/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Volume metadata
//!
//! This module provides the ability to store volume metadata and transfer it
//! from one volume to another
use vtkstack_core::bit_depth::BitDepth;

use crate::codecs::VolumeFormat;

/// Volume metadata
///
/// Decoders fill this in, operations carry it over and
/// encoders read geometry from it
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeMetadata
{
    // REMEMBER: If you add a field here add it's serialization
    // to serde.rs
    pub(crate) width:        usize,
    pub(crate) height:       usize,
    pub(crate) slices:       usize,
    pub(crate) depth:        BitDepth,
    pub(crate) spacing:      [f64; 3],
    pub(crate) origin:       [f64; 3],
    pub(crate) format:       Option<VolumeFormat>,
    pub(crate) source_pages: usize
}

impl Default for VolumeMetadata
{
    fn default() -> Self
    {
        VolumeMetadata {
            width:        0,
            height:       0,
            slices:       0,
            depth:        BitDepth::Eight,
            spacing:      [1.0; 3],
            origin:       [0.0; 3],
            format:       None,
            source_pages: 0
        }
    }
}

impl VolumeMetadata
{
    /// Get volume dimensions as a tuple of width, height and slices
    ///
    /// # Example
    ///
    /// ```rust
    /// use vtkstack_volume::metadata::VolumeMetadata;
    /// let meta = VolumeMetadata::default();
    /// // default dimensions are zero
    /// assert_eq!(meta.dimensions(), (0, 0, 0));
    /// ```
    pub const fn dimensions(&self) -> (usize, usize, usize)
    {
        (self.width, self.height, self.slices)
    }

    pub fn set_dimensions(&mut self, width: usize, height: usize, slices: usize)
    {
        self.width = width;
        self.height = height;
        self.slices = slices;
    }

    pub const fn depth(&self) -> BitDepth
    {
        self.depth
    }

    pub fn set_depth(&mut self, depth: BitDepth)
    {
        self.depth = depth;
    }

    /// Voxel size along x, y and z
    ///
    /// Defaults to `[1.0, 1.0, 1.0]` when the source format does not carry it
    pub const fn spacing(&self) -> [f64; 3]
    {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: [f64; 3])
    {
        self.spacing = spacing;
    }

    pub const fn origin(&self) -> [f64; 3]
    {
        self.origin
    }

    pub fn set_origin(&mut self, origin: [f64; 3])
    {
        self.origin = origin;
    }

    /// Format the volume was decoded from, `None` for
    /// volumes built in memory
    pub const fn format(&self) -> Option<VolumeFormat>
    {
        self.format
    }

    pub fn set_format(&mut self, format: VolumeFormat)
    {
        self.format = Some(format);
    }

    /// Number of TIFF pages or files the volume was assembled from
    pub const fn source_pages(&self) -> usize
    {
        self.source_pages
    }

    pub fn set_source_pages(&mut self, pages: usize)
    {
        self.source_pages = pages;
    }
}
