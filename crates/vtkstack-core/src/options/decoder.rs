/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options
use bitflags::bitflags;

bitflags! {
    /// Decoder options that are flags
    #[derive(Copy, Debug, Clone, PartialEq, Eq)]
    pub struct DecoderFlags: u32 {
        /// Error out when a file in a numbered sequence holds
        /// more than one page instead of using the first page.
        const TIFF_STRICT_PAGES = 0b0000_0001;
        /// Accept ASCII encoded VTK files in addition to binary ones.
        const VTK_ALLOW_ASCII   = 0b0000_0010;
        /// Memory map input files instead of reading them to memory.
        const USE_MMAP          = 0b0000_0100;
    }
}

impl Default for DecoderFlags
{
    fn default() -> Self
    {
        DecoderFlags::VTK_ALLOW_ASCII
    }
}

/// Decoder options
///
/// Not all options are respected by all decoders
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions
{
    /// Maximum width for which decoders will
    /// not try to decode slices larger than
    /// the specified width.
    ///
    /// - Default value: 1 << 16
    /// - Respected by: `all decoders`
    max_width:  usize,
    /// Maximum height for which decoders will not
    /// try to decode slices larger than the
    /// specified height
    ///
    /// - Default value: 1 << 16
    /// - Respected by: `all decoders`
    max_height: usize,
    /// Maximum number of slices a volume may have
    ///
    /// - Default value: 1 << 16
    /// - Respected by: `all decoders`
    max_depth:  usize,
    /// Boolean flags that influence decoding
    flags:      DecoderFlags
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        Self {
            max_width:  1 << 16,
            max_height: 1 << 16,
            max_depth:  1 << 16,
            flags:      DecoderFlags::default()
        }
    }
}

/// Initializers
impl DecoderOptions
{
    /// Create options suitable for command line usage
    ///
    /// Same as default but inputs are memory mapped
    pub fn new_cmd() -> DecoderOptions
    {
        DecoderOptions::default().set_use_mmap(true)
    }

    /// Get maximum width configured for which the decoder
    /// should not try to decode slices greater than this width
    pub const fn get_max_width(&self) -> usize
    {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode slices greater than this height
    pub const fn get_max_height(&self) -> usize
    {
        self.max_height
    }

    /// Get maximum number of slices the decoder will
    /// stack into a single volume
    pub const fn get_max_depth(&self) -> usize
    {
        self.max_depth
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject files with more pages than expected
    pub const fn get_strict_mode(&self) -> bool
    {
        self.flags.contains(DecoderFlags::TIFF_STRICT_PAGES)
    }

    /// Whether the VTK decoder accepts ASCII files
    pub const fn vtk_allow_ascii(&self) -> bool
    {
        self.flags.contains(DecoderFlags::VTK_ALLOW_ASCII)
    }

    /// Whether inputs should be memory mapped
    pub const fn get_use_mmap(&self) -> bool
    {
        self.flags.contains(DecoderFlags::USE_MMAP)
    }

    /// Set maximum width for which the decoder should not try
    /// decoding slices greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding slices greater than that height
    pub fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }

    /// Set maximum number of slices for a single volume
    pub fn set_max_depth(mut self, depth: usize) -> Self
    {
        self.max_depth = depth;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// In strict mode a sequence file holding more than one page is an
    /// error, otherwise only the first page is used and a warning is logged
    pub fn set_strict_mode(mut self, yes: bool) -> Self
    {
        self.flags.set(DecoderFlags::TIFF_STRICT_PAGES, yes);
        self
    }

    /// Set whether the VTK decoder may accept ASCII encoded files
    pub fn set_vtk_allow_ascii(mut self, yes: bool) -> Self
    {
        self.flags.set(DecoderFlags::VTK_ALLOW_ASCII, yes);
        self
    }

    /// Set whether input files are memory mapped
    pub fn set_use_mmap(mut self, yes: bool) -> Self
    {
        self.flags.set(DecoderFlags::USE_MMAP, yes);
        self
    }

    /// Set decoder flags directly
    pub fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self
    {
        self.flags = flags;
        self
    }
}
