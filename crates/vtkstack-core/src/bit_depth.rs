/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Voxel bit depth, information and manipulations

/// The voxel bit depth.
///
/// Volumes are uniform, every voxel in a volume shares a single
/// depth, and only unsigned integer depths are understood.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BitDepth
{
    /// Eight bit depth.
    ///
    /// Volumes with such bit depth use [`u8`] to store
    /// voxels and use the whole range from 0-255.
    Eight,
    /// Sixteen bit depth
    ///
    /// Volumes with such bit depths use [`u16`] to store values and use the whole range
    /// i.e 0-65535
    ///
    /// Data is stored and processed in native endian.
    Sixteen
}

impl BitDepth
{
    /// Map a bits-per-sample count to a bit depth
    ///
    /// # Returns
    /// - `Some(depth)`: For 8 and 16 bits per sample
    /// - `None`: Any other sample width, which the library
    ///  cannot represent
    ///
    /// # Example
    /// ```
    /// use vtkstack_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::from_bits(16), Some(BitDepth::Sixteen));
    /// assert_eq!(BitDepth::from_bits(32), None);
    /// ```
    pub const fn from_bits(bits: u16) -> Option<BitDepth>
    {
        match bits
        {
            8 => Some(BitDepth::Eight),
            16 => Some(BitDepth::Sixteen),
            _ => None
        }
    }

    /// Number of bits used by a single voxel
    pub const fn bits(self) -> u16
    {
        match self
        {
            Self::Eight => 8,
            Self::Sixteen => 16
        }
    }

    /// Get the max value supported by the bit depth
    #[rustfmt::skip]
    #[allow(clippy::zero_prefixed_literal)]
    pub const fn max_value(self) -> u16
    {
        match self
        {
            Self::Eight => (1 << 08) - 1,
            Self::Sixteen => u16::MAX
        }
    }

    /// Get the number of bytes needed to store a single voxel
    ///
    /// ```
    /// use vtkstack_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::Sixteen.size_of(), 2);
    /// ```
    pub const fn size_of(self) -> usize
    {
        match self
        {
            Self::Eight => 1,
            Self::Sixteen => 2
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::BitDepth;

    #[test]
    fn test_bits_round_trip()
    {
        for depth in [BitDepth::Eight, BitDepth::Sixteen]
        {
            assert_eq!(BitDepth::from_bits(depth.bits()), Some(depth));
        }
    }

    #[test]
    fn test_unknown_bits_rejected()
    {
        for bits in [0, 1, 4, 12, 24, 32, 64]
        {
            assert_eq!(BitDepth::from_bits(bits), None);
        }
    }

    #[test]
    fn test_max_values()
    {
        assert_eq!(BitDepth::Eight.max_value(), 255);
        assert_eq!(BitDepth::Sixteen.max_value(), 65535);
    }
}
