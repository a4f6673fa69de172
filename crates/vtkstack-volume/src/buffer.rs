/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scalar storage of a volume
use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::result::DecodingResult;

use crate::errors::VolumeErrors;

/// The scalars of a volume, one variant per supported scalar type
///
/// Every voxel of a volume shares the variant, there is no per voxel
/// type mixing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VolumeBuffer
{
    U8(Vec<u8>),
    U16(Vec<u16>)
}

impl VolumeBuffer
{
    /// Create an empty buffer of `depth` able to hold `capacity`
    /// scalars without reallocating
    pub fn with_capacity(depth: BitDepth, capacity: usize) -> VolumeBuffer
    {
        match depth
        {
            BitDepth::Eight => VolumeBuffer::U8(Vec::with_capacity(capacity)),
            BitDepth::Sixteen => VolumeBuffer::U16(Vec::with_capacity(capacity))
        }
    }

    pub const fn depth(&self) -> BitDepth
    {
        match self
        {
            VolumeBuffer::U8(_) => BitDepth::Eight,
            VolumeBuffer::U16(_) => BitDepth::Sixteen
        }
    }

    pub fn len(&self) -> usize
    {
        match self
        {
            VolumeBuffer::U8(data) => data.len(),
            VolumeBuffer::U16(data) => data.len()
        }
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    pub fn as_u8(&self) -> Option<&[u8]>
    {
        match self
        {
            VolumeBuffer::U8(data) => Some(data),
            VolumeBuffer::U16(_) => None
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]>
    {
        match self
        {
            VolumeBuffer::U8(_) => None,
            VolumeBuffer::U16(data) => Some(data)
        }
    }

    /// Append a slice of scalars to the end of the buffer
    ///
    /// # Errors
    /// If `slice` is of a different depth than the buffer
    pub fn append(&mut self, slice: &DecodingResult) -> Result<(), VolumeErrors>
    {
        match (self, slice)
        {
            (VolumeBuffer::U8(data), DecodingResult::U8(extra)) => data.extend_from_slice(extra),
            (VolumeBuffer::U16(data), DecodingResult::U16(extra)) => data.extend_from_slice(extra),
            (buffer, slice) =>
            {
                return Err(VolumeErrors::GenericString(format!(
                    "Cannot append {:?} scalars to a {:?} buffer",
                    slice.depth(),
                    buffer.depth()
                )))
            }
        }
        Ok(())
    }

    /// Copy out scalars in `start..end`, or `None` if the range
    /// is out of bounds
    pub fn range(&self, start: usize, end: usize) -> Option<DecodingResult>
    {
        match self
        {
            VolumeBuffer::U8(data) => data.get(start..end).map(|x| DecodingResult::U8(x.to_vec())),
            VolumeBuffer::U16(data) => data.get(start..end).map(|x| DecodingResult::U16(x.to_vec()))
        }
    }
}

impl From<DecodingResult> for VolumeBuffer
{
    fn from(value: DecodingResult) -> Self
    {
        match value
        {
            DecodingResult::U8(data) => VolumeBuffer::U8(data),
            DecodingResult::U16(data) => VolumeBuffer::U16(data)
        }
    }
}

impl From<VolumeBuffer> for DecodingResult
{
    fn from(value: VolumeBuffer) -> Self
    {
        match value
        {
            VolumeBuffer::U8(data) => DecodingResult::U8(data),
            VolumeBuffer::U16(data) => DecodingResult::U16(data)
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_append_checks_depth()
    {
        let mut buffer = VolumeBuffer::with_capacity(BitDepth::Sixteen, 4);

        buffer.append(&DecodingResult::U16(vec![1, 2])).unwrap();
        buffer.append(&DecodingResult::U16(vec![3, 4])).unwrap();
        assert_eq!(buffer.as_u16(), Some(&[1, 2, 3, 4][..]));

        assert!(buffer.append(&DecodingResult::U8(vec![5])).is_err());
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_range()
    {
        let buffer = VolumeBuffer::U8(vec![0, 1, 2, 3, 4, 5]);

        assert_eq!(buffer.range(2, 4), Some(DecodingResult::U8(vec![2, 3])));
        assert_eq!(buffer.range(4, 7), None);
    }
}
