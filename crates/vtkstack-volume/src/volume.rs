/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The main volume type
use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::result::DecodingResult;

use crate::buffer::VolumeBuffer;
use crate::errors::VolumeErrors;
use crate::metadata::VolumeMetadata;

/// A dense three dimensional grid of scalars
///
/// Scalars are stored x fastest, then y, then z. The buffer always
/// holds exactly `width * height * slices` scalars.
#[derive(Clone, Debug)]
pub struct Volume
{
    buffer:   VolumeBuffer,
    metadata: VolumeMetadata
}

/// Number of scalars in a `width * height * slices` grid
pub(crate) fn voxel_count(
    width: usize, height: usize, slices: usize
) -> Result<usize, VolumeErrors>
{
    if width == 0 || height == 0 || slices == 0
    {
        return Err(VolumeErrors::GenericString(format!(
            "Volume dimensions must be positive, found {width}x{height}x{slices}"
        )));
    }
    width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(slices))
        .ok_or(VolumeErrors::GenericStr("Volume dimensions overflow"))
}

impl Volume
{
    /// Create a new volume from scalars and dimensions
    ///
    /// # Errors
    /// If a dimension is zero or the buffer does not hold
    /// `width * height * slices` scalars
    pub fn new(
        buffer: VolumeBuffer, width: usize, height: usize, slices: usize
    ) -> Result<Volume, VolumeErrors>
    {
        let expected = voxel_count(width, height, slices)?;

        if buffer.len() != expected
        {
            return Err(VolumeErrors::DimensionsMisMatch(expected, buffer.len()));
        }
        let mut metadata = VolumeMetadata::default();

        metadata.set_dimensions(width, height, slices);
        metadata.set_depth(buffer.depth());

        Ok(Volume { buffer, metadata })
    }

    /// Stack 2D slices of `width * height` scalars along z, in order
    pub fn from_slices(
        slices: &[DecodingResult], width: usize, height: usize
    ) -> Result<Volume, VolumeErrors>
    {
        let first = slices
            .first()
            .ok_or(VolumeErrors::GenericStr("Cannot build a volume from zero slices"))?;

        let expected = (width, height, first.depth());
        let per_slice = voxel_count(width, height, 1)?;

        let mut buffer = VolumeBuffer::with_capacity(first.depth(), per_slice * slices.len());

        for (index, slice) in slices.iter().enumerate()
        {
            if slice.depth() != first.depth() || slice.len() != per_slice
            {
                // a slice whose length is off is reported with the width it would need
                let found_width = slice.len() / height;
                return Err(VolumeErrors::SliceMismatch(
                    index,
                    expected,
                    (found_width, height, slice.depth())
                ));
            }
            buffer.append(slice)?;
        }
        Volume::new(buffer, width, height, slices.len())
    }

    /// Return `(width, height, slices)`, i.e `(nx, ny, nz)`
    pub const fn dimensions(&self) -> (usize, usize, usize)
    {
        self.metadata.dimensions()
    }

    pub const fn depth(&self) -> BitDepth
    {
        self.buffer.depth()
    }

    pub fn voxel_count(&self) -> usize
    {
        self.buffer.len()
    }

    pub const fn spacing(&self) -> [f64; 3]
    {
        self.metadata.spacing()
    }

    pub fn set_spacing(&mut self, spacing: [f64; 3])
    {
        self.metadata.set_spacing(spacing);
    }

    pub const fn origin(&self) -> [f64; 3]
    {
        self.metadata.origin()
    }

    pub fn set_origin(&mut self, origin: [f64; 3])
    {
        self.metadata.set_origin(origin);
    }

    pub const fn buffer(&self) -> &VolumeBuffer
    {
        &self.buffer
    }

    pub fn into_buffer(self) -> VolumeBuffer
    {
        self.buffer
    }

    pub const fn metadata(&self) -> &VolumeMetadata
    {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut VolumeMetadata
    {
        &mut self.metadata
    }

    /// Replace the scalars keeping dimensions and geometry
    ///
    /// # Errors
    /// If the new buffer has a different length
    pub fn set_buffer(&mut self, buffer: VolumeBuffer) -> Result<(), VolumeErrors>
    {
        if buffer.len() != self.buffer.len()
        {
            return Err(VolumeErrors::DimensionsMisMatch(self.buffer.len(), buffer.len()));
        }
        self.metadata.set_depth(buffer.depth());
        self.buffer = buffer;

        Ok(())
    }

    /// Copy out z slice `index` or `None` if out of bounds
    pub fn slice(&self, index: usize) -> Option<DecodingResult>
    {
        let (width, height, slices) = self.dimensions();

        if index >= slices
        {
            return None;
        }
        let size = width * height;

        self.buffer.range(index * size, (index + 1) * size)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_buffer_length_is_checked()
    {
        let err = Volume::new(VolumeBuffer::U8(vec![0; 7]), 2, 2, 2).unwrap_err();
        assert!(matches!(err, VolumeErrors::DimensionsMisMatch(8, 7)));

        assert!(Volume::new(VolumeBuffer::U8(vec![]), 0, 2, 2).is_err());
    }

    #[test]
    fn test_slices_stack_in_order()
    {
        let slices: Vec<DecodingResult> =
            (0..3_u16).map(|z| DecodingResult::U16(vec![z * 10; 6])).collect();

        let volume = Volume::from_slices(&slices, 3, 2).unwrap();

        assert_eq!(volume.dimensions(), (3, 2, 3));
        assert_eq!(volume.depth(), BitDepth::Sixteen);

        for (z, slice) in slices.iter().enumerate()
        {
            assert_eq!(volume.slice(z).as_ref(), Some(slice));
        }
        assert_eq!(volume.slice(3), None);
    }

    #[test]
    fn test_slice_mismatch()
    {
        let slices = [DecodingResult::U8(vec![0; 4]), DecodingResult::U8(vec![0; 6])];

        let err = Volume::from_slices(&slices, 2, 2).unwrap_err();
        assert!(matches!(err, VolumeErrors::SliceMismatch(1, (2, 2, _), (3, 2, _))));

        let slices = [DecodingResult::U8(vec![0; 4]), DecodingResult::U16(vec![0; 4])];

        let err = Volume::from_slices(&slices, 2, 2).unwrap_err();
        assert!(matches!(
            err,
            VolumeErrors::SliceMismatch(1, _, (2, 2, BitDepth::Sixteen))
        ));
    }

    #[test]
    fn test_set_buffer_keeps_geometry()
    {
        let mut volume = Volume::new(VolumeBuffer::U16(vec![1; 8]), 2, 2, 2).unwrap();
        volume.set_spacing([0.5, 0.5, 3.0]);

        volume.set_buffer(VolumeBuffer::U8(vec![2; 8])).unwrap();

        assert_eq!(volume.depth(), BitDepth::Eight);
        assert_eq!(volume.metadata().depth(), BitDepth::Eight);
        assert_eq!(volume.spacing(), [0.5, 0.5, 3.0]);
        assert!(volume.set_buffer(VolumeBuffer::U8(vec![2; 9])).is_err());
    }

    #[test]
    fn test_voxel_count_overflow()
    {
        assert_eq!(voxel_count(4, 3, 2).unwrap(), 24);

        let err = voxel_count(usize::MAX, 2, 1).unwrap_err();
        assert!(matches!(err, VolumeErrors::GenericStr(_)));

        let err = voxel_count(1 << 16, 1 << 16, usize::MAX >> 20).unwrap_err();
        assert!(matches!(err, VolumeErrors::GenericStr(_)));
    }
}
