/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Depth conversion routines
//!
//! Volumes associate bit depths with native representations,
//! the following mapping indicates the types and range
//!
//!|BitDepth         |native type    |range      |
//!|-----------------|---------------|-----------|
//!|BitDepth::Eight  | [`u8`]        |0   - 255  |
//!|BitDepth::Sixteen| [`u16`]       |0   - 65535|
//!
//! Narrowing from 16 to 8 bits is a min-max stretch, the darkest voxel of
//! the volume becomes 0 and the brightest becomes 255, regardless of how much
//! of the 16 bit range the volume uses.
use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::log::{info, trace, warn};

use crate::buffer::VolumeBuffer;
use crate::errors::VolumeErrors;
use crate::traits::OperationsTrait;
use crate::volume::Volume;

/// Return the smallest and largest value in `data`,
/// or `None` if it is empty
pub fn intensity_range(data: &[u16]) -> Option<(u16, u16)>
{
    let first = *data.first()?;

    Some(
        data.iter()
            .fold((first, first), |(min, max), &x| (min.min(x), max.max(x)))
    )
}

/// Linearly map `from` in `min..=max` to `to` in `0..=255`
///
/// Each output is `floor(255 * (x - min) / (max - min))`, computed in
/// integers. When `max == min` every output is zero.
///
/// # Arguments
///  - `from`: pixels in 16 bit format, all within `min..=max`
///  - `to`: where we write our 8 bit pixels, same length as `from`
pub fn rescale_u16_to_u8(from: &[u16], to: &mut [u8], min: u16, max: u16)
{
    if max <= min
    {
        to.fill(0);
        return;
    }
    let range = u32::from(max - min);

    for (old, new) in from.iter().zip(to.iter_mut())
    {
        let offset = u32::from(old.saturating_sub(min));
        // offset <= range so the quotient is at most 255
        *new = ((255 * offset) / range) as u8;
    }
}

fn narrow(data: &[u16]) -> Vec<u8>
{
    let mut output = vec![0; data.len()];

    match intensity_range(data)
    {
        Some((min, max)) =>
        {
            info!("Original intensities range: [{}-{}]", min, max);

            if min == max
            {
                warn!("All voxels have intensity {}, the rescaled volume is all zeros", min);
            }
            rescale_u16_to_u8(data, &mut output, min, max);
        }
        None => trace!("Empty volume, nothing to rescale")
    }
    output
}

/// Return a copy of `volume` with 8 bit scalars
///
/// 16 bit volumes are stretched from their observed intensity range to
/// `0..=255`. 8 bit volumes are returned unchanged. Dimensions, spacing
/// and origin are carried over.
pub fn rescale_to_8bit(volume: &Volume) -> Result<Volume, VolumeErrors>
{
    let mut output = volume.clone();

    if let VolumeBuffer::U16(data) = volume.buffer()
    {
        info!("Converting from 16-bit to 8-bit...");
        output.set_buffer(VolumeBuffer::U8(narrow(data)))?;
    }
    Ok(output)
}

/// Narrow a 16 bit volume to 8 bit with a min-max stretch
///
/// 8 bit volumes pass through untouched, 16 bit is the only other
/// depth a volume can have, so the only target is [`BitDepth::Eight`].
#[derive(Copy, Clone, Debug)]
pub struct Depth
{
    depth: BitDepth
}

impl Depth
{
    pub fn new(depth: BitDepth) -> Depth
    {
        Depth { depth }
    }
}

impl OperationsTrait for Depth
{
    fn name(&self) -> &'static str
    {
        "Depth"
    }

    fn execute_impl(&self, volume: &mut Volume) -> Result<(), VolumeErrors>
    {
        let volume_depth = volume.depth();

        if volume_depth == self.depth
        {
            trace!("Volume depth already matches requested, no-op");
            return Ok(());
        }

        let new_buffer = match (volume.buffer(), self.depth)
        {
            (VolumeBuffer::U16(data), BitDepth::Eight) =>
            {
                info!("Converting from 16-bit to 8-bit...");
                VolumeBuffer::U8(narrow(data))
            }
            (_, depth) =>
            {
                return Err(VolumeErrors::UnsupportedDepthForOperation(
                    depth,
                    "Depth",
                    &[BitDepth::Eight]
                ))
            }
        };
        volume.set_buffer(new_buffer)
    }

    fn supported_types(&self) -> &'static [BitDepth]
    {
        &[BitDepth::Eight, BitDepth::Sixteen]
    }
}
