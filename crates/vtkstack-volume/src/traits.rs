/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by decoders, operations and encoders of a workflow
use vtkstack_core::bit_depth::BitDepth;

use crate::errors::VolumeErrors;
use crate::metadata::VolumeMetadata;
use crate::volume::Volume;

/// Encapsulates a volume decoder.
///
/// All supported volume sources must implement this trait
pub trait DecoderTrait
{
    /// Decode the whole volume
    ///
    /// # Errors
    ///  - Any decoding errors will be propagated to the caller.
    fn decode(&mut self) -> Result<Volume, VolumeErrors>;

    /// Read enough of the source to describe the volume
    /// without decoding its scalars
    fn read_headers(&mut self) -> Result<VolumeMetadata, VolumeErrors>;

    /// Get the name of the decoder
    fn name(&self) -> &'static str;
}

/// This encapsulates a volume operation.
///
/// All operations that can be stored in a workflow
/// need to implement this trait.
pub trait OperationsTrait
{
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Execute the operation on the volume
    ///
    /// Callers should use [`execute`](OperationsTrait::execute), which
    /// checks the volume depth first
    fn execute_impl(&self, volume: &mut Volume) -> Result<(), VolumeErrors>;

    /// Depths this operation can be run on
    fn supported_types(&self) -> &'static [BitDepth];

    /// Execute the operation after checking that it supports
    /// the depth of the volume
    fn execute(&self, volume: &mut Volume) -> Result<(), VolumeErrors>
    {
        let depth = volume.depth();

        if !self.supported_types().contains(&depth)
        {
            return Err(VolumeErrors::UnsupportedDepthForOperation(
                depth,
                self.name(),
                self.supported_types()
            ));
        }
        self.execute_impl(volume)
    }
}

/// Encapsulates a volume encoder.
///
/// Encoders know their destination, so encoding writes
/// the volume out directly
pub trait EncoderTrait
{
    /// Get the name of the encoder
    fn name(&self) -> &'static str;

    /// Write the volume, callers should use [`encode`](EncoderTrait::encode)
    fn encode_inner(&mut self, volume: &Volume) -> Result<(), VolumeErrors>;

    /// Depths this encoder can write
    fn supported_depths(&self) -> &'static [BitDepth];

    /// Write the volume after checking that the encoder supports
    /// its depth
    fn encode(&mut self, volume: &Volume) -> Result<(), VolumeErrors>
    {
        let depth = volume.depth();

        if !self.supported_depths().contains(&depth)
        {
            return Err(VolumeErrors::UnsupportedDepthForOperation(
                depth,
                self.name(),
                self.supported_depths()
            ));
        }
        self.encode_inner(volume)
    }
}
