/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A decode, transform, encode pipeline for one volume
use std::time::Instant;

use vtkstack_core::log::Level::Info;
use vtkstack_core::log::{info, log_enabled};

use crate::errors::VolumeErrors;
use crate::traits::{DecoderTrait, EncoderTrait, OperationsTrait};
use crate::volume::Volume;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum WorkFlowState
{
    Initialized,
    Decode,
    Operations,
    Encode,
    Finished
}

impl WorkFlowState
{
    pub fn next(self) -> Option<Self>
    {
        match self
        {
            WorkFlowState::Initialized => Some(WorkFlowState::Decode),
            WorkFlowState::Decode => Some(WorkFlowState::Operations),
            WorkFlowState::Operations => Some(WorkFlowState::Encode),
            WorkFlowState::Encode => Some(WorkFlowState::Finished),
            WorkFlowState::Finished => None
        }
    }
}

/// Runs a decoder, then every operation, then every encoder
///
/// The volume lives only as long as the workflow, nothing is kept
/// between runs.
pub struct WorkFlow
{
    state:      Option<WorkFlowState>,
    decode:     Option<Box<dyn DecoderTrait>>,
    volume:     Option<Volume>,
    operations: Vec<Box<dyn OperationsTrait>>,
    encode:     Vec<Box<dyn EncoderTrait>>
}

impl WorkFlow
{
    /// Create a new, empty workflow
    #[allow(clippy::new_without_default)]
    pub fn new() -> WorkFlow
    {
        WorkFlow {
            state:      Some(WorkFlowState::Initialized),
            decode:     None,
            volume:     None,
            operations: vec![],
            encode:     vec![]
        }
    }

    /// Add an encoder for this volume
    ///
    /// One can define multiple encoders for a single decoder,
    /// the workflow will run all encoders in order of definition
    pub fn chain_encoder(&mut self, encoder: Box<dyn EncoderTrait>) -> &mut WorkFlow
    {
        self.encode.push(encoder);
        self
    }

    pub fn chain_decoder(&mut self, decoder: Box<dyn DecoderTrait>) -> &mut WorkFlow
    {
        self.decode = Some(decoder);
        self
    }

    pub fn chain_operations(&mut self, operations: Box<dyn OperationsTrait>) -> &mut WorkFlow
    {
        self.operations.push(operations);
        self
    }

    pub fn get_volume(&self) -> Option<&Volume>
    {
        self.volume.as_ref()
    }

    /// Whether every step has run
    pub fn is_finished(&self) -> bool
    {
        self.state.is_none()
    }

    /// Advance the workflow one state forward
    ///
    /// The workflow advance is as follows
    ///
    /// 1. Decode
    /// 2. One or more operations [ all ran at once]
    /// 3. One or more encodes [all ran at once]
    /// 4. Finish
    ///
    /// Calling `Workflow::advance()` will run one of this operation
    pub fn advance(&mut self) -> Result<(), VolumeErrors>
    {
        let Some(state) = self.state
        else
        {
            return Ok(());
        };

        if log_enabled!(Info)
        {
            info!("Current state: {:?}", state);
        }

        match state
        {
            WorkFlowState::Decode =>
            {
                if let Some(decoder) = self.decode.as_mut()
                {
                    let start = Instant::now();

                    let volume = decoder.decode()?;

                    info!(
                        "Finished decoding {} in {} ms",
                        decoder.name(),
                        start.elapsed().as_millis()
                    );
                    self.volume = Some(volume);
                }
                else
                {
                    return Err(VolumeErrors::NoVolumeForOperations);
                }
            }
            WorkFlowState::Operations =>
            {
                let volume = self
                    .volume
                    .as_mut()
                    .ok_or(VolumeErrors::NoVolumeForOperations)?;

                for operation in &self.operations
                {
                    let operation_name = operation.name();

                    info!("Running {}", operation_name);

                    let start = Instant::now();

                    operation.execute(volume)?;

                    info!(
                        "Finished running `{operation_name}` in {} ms",
                        start.elapsed().as_millis()
                    );
                }
            }
            WorkFlowState::Encode =>
            {
                let volume = self
                    .volume
                    .as_ref()
                    .ok_or(VolumeErrors::NoVolumeForEncoding)?;

                for encoder in self.encode.iter_mut()
                {
                    let encoder_name = encoder.name();

                    info!("Running {} encoder", encoder_name);

                    let start = Instant::now();

                    encoder.encode(volume)?;

                    info!(
                        "Finished running `{encoder_name}` in {} ms",
                        start.elapsed().as_millis()
                    );
                }
            }
            WorkFlowState::Finished =>
            {
                info!("Finished operations for this workflow");
            }
            WorkFlowState::Initialized => ()
        }
        self.state = state.next();

        Ok(())
    }

    /// Advance the operations in this workflow up until
    /// we finish.
    ///
    /// This will run a decoder, all operations and all encoders
    /// for this particular workflow
    pub fn advance_to_end(&mut self) -> Result<(), VolumeErrors>
    {
        while self.state.is_some()
        {
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use vtkstack_core::bit_depth::BitDepth;

    use super::*;
    use crate::buffer::VolumeBuffer;
    use crate::core_filters::depth::Depth;
    use crate::metadata::VolumeMetadata;

    struct InMemory(Volume);

    impl DecoderTrait for InMemory
    {
        fn decode(&mut self) -> Result<Volume, VolumeErrors>
        {
            Ok(self.0.clone())
        }

        fn read_headers(&mut self) -> Result<VolumeMetadata, VolumeErrors>
        {
            Ok(self.0.metadata().clone())
        }

        fn name(&self) -> &'static str
        {
            "in memory"
        }
    }

    #[test]
    fn test_decode_then_rescale()
    {
        let volume = Volume::new(VolumeBuffer::U16((0..8).map(|x| x * 100).collect()), 2, 2, 2)
            .unwrap();

        let mut workflow = WorkFlow::new();
        workflow
            .chain_decoder(Box::new(InMemory(volume)))
            .chain_operations(Box::new(Depth::new(BitDepth::Eight)));

        workflow.advance_to_end().unwrap();

        assert!(workflow.is_finished());
        assert_eq!(
            workflow.get_volume().unwrap().buffer(),
            &VolumeBuffer::U8(vec![0, 36, 72, 109, 145, 182, 218, 255])
        );
    }

    #[test]
    fn test_missing_volume()
    {
        let mut workflow = WorkFlow::new();
        let err = workflow.advance_to_end().unwrap_err();

        assert!(matches!(err, VolumeErrors::NoVolumeForOperations));
    }
}
