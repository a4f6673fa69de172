/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A dense scalar volume library
//!
//! This crate ties the TIFF and VTK codecs of the `vtkstack` family together
//! around a single [`Volume`](volume::Volume) type.
//!
//! A typical conversion goes through the [`WorkFlow`](workflow::WorkFlow)
//! state machine
//!
//! 1. A decoder loads a volume from a numbered TIFF sequence, a multi-page TIFF
//!    or a VTK file.
//! 2. Operations such as [`Depth`](core_filters::depth::Depth) transform it.
//! 3. Encoders write it out as VTK or as a numbered TIFF sequence.
//!
//! Volumes are stored x fastest, then y, then z, with one scalar type for the
//! whole buffer.
pub mod buffer;
pub mod codecs;
pub mod core_filters;
pub mod errors;
pub mod file_io;
pub mod metadata;
mod serde;
pub mod traits;
pub mod volume;
pub mod workflow;
