/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all vtkstack libraries
//!
//! It currently contains
//!
//! - Bit depth information shared by volumes and slices
//! - Volume decoder and encoder options
//! - A simple enum type to hold decoding results
//! - A logging shim which is a no-op unless the `log` feature is enabled
//!
//! # Features
//!  - `log`: Forward library messages to the [`log`](https://docs.rs/log) facade.
//!
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
//!
#![macro_use]

pub mod bit_depth;
pub mod log;
pub mod options;
pub mod result;
mod serde;
