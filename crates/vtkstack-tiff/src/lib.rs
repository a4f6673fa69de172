/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Grayscale TIFF pages for volumetric stacks
//!
//! A volume can be stored as TIFF in two ways
//!
//! - A single multi-page file, `{prefix}.tif`, each page holding one z slice
//! - A numbered sequence of single page files, `{prefix}{index}.tif`, where
//!   the index is zero padded to a fixed width
//!
//! This crate wraps the [`tiff`] crate and only understands
//! single channel 8 and 16 bit unsigned pages, anything else is reported
//! as unsupported.
//!
//! The default index widths differ between reading (two digits) and writing
//! (four digits), see [`READ_INDEX_WIDTH`] and [`WRITE_INDEX_WIDTH`].
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use sequence::*;

mod decoder;
mod encoder;
mod errors;
mod sequence;
