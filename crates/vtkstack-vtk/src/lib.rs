/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Legacy VTK structured points is a simple line based format for dense volumes
//! with the following layout
//! ```text
//! ╔═══════════════════════════════════╤═══════════════════════════════════════════╗
//! ║ Line                              │ Description                               ║
//! ╠═══════════════════════════════════╪═══════════════════════════════════════════╣
//! ║ # vtk DataFile Version 3.0        │ magic and version                         ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ <title>                           │ free text, up to 256 characters           ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ BINARY | ASCII                    │ encoding of the scalar payload            ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ DATASET STRUCTURED_POINTS         │ dataset kind                              ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ DIMENSIONS nx ny nz               │ grid size                                 ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ SPACING sx sy sz                  │ voxel size (ASPECT_RATIO is a synonym)    ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ ORIGIN ox oy oz                   │ position of the first voxel               ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ POINT_DATA n                      │ n = nx * ny * nz                          ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ SCALARS name type [1]             │ unsigned_char or unsigned_short here      ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ LOOKUP_TABLE default              │ optional                                  ║
//! ╟───────────────────────────────────┼───────────────────────────────────────────╢
//! ║ [data]                            │ n scalars, x fastest, then y, then z      ║
//! ╚═══════════════════════════════════╧═══════════════════════════════════════════╝
//!```
//! Binary payloads are big endian.
//!
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use header::*;

mod decoder;
mod encoder;
mod errors;
mod header;
