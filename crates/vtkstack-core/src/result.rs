/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding results for volumes and slices
use crate::bit_depth::BitDepth;

/// A simple enum that can hold decode
/// results of most slices and volumes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodingResult
{
    U8(Vec<u8>),
    U16(Vec<u16>)
}

impl DecodingResult
{
    /// Return the contents if the enum stores `Vec<u8>` or otherwise
    /// return `None`.
    ///
    /// Useful for de-sugaring the result of a decoding operation
    /// into raw bytes
    ///
    /// # Example
    /// ```
    /// use vtkstack_core::result::DecodingResult;
    /// let data = DecodingResult::U8(vec![0;100]);
    /// // we know this won't fail because we created it with u8
    /// assert!(data.u8().is_some());
    ///
    /// let data = DecodingResult::U16(vec![0;100]);
    /// // it should now return nothing since the type is u16
    /// assert!(data.u8().is_none());
    ///
    /// ```
    pub fn u8(self) -> Option<Vec<u8>>
    {
        match self
        {
            DecodingResult::U8(data) => Some(data),
            _ => None
        }
    }

    /// Return the contents if the enum stores `Vec<u16>` or otherwise
    /// return `None`.
    pub fn u16(self) -> Option<Vec<u16>>
    {
        match self
        {
            DecodingResult::U16(data) => Some(data),
            _ => None
        }
    }

    /// The bit depth of the stored samples
    pub const fn depth(&self) -> BitDepth
    {
        match self
        {
            DecodingResult::U8(_) => BitDepth::Eight,
            DecodingResult::U16(_) => BitDepth::Sixteen
        }
    }

    /// Number of samples stored, regardless of their width
    pub fn len(&self) -> usize
    {
        match self
        {
            DecodingResult::U8(data) => data.len(),
            DecodingResult::U16(data) => data.len()
        }
    }

    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }
}
