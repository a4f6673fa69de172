/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! File names for numbered sequences and single stack files
use std::path::PathBuf;

use crate::errors::TiffErrors;

/// Index width used when reading a numbered sequence, `{prefix}{00..99}.tif`
pub const READ_INDEX_WIDTH: usize = 2;

/// Index width used when writing a numbered sequence, `{prefix}{0000..9999}.tif`
///
/// This is deliberately wider than [`READ_INDEX_WIDTH`], sequences written
/// with the defaults cannot be read back with the defaults.
pub const WRITE_INDEX_WIDTH: usize = 4;

/// Longest file name (last path component) in bytes that will be generated
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Extension of every TIFF file read or written
pub const TIFF_EXTENSION: &str = "tif";

/// Naming scheme of a numbered sequence of files
///
/// File `i` of the sequence is `{prefix}{i}.tif` with `i` zero padded
/// to `digits` characters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequencePattern
{
    prefix: String,
    digits: usize
}

impl SequencePattern
{
    /// Create a new pattern, `digits` is clamped to at least one
    pub fn new(prefix: impl Into<String>, digits: usize) -> SequencePattern
    {
        SequencePattern {
            prefix: prefix.into(),
            digits: digits.max(1)
        }
    }

    /// Pattern with the default reading index width
    pub fn for_reading(prefix: impl Into<String>) -> SequencePattern
    {
        Self::new(prefix, READ_INDEX_WIDTH)
    }

    /// Pattern with the default writing index width
    pub fn for_writing(prefix: impl Into<String>) -> SequencePattern
    {
        Self::new(prefix, WRITE_INDEX_WIDTH)
    }

    pub fn prefix(&self) -> &str
    {
        &self.prefix
    }

    pub const fn digits(&self) -> usize
    {
        self.digits
    }

    /// Number of distinct file names the index width can address
    ///
    /// E.g a two digit index addresses 100 files, `00` to `99`
    pub fn capacity(&self) -> usize
    {
        u32::try_from(self.digits)
            .ok()
            .and_then(|digits| 10_usize.checked_pow(digits))
            .unwrap_or(usize::MAX)
    }

    /// Check that `count` files can be named without the index
    /// growing past its width
    pub fn check_capacity(&self, count: usize) -> Result<(), TiffErrors>
    {
        if count > self.capacity()
        {
            return Err(TiffErrors::TooManyPages(count, self.digits));
        }
        Ok(())
    }

    /// Return the file name of sequence entry `index`
    pub fn file_name(&self, index: usize) -> Result<PathBuf, TiffErrors>
    {
        self.check_capacity(index.saturating_add(1))?;

        let name = format!(
            "{}{:0width$}.{}",
            self.prefix,
            index,
            TIFF_EXTENSION,
            width = self.digits
        );
        checked_path(name)
    }

    /// Return the file names of the first `count` entries, in index order
    pub fn file_names(&self, count: usize) -> Result<Vec<PathBuf>, TiffErrors>
    {
        self.check_capacity(count)?;

        (0..count).map(|index| self.file_name(index)).collect()
    }
}

/// Return the name of the single multi-page file for `prefix`, `{prefix}.tif`
pub fn stack_file_name(prefix: &str) -> Result<PathBuf, TiffErrors>
{
    checked_path(format!("{prefix}.{TIFF_EXTENSION}"))
}

/// Turn `name` into a path, rejecting it if its last component is longer
/// than [`MAX_FILE_NAME_LEN`] bytes
pub fn checked_path(name: String) -> Result<PathBuf, TiffErrors>
{
    let path = PathBuf::from(name);

    let len = path
        .file_name()
        .map(|component| component.len())
        .ok_or(TiffErrors::Generic("Path does not name a file"))?;

    if len > MAX_FILE_NAME_LEN
    {
        return Err(TiffErrors::FileNameTooLong(
            path.to_string_lossy().into_owned(),
            len
        ));
    }
    Ok(path)
}

#[cfg(test)]
mod tests
{
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_two_digit_reading_names()
    {
        let pattern = SequencePattern::for_reading("im");

        assert_eq!(pattern.file_name(0).unwrap(), PathBuf::from("im00.tif"));
        assert_eq!(pattern.file_name(7).unwrap(), PathBuf::from("im07.tif"));
        assert_eq!(pattern.file_name(99).unwrap(), PathBuf::from("im99.tif"));
    }

    #[test]
    fn test_four_digit_writing_names()
    {
        let pattern = SequencePattern::for_writing("out/slice");

        assert_eq!(
            pattern.file_name(12).unwrap(),
            PathBuf::from("out/slice0012.tif")
        );
    }

    #[test]
    fn test_read_and_write_widths_differ()
    {
        // reading and writing use different index widths on purpose,
        // the same index maps to two different files
        let read = SequencePattern::for_reading("im").file_name(3).unwrap();
        let write = SequencePattern::for_writing("im").file_name(3).unwrap();

        assert_ne!(read, write);
        assert_eq!(READ_INDEX_WIDTH, 2);
        assert_eq!(WRITE_INDEX_WIDTH, 4);
    }

    #[test]
    fn test_two_digits_limited_to_one_hundred()
    {
        let pattern = SequencePattern::for_reading("im");

        assert_eq!(pattern.capacity(), 100);
        assert!(pattern.check_capacity(100).is_ok());
        assert!(matches!(
            pattern.check_capacity(101),
            Err(TiffErrors::TooManyPages(101, 2))
        ));
        assert!(pattern.file_name(100).is_err());
    }

    #[test]
    fn test_widened_index()
    {
        let pattern = SequencePattern::new("im", 3);

        assert!(pattern.check_capacity(101).is_ok());
        assert_eq!(pattern.file_name(100).unwrap(), PathBuf::from("im100.tif"));
    }

    #[test]
    fn test_huge_width_does_not_overflow()
    {
        assert_eq!(SequencePattern::new("im", 40).capacity(), usize::MAX);
    }

    #[test]
    fn test_zero_digits_clamped()
    {
        assert_eq!(SequencePattern::new("im", 0).digits(), 1);
    }

    #[test]
    fn test_file_names_in_order()
    {
        let names = SequencePattern::for_reading("a").file_names(3).unwrap();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a00.tif"),
                PathBuf::from("a01.tif"),
                PathBuf::from("a02.tif")
            ]
        );
    }

    #[test]
    fn test_stack_file_name()
    {
        assert_eq!(stack_file_name("im").unwrap(), PathBuf::from("im.tif"));
    }

    #[test]
    fn test_long_prefix_rejected()
    {
        let prefix = "x".repeat(MAX_FILE_NAME_LEN);

        assert!(matches!(
            stack_file_name(&prefix),
            Err(TiffErrors::FileNameTooLong(_, len)) if len == MAX_FILE_NAME_LEN + 4
        ));
        // directories do not count towards the limit
        let nested = format!("{}/im", "d".repeat(MAX_FILE_NAME_LEN));
        assert!(SequencePattern::for_reading(nested).file_name(0).is_ok());
    }
}
