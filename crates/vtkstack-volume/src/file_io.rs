/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reading input files and writing outputs without leaving partial files behind
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};

#[cfg(feature = "mmap")]
use memmap2::Mmap;
use vtkstack_core::log::{debug, trace};

use crate::errors::VolumeErrors;

/// Files smaller than this are read to memory even when
/// memory maps are requested
pub const MMAP_THRESHOLD: u64 = 64 * 1024;

/// Suffix appended to the name of a file while it is being written
pub const PARTIAL_SUFFIX: &str = ".partial";

/// Contents of an input file, either memory mapped or read to memory
pub enum FileContents
{
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    Read(Vec<u8>)
}

impl Deref for FileContents
{
    type Target = [u8];

    fn deref(&self) -> &Self::Target
    {
        match self
        {
            #[cfg(feature = "mmap")]
            FileContents::Mapped(map) => map.deref(),
            FileContents::Read(data) => data
        }
    }
}

/// Read a file, memory mapping it when `use_mmap` is set and it is
/// at least `mmap_threshold` bytes long
pub fn read_file(
    path: &Path, use_mmap: bool, mmap_threshold: u64
) -> Result<FileContents, VolumeErrors>
{
    let mut file = File::open(path).map_err(|err| {
        VolumeErrors::GenericString(format!("Cannot open {}: {err}", path.display()))
    })?;
    let len = file.metadata()?.len();

    #[cfg(feature = "mmap")]
    {
        // empty files cannot be mapped
        if use_mmap && len > 0 && len >= mmap_threshold
        {
            trace!("Reading {:?} via memory maps", path);
            // Unsafety: the map is read only, changing the file while we
            // read it produces garbage volumes but no memory errors
            // beyond what the file system allows
            let map = unsafe { Mmap::map(&file)? };
            return Ok(FileContents::Mapped(map));
        }
    }
    #[cfg(not(feature = "mmap"))]
    {
        let _ = (use_mmap, mmap_threshold);
    }
    trace!("Reading {:?} to memory", path);

    let mut data = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
    file.read_to_end(&mut data)?;

    Ok(FileContents::Read(data))
}

/// Path of the temporary sibling `path` is written to before it is renamed
pub fn partial_path(path: &Path) -> PathBuf
{
    let mut name = path.as_os_str().to_os_string();
    name.push(PARTIAL_SUFFIX);

    PathBuf::from(name)
}

/// Write `path` through `writer`, all or nothing
///
/// The output goes to a sibling temporary file that replaces `path` only
/// once `writer` succeeds. On failure the temporary file is removed and
/// `path` is left untouched.
pub fn write_atomically<F>(path: &Path, writer: F) -> Result<(), VolumeErrors>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), VolumeErrors>
{
    let partial = partial_path(path);

    let result = File::create(&partial)
        .map_err(|err| {
            VolumeErrors::GenericString(format!("Cannot create {}: {err}", partial.display()))
        })
        .and_then(|file| {
            let mut sink = BufWriter::new(file);
            writer(&mut sink)?;
            sink.flush()?;
            sink.get_ref().sync_all()?;
            Ok(())
        })
        .and_then(|()| std::fs::rename(&partial, path).map_err(VolumeErrors::from));

    if result.is_err()
    {
        // may not exist if creating it failed
        let _ = std::fs::remove_file(&partial);
    }
    else
    {
        debug!("Wrote {:?}", path);
    }
    result
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf
    {
        let dir = std::env::temp_dir().join(format!("vtkstack-file-io-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_failed_write_leaves_nothing()
    {
        let dir = scratch_dir("failed");
        let path = dir.join("out.vtk");

        let result = write_atomically(&path, |sink| {
            sink.write_all(b"half a volume")?;
            Err(VolumeErrors::GenericStr("encoder gave up"))
        });

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(!partial_path(&path).exists());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_failed_write_keeps_previous_file()
    {
        let dir = scratch_dir("previous");
        let path = dir.join("out.vtk");
        std::fs::write(&path, b"old").unwrap();

        let result = write_atomically(&path, |_| Err(VolumeErrors::GenericStr("no")));

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"old");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_read_back_both_ways()
    {
        let dir = scratch_dir("read");
        let path = dir.join("data.bin");
        let data: Vec<u8> = (0..200_000_u32).map(|x| (x % 251) as u8).collect();

        write_atomically(&path, |sink| Ok(sink.write_all(&data)?)).unwrap();

        assert_eq!(&*read_file(&path, true, MMAP_THRESHOLD).unwrap(), &data[..]);
        assert_eq!(&*read_file(&path, false, MMAP_THRESHOLD).unwrap(), &data[..]);

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_file()
    {
        let err = read_file(Path::new("/definitely/not/here.tif"), false, 0);
        assert!(err.is_err());
    }
}
