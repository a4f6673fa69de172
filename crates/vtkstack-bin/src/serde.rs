/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use vtkstack_volume::metadata::VolumeMetadata;

/// Metadata of one volume together with the files it was read from
pub struct Metadata<'a>
{
    files:    Vec<String>,
    metadata: &'a VolumeMetadata
}

impl<'a> Metadata<'a>
{
    pub fn new<P: AsRef<Path>>(files: &[P], metadata: &'a VolumeMetadata) -> Metadata<'a>
    {
        let files = files
            .iter()
            .map(|file| file.as_ref().to_string_lossy().into_owned())
            .collect();

        Metadata { files, metadata }
    }
}

impl<'a> Serialize for Metadata<'a>
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("VolumeMetadata", 2)?;

        state.serialize_field("files", &self.files)?;
        state.serialize_field("metadata", &self.metadata)?;

        state.end()
    }
}
