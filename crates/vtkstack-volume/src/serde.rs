/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::codecs::VolumeFormat;
use crate::metadata::VolumeMetadata;

impl Serialize for VolumeMetadata
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 8;
        let mut state = serializer.serialize_struct("Metadata", STRUCT_FIELDS)?;

        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("slices", &self.slices)?;
        state.serialize_field("depth", &self.depth)?;
        state.serialize_field("spacing", &self.spacing)?;
        state.serialize_field("origin", &self.origin)?;
        state.serialize_field("format", &self.format)?;
        state.serialize_field("source_pages", &self.source_pages)?;

        state.end()
    }
}

impl Serialize for VolumeFormat
{
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}
