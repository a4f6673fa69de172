/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! TIFF sequences and stacks as volumes
use std::io::Cursor;
use std::path::{Path, PathBuf};

use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::log::{debug, info, trace, warn};
use vtkstack_core::options::{DecoderOptions, EncoderOptions};
use vtkstack_core::result::DecodingResult;
use vtkstack_tiff::{stack_file_name, SequencePattern, TiffDecoder, TiffEncoder, TiffPage};

use crate::buffer::VolumeBuffer;
use crate::codecs::{create_options_for_encoder, VolumeFormat};
use crate::errors::VolumeErrors;
use crate::file_io::{read_file, write_atomically, MMAP_THRESHOLD};
use crate::metadata::VolumeMetadata;
use crate::traits::{DecoderTrait, EncoderTrait};
use crate::volume::{voxel_count, Volume};

/// Where the slices of a TIFF volume come from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TiffSource
{
    /// `count` single page files named by a pattern
    Sequence(SequencePattern, usize),
    /// One multi-page file
    Stack(PathBuf)
}

/// Decodes a volume from a numbered TIFF sequence or a multi-page TIFF
pub struct TiffVolumeDecoder
{
    source:         TiffSource,
    options:        DecoderOptions,
    mmap_threshold: u64
}

/// Geometry of one slice, used to check slices agree with each other
fn slice_shape(page: &TiffPage) -> (usize, usize, BitDepth)
{
    (page.width, page.height, page.depth())
}

impl TiffVolumeDecoder
{
    /// Create a decoder for `prefix` using the default sequence index width
    ///
    /// See [`new_with_digits`](Self::new_with_digits)
    pub fn new(
        prefix: &str, page_count: usize, options: DecoderOptions
    ) -> Result<TiffVolumeDecoder, VolumeErrors>
    {
        Self::new_with_digits(prefix, page_count, vtkstack_tiff::READ_INDEX_WIDTH, options)
    }

    /// Create a decoder for `prefix`
    ///
    /// A `page_count` above one selects sequence mode, reading `page_count`
    /// files whose index is zero padded to `digits`. Anything else selects
    /// the multi-page file `{prefix}.tif`.
    ///
    /// # Errors
    /// If the index width cannot name `page_count` files, if the sequence is
    /// longer than the depth limit or if a file name is too long. No file is
    /// opened.
    pub fn new_with_digits(
        prefix: &str, page_count: usize, digits: usize, options: DecoderOptions
    ) -> Result<TiffVolumeDecoder, VolumeErrors>
    {
        let source = if page_count > 1
        {
            let pattern = SequencePattern::new(prefix, digits);
            pattern.check_capacity(page_count)?;

            if page_count > options.get_max_depth()
            {
                return Err(VolumeErrors::GenericString(format!(
                    "Sequence of {page_count} pages is above the depth limit of {}",
                    options.get_max_depth()
                )));
            }
            TiffSource::Sequence(pattern, page_count)
        }
        else
        {
            TiffSource::Stack(stack_file_name(prefix)?)
        };

        Ok(TiffVolumeDecoder {
            source,
            options,
            mmap_threshold: MMAP_THRESHOLD
        })
    }

    /// Files below this size are never memory mapped
    pub fn set_mmap_threshold(mut self, threshold: u64) -> Self
    {
        self.mmap_threshold = threshold;
        self
    }

    pub const fn source(&self) -> &TiffSource
    {
        &self.source
    }

    /// Every file this decoder will read, in slice order
    pub fn input_paths(&self) -> Result<Vec<PathBuf>, VolumeErrors>
    {
        match &self.source
        {
            TiffSource::Sequence(pattern, count) => Ok(pattern.file_names(*count)?),
            TiffSource::Stack(path) => Ok(vec![path.clone()])
        }
    }

    fn open<T>(
        &self, path: &Path, f: impl FnOnce(&mut TiffDecoder<Cursor<&[u8]>>) -> Result<T, VolumeErrors>
    ) -> Result<T, VolumeErrors>
    {
        let contents = read_file(path, self.options.get_use_mmap(), self.mmap_threshold)?;
        let mut decoder = TiffDecoder::new_with_options(Cursor::new(&*contents), self.options)
            .map_err(|err| with_path(path, err.into()))?;

        f(&mut decoder).map_err(|err| with_path(path, err))
    }

    /// Read the first page of a sequence file, enforcing the single page rule
    /// in strict mode
    fn read_sequence_file(&self, path: &Path) -> Result<TiffPage, VolumeErrors>
    {
        let strict = self.options.get_strict_mode();

        self.open(path, |decoder| {
            let page = decoder.decode_page()?;

            if decoder.more_pages()
            {
                if strict
                {
                    return Err(VolumeErrors::GenericStr(
                        "Sequence file holds more than one page"
                    ));
                }
                warn!("Ignoring extra pages of {:?}", path);
            }
            Ok(page)
        })
    }

    fn decode_sequence(
        &self, pattern: &SequencePattern, count: usize
    ) -> Result<Volume, VolumeErrors>
    {
        info!("Running image sequence mode");

        let paths = pattern.file_names(count)?;
        let mut buffer: Option<VolumeBuffer> = None;
        let mut expected = None;

        for (index, path) in paths.iter().enumerate()
        {
            trace!("Reading slice {} from {:?}", index, path);

            let page = self.read_sequence_file(path)?;
            let shape = slice_shape(&page);

            let first = *expected.get_or_insert(shape);

            if shape != first
            {
                return Err(VolumeErrors::SliceMismatch(index, first, shape));
            }
            if buffer.is_none()
            {
                let capacity = voxel_count(shape.0, shape.1, count)?;
                buffer = Some(VolumeBuffer::with_capacity(shape.2, capacity));
            }
            if let Some(buffer) = buffer.as_mut()
            {
                buffer.append(&page.pixels)?;
            }
        }
        let (width, height, _) = expected.ok_or(VolumeErrors::GenericStr("Empty sequence"))?;
        let buffer = buffer.ok_or(VolumeErrors::GenericStr("Empty sequence"))?;

        let mut volume = Volume::new(buffer, width, height, count)?;
        volume.metadata_mut().set_format(VolumeFormat::TiffSequence);
        volume.metadata_mut().set_source_pages(count);

        Ok(volume)
    }

    fn decode_stack(&self, path: &Path) -> Result<Volume, VolumeErrors>
    {
        info!("Running multi-paged mode");

        let pages = self.open(path, |decoder| Ok(decoder.decode_pages()?))?;
        let first = pages
            .first()
            .map(slice_shape)
            .ok_or(VolumeErrors::GenericStr("TIFF stack has no pages"))?;

        for (index, page) in pages.iter().enumerate()
        {
            if slice_shape(page) != first
            {
                return Err(VolumeErrors::SliceMismatch(index, first, slice_shape(page)));
            }
        }
        let slices: Vec<DecodingResult> = pages.into_iter().map(|page| page.pixels).collect();

        let mut volume = Volume::from_slices(&slices, first.0, first.1)?;
        volume.metadata_mut().set_format(VolumeFormat::TiffStack);
        volume.metadata_mut().set_source_pages(slices.len());

        Ok(volume)
    }

    fn stack_headers(&self, path: &Path) -> Result<VolumeMetadata, VolumeErrors>
    {
        let mut metadata = VolumeMetadata::default();
        metadata.set_format(VolumeFormat::TiffStack);

        self.open(path, |decoder| {
            decoder.decode_headers()?;

            let (width, height) = decoder.get_dimensions().unwrap_or_default();
            let depth = decoder.get_depth().unwrap_or(BitDepth::Eight);
            let mut pages = 1;

            while decoder.next_page()?
            {
                decoder.decode_headers()?;
                pages += 1;
            }
            metadata.set_dimensions(width, height, pages);
            metadata.set_depth(depth);
            metadata.set_source_pages(pages);

            Ok(metadata)
        })
    }

    fn sequence_headers(
        &self, pattern: &SequencePattern, count: usize
    ) -> Result<VolumeMetadata, VolumeErrors>
    {
        let mut metadata = VolumeMetadata::default();
        metadata.set_format(VolumeFormat::TiffSequence);
        metadata.set_source_pages(count);

        let mut expected = None;

        for (index, path) in pattern.file_names(count)?.iter().enumerate()
        {
            let shape = self.open(path, |decoder| {
                decoder.decode_headers()?;

                let (width, height) = decoder.get_dimensions().unwrap_or_default();
                let depth = decoder.get_depth().unwrap_or(BitDepth::Eight);

                Ok((width, height, depth))
            })?;
            let first = *expected.get_or_insert(shape);

            if shape != first
            {
                return Err(VolumeErrors::SliceMismatch(index, first, shape));
            }
        }
        if let Some((width, height, depth)) = expected
        {
            metadata.set_dimensions(width, height, count);
            metadata.set_depth(depth);
        }
        Ok(metadata)
    }
}

/// Prefix generic errors with the file they came from
fn with_path(path: &Path, err: VolumeErrors) -> VolumeErrors
{
    match err
    {
        VolumeErrors::GenericStr(msg) =>
        {
            VolumeErrors::GenericString(format!("{}: {msg}", path.display()))
        }
        VolumeErrors::GenericString(msg) =>
        {
            VolumeErrors::GenericString(format!("{}: {msg}", path.display()))
        }
        other => other
    }
}

impl DecoderTrait for TiffVolumeDecoder
{
    fn decode(&mut self) -> Result<Volume, VolumeErrors>
    {
        let volume = match &self.source
        {
            TiffSource::Sequence(pattern, count) => self.decode_sequence(pattern, *count)?,
            TiffSource::Stack(path) => self.decode_stack(path)?
        };
        let (width, height, slices) = volume.dimensions();
        debug!("Volume dimensions: {}x{}x{} {:?}", width, height, slices, volume.depth());

        Ok(volume)
    }

    fn read_headers(&mut self) -> Result<VolumeMetadata, VolumeErrors>
    {
        match &self.source
        {
            TiffSource::Sequence(pattern, count) => self.sequence_headers(pattern, *count),
            TiffSource::Stack(path) => self.stack_headers(path)
        }
    }

    fn name(&self) -> &'static str
    {
        match self.source
        {
            TiffSource::Sequence(..) => "TIFF sequence",
            TiffSource::Stack(_) => "TIFF stack"
        }
    }
}

/// Writes every slice of a volume to its own single page TIFF file
///
/// If any slice fails, files written so far by this encoder are removed
pub struct TiffSequenceEncoder
{
    pattern: SequencePattern,
    options: Option<EncoderOptions>,
    written: Vec<PathBuf>
}

impl TiffSequenceEncoder
{
    pub fn new(pattern: SequencePattern) -> TiffSequenceEncoder
    {
        TiffSequenceEncoder {
            pattern,
            options: None,
            written: vec![]
        }
    }

    pub fn new_with_options(pattern: SequencePattern, options: EncoderOptions) -> TiffSequenceEncoder
    {
        TiffSequenceEncoder {
            pattern,
            options: Some(options),
            written: vec![]
        }
    }

    /// Files written by the last successful encode, in slice order
    pub fn written(&self) -> &[PathBuf]
    {
        &self.written
    }

    fn write_slices(&mut self, volume: &Volume, paths: &[PathBuf]) -> Result<(), VolumeErrors>
    {
        // one page per file
        let options = create_options_for_encoder(self.options, volume).set_slices(1);

        for (index, path) in paths.iter().enumerate()
        {
            let slice = volume
                .slice(index)
                .ok_or(VolumeErrors::GenericStr("Slice index out of bounds"))?;

            write_atomically(path, |sink| {
                let mut encoder = TiffEncoder::new(sink, options)?;
                encoder.encode_page(&slice)?;
                Ok(())
            })?;
            self.written.push(path.clone());
        }
        Ok(())
    }
}

impl EncoderTrait for TiffSequenceEncoder
{
    fn name(&self) -> &'static str
    {
        "TIFF sequence"
    }

    fn encode_inner(&mut self, volume: &Volume) -> Result<(), VolumeErrors>
    {
        let (_, _, slices) = volume.dimensions();
        // every name is validated before the first file is written
        let paths = self.pattern.file_names(slices)?;

        self.written.clear();

        if let Err(err) = self.write_slices(volume, &paths)
        {
            for path in self.written.drain(..)
            {
                let _ = std::fs::remove_file(path);
            }
            return Err(err);
        }
        info!("Wrote {} TIFF files", self.written.len());

        Ok(())
    }

    fn supported_depths(&self) -> &'static [BitDepth]
    {
        &[BitDepth::Eight, BitDepth::Sixteen]
    }
}
