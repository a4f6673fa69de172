/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::path::{Path, PathBuf};

use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::options::{DecoderOptions, EncoderOptions};
use vtkstack_core::result::DecodingResult;
use vtkstack_tiff::{SequencePattern, TiffEncoder};
use vtkstack_volume::buffer::VolumeBuffer;
use vtkstack_volume::codecs::tiff::{TiffSequenceEncoder, TiffVolumeDecoder};
use vtkstack_volume::codecs::vtk::{VtkVolumeDecoder, VtkVolumeEncoder};
use vtkstack_volume::codecs::{load, load_vtk, load_with_digits, save_tiff_sequence, save_vtk, VolumeFormat};
use vtkstack_volume::core_filters::depth::{rescale_to_8bit, Depth};
use vtkstack_volume::errors::VolumeErrors;
use vtkstack_volume::file_io::partial_path;
use vtkstack_volume::traits::{DecoderTrait, EncoderTrait};
use vtkstack_volume::volume::Volume;
use vtkstack_volume::workflow::WorkFlow;

/// A directory unique to one test, removed on drop
struct Scratch(PathBuf);

impl Scratch
{
    fn new(name: &str) -> Scratch
    {
        let dir = std::env::temp_dir().join(format!(
            "vtkstack-volume-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        Scratch(dir)
    }

    fn prefix(&self, stem: &str) -> String
    {
        self.0.join(stem).to_str().unwrap().to_string()
    }
}

impl Drop for Scratch
{
    fn drop(&mut self)
    {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Write one single page file per slice using `pattern`
fn write_slices(pattern: SequencePattern, width: usize, height: usize, slices: &[DecodingResult])
{
    let volume = Volume::from_slices(slices, width, height).unwrap();
    TiffSequenceEncoder::new(pattern).encode(&volume).unwrap();
}

fn write_stack(path: &Path, width: usize, height: usize, pages: &[DecodingResult])
{
    let options = EncoderOptions::default()
        .set_width(width)
        .set_height(height)
        .set_depth(pages[0].depth());

    let mut encoder = TiffEncoder::new(File::create(path).unwrap(), options).unwrap();

    for page in pages
    {
        encoder.encode_page(page).unwrap();
    }
}

fn constant_slices(count: u16, len: usize) -> Vec<DecodingResult>
{
    (0..count)
        .map(|z| DecodingResult::U16(vec![z * 1000 + 7; len]))
        .collect()
}

#[test]
fn test_sequence_slices_stack_in_index_order()
{
    let scratch = Scratch::new("sequence");
    let prefix = scratch.prefix("im");
    let slices = constant_slices(5, 4 * 3);

    write_slices(SequencePattern::for_reading(prefix.as_str()), 4, 3, &slices);
    assert!(Path::new(&format!("{prefix}00.tif")).exists());
    assert!(Path::new(&format!("{prefix}04.tif")).exists());

    let volume = load(&prefix, 5, DecoderOptions::default()).unwrap();

    assert_eq!(volume.dimensions(), (4, 3, 5));
    assert_eq!(volume.depth(), BitDepth::Sixteen);
    assert_eq!(volume.metadata().format(), Some(VolumeFormat::TiffSequence));
    assert_eq!(volume.metadata().source_pages(), 5);

    for (z, slice) in slices.iter().enumerate()
    {
        assert_eq!(volume.slice(z).as_ref(), Some(slice));
    }
}

#[test]
fn test_multi_page_stack()
{
    let scratch = Scratch::new("stack");
    let prefix = scratch.prefix("stack");
    let pages: Vec<DecodingResult> = (0..3_u8).map(|z| DecodingResult::U8(vec![z; 6])).collect();

    write_stack(Path::new(&format!("{prefix}.tif")), 3, 2, &pages);

    // both zero and one select the multi-page file
    for count in [0, 1]
    {
        let volume = load(&prefix, count, DecoderOptions::default()).unwrap();

        assert_eq!(volume.dimensions(), (3, 2, 3));
        assert_eq!(volume.depth(), BitDepth::Eight);
        assert_eq!(volume.slice(2), Some(DecodingResult::U8(vec![2; 6])));
        assert_eq!(volume.metadata().format(), Some(VolumeFormat::TiffStack));
    }

    let metadata = TiffVolumeDecoder::new(&prefix, 1, DecoderOptions::default())
        .unwrap()
        .read_headers()
        .unwrap();

    assert_eq!(metadata.dimensions(), (3, 2, 3));
    assert_eq!(metadata.source_pages(), 3);
}

#[test]
fn test_slice_size_mismatch()
{
    let scratch = Scratch::new("mismatch");
    let prefix = scratch.prefix("im");
    let pattern = SequencePattern::for_reading(prefix.as_str());

    write_stack(&pattern.file_name(0).unwrap(), 2, 2, &[DecodingResult::U8(vec![1; 4])]);
    write_stack(&pattern.file_name(1).unwrap(), 3, 2, &[DecodingResult::U8(vec![1; 6])]);

    let err = load(&prefix, 2, DecoderOptions::default()).unwrap_err();

    assert!(matches!(
        err,
        VolumeErrors::SliceMismatch(1, (2, 2, BitDepth::Eight), (3, 2, BitDepth::Eight))
    ));
}

#[test]
fn test_slice_depth_mismatch()
{
    let scratch = Scratch::new("depth-mismatch");
    let prefix = scratch.prefix("im");
    let pattern = SequencePattern::for_reading(prefix.as_str());

    write_stack(&pattern.file_name(0).unwrap(), 2, 2, &[DecodingResult::U8(vec![1; 4])]);
    write_stack(&pattern.file_name(1).unwrap(), 2, 2, &[DecodingResult::U16(vec![1; 4])]);

    let err = load(&prefix, 2, DecoderOptions::default()).unwrap_err();
    assert!(matches!(err, VolumeErrors::SliceMismatch(1, _, (2, 2, BitDepth::Sixteen))));
}

#[test]
fn test_page_count_above_index_width()
{
    let scratch = Scratch::new("capacity");
    let prefix = scratch.prefix("im");

    let err = load(&prefix, 101, DecoderOptions::default()).unwrap_err();
    assert!(matches!(err, VolumeErrors::TooManyPages(101, 2)));

    // exactly one hundred pages are addressable, the first file is simply missing
    let err = load(&prefix, 100, DecoderOptions::default()).unwrap_err();
    assert!(!matches!(err, VolumeErrors::TooManyPages(..)));

    let err = load_with_digits(&prefix, 101, 3, DecoderOptions::default()).unwrap_err();
    assert!(!matches!(err, VolumeErrors::TooManyPages(..)));
}

#[test]
fn test_strict_mode_rejects_multi_page_sequence_files()
{
    let scratch = Scratch::new("strict");
    let prefix = scratch.prefix("im");
    let pattern = SequencePattern::for_reading(prefix.as_str());
    let pages = [DecodingResult::U8(vec![1; 4]), DecodingResult::U8(vec![2; 4])];

    write_stack(&pattern.file_name(0).unwrap(), 2, 2, &pages);
    write_stack(&pattern.file_name(1).unwrap(), 2, 2, &pages);

    let lenient = load(&prefix, 2, DecoderOptions::default()).unwrap();
    // only the first page of each file is used
    assert_eq!(lenient.buffer(), &VolumeBuffer::U8(vec![1; 8]));

    let strict = DecoderOptions::default().set_strict_mode(true);
    assert!(load(&prefix, 2, strict).is_err());
}

#[test]
fn test_vtk_round_trip()
{
    let scratch = Scratch::new("vtk");
    let path = scratch.0.join("volume.vtk");

    let data: Vec<u8> = (0..60).map(|x| (x * 3) as u8).collect();
    let mut volume = Volume::new(VolumeBuffer::U8(data), 5, 4, 3).unwrap();
    volume.set_spacing([0.5, 0.25, 2.0]);
    volume.set_origin([1.0, -2.0, 3.5]);

    save_vtk(&volume, &path).unwrap();
    assert!(!partial_path(&path).exists());

    let decoded = load_vtk(&path, DecoderOptions::default()).unwrap();

    assert_eq!(decoded.dimensions(), (5, 4, 3));
    assert_eq!(decoded.spacing(), [0.5, 0.25, 2.0]);
    assert_eq!(decoded.origin(), [1.0, -2.0, 3.5]);
    assert_eq!(decoded.buffer(), volume.buffer());
    assert_eq!(decoded.metadata().format(), Some(VolumeFormat::Vtk));

    let metadata = VtkVolumeDecoder::new(&path, DecoderOptions::default())
        .read_headers()
        .unwrap();
    assert_eq!(metadata.dimensions(), (5, 4, 3));
    assert_eq!(metadata.depth(), BitDepth::Eight);
}

#[test]
fn test_sixteen_bit_vtk_write_is_rejected()
{
    let scratch = Scratch::new("vtk-u16");
    let path = scratch.0.join("volume.vtk");
    let volume = Volume::new(VolumeBuffer::U16(vec![1; 8]), 2, 2, 2).unwrap();

    let err = save_vtk(&volume, &path).unwrap_err();

    assert!(matches!(
        err,
        VolumeErrors::UnsupportedDepthForOperation(BitDepth::Sixteen, "VTK", _)
    ));
    assert!(!err.is_unsupported());
    assert!(!path.exists());
    assert!(!partial_path(&path).exists());
}

#[test]
fn test_unwritable_vtk_destination()
{
    let scratch = Scratch::new("vtk-missing-dir");
    let path = scratch.0.join("no-such-dir").join("volume.vtk");
    let volume = Volume::new(VolumeBuffer::U8(vec![1; 8]), 2, 2, 2).unwrap();

    assert!(save_vtk(&volume, &path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_sequence_output_uses_four_digits()
{
    let scratch = Scratch::new("write-seq");
    let prefix = scratch.prefix("out");
    let slices = constant_slices(3, 4);
    let volume = Volume::from_slices(&slices, 2, 2).unwrap();

    let written = save_tiff_sequence(&volume, &prefix).unwrap();

    let expected: Vec<PathBuf> = (0..3)
        .map(|z| PathBuf::from(format!("{prefix}{z:04}.tif")))
        .collect();
    assert_eq!(written, expected);

    // the default read width is two digits, so the defaults do not round trip
    assert!(load(&prefix, 3, DecoderOptions::default()).is_err());

    let reread = load_with_digits(&prefix, 3, 4, DecoderOptions::default()).unwrap();
    assert_eq!(reread.buffer(), volume.buffer());
}

#[test]
fn test_vtk_to_tiff_sequence()
{
    let scratch = Scratch::new("vtk2tiff");
    let prefix = scratch.prefix("scan");
    let vtk_path = PathBuf::from(format!("{prefix}.vtk"));

    let volume = Volume::new(VolumeBuffer::U8((0..24).collect()), 4, 3, 2).unwrap();
    save_vtk(&volume, &vtk_path).unwrap();

    let decoded = load_vtk(&vtk_path, DecoderOptions::default()).unwrap();
    let written = save_tiff_sequence(&decoded, &prefix).unwrap();
    assert_eq!(written.len(), 2);

    let reread = load_with_digits(&prefix, 2, 4, DecoderOptions::default()).unwrap();
    assert_eq!(reread.dimensions(), (4, 3, 2));
    assert_eq!(reread.buffer(), volume.buffer());
}

#[test]
fn test_end_to_end_sixteen_bit_sequence()
{
    let scratch = Scratch::new("end-to-end");
    let prefix = scratch.prefix("im");
    let out = scratch.0.join("ImageData_Original.vtk");

    let slices = [
        DecodingResult::U16(vec![0, 100, 200, 300]),
        DecodingResult::U16(vec![400, 500, 600, 700])
    ];
    write_slices(SequencePattern::for_reading(prefix.as_str()), 2, 2, &slices);

    let mut workflow = WorkFlow::new();
    workflow
        .chain_decoder(Box::new(
            TiffVolumeDecoder::new(&prefix, 2, DecoderOptions::default()).unwrap()
        ))
        .chain_operations(Box::new(Depth::new(BitDepth::Eight)))
        .chain_encoder(Box::new(VtkVolumeEncoder::new(&out)));

    workflow.advance_to_end().unwrap();

    let decoded = load_vtk(&out, DecoderOptions::default()).unwrap();
    assert_eq!(
        decoded.buffer(),
        &VolumeBuffer::U8(vec![0, 36, 72, 109, 145, 182, 218, 255])
    );
    assert_eq!(decoded.dimensions(), (2, 2, 2));
}

#[test]
fn test_rescale_preserves_geometry()
{
    let mut volume = Volume::new(VolumeBuffer::U16(vec![10, 20, 30, 40]), 2, 2, 1).unwrap();
    volume.set_spacing([0.3, 0.3, 1.2]);
    volume.set_origin([5.0, 5.0, 0.0]);

    let rescaled = rescale_to_8bit(&volume).unwrap();

    assert_eq!(rescaled.dimensions(), (2, 2, 1));
    assert_eq!(rescaled.spacing(), [0.3, 0.3, 1.2]);
    assert_eq!(rescaled.origin(), [5.0, 5.0, 0.0]);
    assert_eq!(rescaled.buffer(), &VolumeBuffer::U8(vec![0, 85, 170, 255]));
    // input is untouched
    assert_eq!(volume.depth(), BitDepth::Sixteen);
}
