/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::str::FromStr;

use vtkstack_core::bit_depth::BitDepth;
use vtkstack_core::log::{debug, trace};
use vtkstack_core::options::DecoderOptions;
use vtkstack_core::result::DecodingResult;

use crate::errors::VtkErrors;
use crate::header::{depth_from_scalar_type, VtkEncoding, VtkHeader, VTK_MAGIC};

/// A legacy VTK structured points decoder
///
/// The decoder works on an in-memory buffer, which may come from
/// a memory map or from reading the whole file.
pub struct VtkDecoder<'a>
{
    data:     &'a [u8],
    position: usize,
    line:     usize,
    header:   Option<VtkHeader>,
    options:  DecoderOptions
}

impl<'a> VtkDecoder<'a>
{
    /// Create a new decoder with default options
    pub fn new(data: &'a [u8]) -> VtkDecoder<'a>
    {
        Self::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> VtkDecoder<'a>
    {
        VtkDecoder {
            data,
            position: 0,
            line: 0,
            header: None,
            options
        }
    }

    /// Return the next line without its terminator, or `None` at the end
    /// of the buffer
    fn next_line(&mut self) -> Option<&'a [u8]>
    {
        if self.position >= self.data.len()
        {
            return None;
        }
        let rest = &self.data[self.position..];

        let (line, consumed) = match rest.iter().position(|x| *x == b'\n')
        {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len())
        };
        self.position += consumed;
        self.line += 1;

        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }

    fn next_text_line(&mut self) -> Result<&'a str, VtkErrors>
    {
        let line = self
            .next_line()
            .ok_or_else(|| VtkErrors::MalformedHeader(self.line + 1, "unexpected end of file".to_string()))?;

        core::str::from_utf8(line)
            .map_err(|_| VtkErrors::MalformedHeader(self.line, "header line is not text".to_string()))
    }

    /// Next line that is not blank, split into tokens
    fn next_tokens(&mut self) -> Result<Vec<&'a str>, VtkErrors>
    {
        loop
        {
            let line = self.next_text_line()?;
            let tokens: Vec<&str> = line.split_whitespace().collect();

            if !tokens.is_empty()
            {
                return Ok(tokens);
            }
        }
    }

    fn parse_triple<T: FromStr>(&self, tokens: &[&str]) -> Result<[T; 3], VtkErrors>
    {
        if tokens.len() != 4
        {
            return Err(VtkErrors::MalformedHeader(
                self.line,
                format!("{} expects three values", tokens[0])
            ));
        }
        let parse = |token: &str| {
            token.parse::<T>().map_err(|_| {
                VtkErrors::MalformedHeader(
                    self.line,
                    format!("invalid value {token:?} for {}", tokens[0])
                )
            })
        };
        Ok([parse(tokens[1])?, parse(tokens[2])?, parse(tokens[3])?])
    }

    /// Consume an optional `LOOKUP_TABLE` line following `SCALARS`
    fn skip_lookup_table(&mut self)
    {
        let (position, line) = (self.position, self.line);

        while let Some(raw) = self.next_line()
        {
            let first = core::str::from_utf8(raw)
                .ok()
                .and_then(|text| text.split_whitespace().next());

            match first
            {
                Some(keyword) if keyword.eq_ignore_ascii_case("LOOKUP_TABLE") => return,
                Some(_) => break,
                // skip blank lines looking for the table
                None if raw.iter().all(u8::is_ascii_whitespace) => continue,
                None => break
            }
        }
        // no table, the payload starts right after SCALARS
        self.position = position;
        self.line = line;
    }

    /// Decode the header of the file
    ///
    /// This is idempotent, calling it again once headers are decoded
    /// does nothing.
    pub fn decode_headers(&mut self) -> Result<(), VtkErrors>
    {
        if self.header.is_some()
        {
            return Ok(());
        }
        let magic = self.next_line().ok_or(VtkErrors::InvalidMagic)?;

        if !magic.starts_with(VTK_MAGIC.as_bytes())
        {
            return Err(VtkErrors::InvalidMagic);
        }
        let mut header = VtkHeader {
            title: self.next_text_line()?.trim().to_string(),
            ..VtkHeader::default()
        };

        let encoding = self.next_tokens()?;

        header.encoding = match encoding[0].to_ascii_uppercase().as_str()
        {
            "BINARY" => VtkEncoding::Binary,
            "ASCII" => VtkEncoding::Ascii,
            other =>
            {
                return Err(VtkErrors::MalformedHeader(
                    self.line,
                    format!("unknown encoding {other}")
                ))
            }
        };

        let mut seen_dataset = false;
        let mut dimensions = None;
        let mut point_data = None;

        loop
        {
            let tokens = self.next_tokens()?;

            match tokens[0].to_ascii_uppercase().as_str()
            {
                "DATASET" =>
                {
                    let dataset = tokens.get(1).copied().unwrap_or_default();

                    if !dataset.eq_ignore_ascii_case("STRUCTURED_POINTS")
                    {
                        return Err(VtkErrors::UnsupportedDataset(dataset.to_string()));
                    }
                    seen_dataset = true;
                }
                "DIMENSIONS" => dimensions = Some(self.parse_triple::<usize>(&tokens)?),
                "SPACING" | "ASPECT_RATIO" => header.spacing = self.parse_triple::<f64>(&tokens)?,
                "ORIGIN" => header.origin = self.parse_triple::<f64>(&tokens)?,
                "POINT_DATA" =>
                {
                    let count = tokens
                        .get(1)
                        .and_then(|x| x.parse::<usize>().ok())
                        .ok_or_else(|| {
                            VtkErrors::MalformedHeader(self.line, "POINT_DATA expects a count".to_string())
                        })?;
                    point_data = Some(count);
                }
                "SCALARS" =>
                {
                    if tokens.len() < 3
                    {
                        return Err(VtkErrors::MalformedHeader(
                            self.line,
                            "SCALARS expects a name and a type".to_string()
                        ));
                    }
                    header.scalars_name = tokens[1].to_string();
                    header.depth = depth_from_scalar_type(tokens[2])?;

                    if let Some(components) = tokens.get(3)
                    {
                        let components = components.parse::<usize>().map_err(|_| {
                            VtkErrors::MalformedHeader(
                                self.line,
                                format!("invalid component count {components:?}")
                            )
                        })?;
                        if components != 1
                        {
                            return Err(VtkErrors::UnsupportedComponents(components));
                        }
                    }
                    self.skip_lookup_table();
                    break;
                }
                other =>
                {
                    return Err(VtkErrors::MalformedHeader(
                        self.line,
                        format!("unexpected keyword {other}")
                    ));
                }
            }
        }

        if !seen_dataset
        {
            return Err(VtkErrors::MalformedHeader(self.line, "missing DATASET".to_string()));
        }
        header.dimensions = dimensions
            .ok_or_else(|| VtkErrors::MalformedHeader(self.line, "missing DIMENSIONS".to_string()))?;

        let [nx, ny, nz] = header.dimensions;

        if nx == 0 || ny == 0 || nz == 0
        {
            return Err(VtkErrors::MalformedHeader(
                self.line,
                format!("zero sized dimensions {nx}x{ny}x{nz}")
            ));
        }
        if nx > self.options.get_max_width()
        {
            return Err(VtkErrors::TooLargeDimensions("width", nx, self.options.get_max_width()));
        }
        if ny > self.options.get_max_height()
        {
            return Err(VtkErrors::TooLargeDimensions("height", ny, self.options.get_max_height()));
        }
        if nz > self.options.get_max_depth()
        {
            return Err(VtkErrors::TooLargeDimensions("depth", nz, self.options.get_max_depth()));
        }
        let voxels = header
            .voxel_count()
            .ok_or(VtkErrors::TooLargeDimensions("voxel count", usize::MAX, usize::MAX))?;

        if let Some(count) = point_data
        {
            if count != voxels
            {
                return Err(VtkErrors::PointCountMismatch(voxels, count));
            }
        }

        debug!("VTK dimensions: {}x{}x{}", nx, ny, nz);
        debug!("VTK spacing: {:?}", header.spacing);
        debug!("VTK origin: {:?}", header.origin);
        trace!("VTK scalars: {} {:?}", header.scalars_name, header.depth);
        trace!("VTK encoding: {:?}", header.encoding);

        self.header = Some(header);

        Ok(())
    }

    /// Decode the file returning the scalars in file order
    pub fn decode(&mut self) -> Result<DecodingResult, VtkErrors>
    {
        self.decode_headers()?;

        let header = self.header.as_ref().ok_or(VtkErrors::Generic("Headers not decoded"))?;
        // checked during header decoding
        let voxels = header.voxel_count().unwrap_or(0);
        let depth = header.depth;
        let encoding = header.encoding;

        match encoding
        {
            VtkEncoding::Binary => self.decode_binary(voxels, depth),
            VtkEncoding::Ascii =>
            {
                if !self.options.vtk_allow_ascii()
                {
                    return Err(VtkErrors::AsciiNotAllowed);
                }
                self.decode_ascii(voxels, depth)
            }
        }
    }

    fn decode_binary(&mut self, voxels: usize, depth: BitDepth) -> Result<DecodingResult, VtkErrors>
    {
        let remaining = &self.data[self.position.min(self.data.len())..];
        let size = depth.size_of();

        let bytes = voxels
            .checked_mul(size)
            .ok_or(VtkErrors::TooLargeDimensions("payload size", usize::MAX, usize::MAX))?;

        if remaining.len() < bytes
        {
            return Err(VtkErrors::IncompleteData(voxels, remaining.len() / size));
        }
        let payload = &remaining[..bytes];
        self.position += bytes;

        let result = match depth
        {
            BitDepth::Eight => DecodingResult::U8(payload.to_vec()),
            BitDepth::Sixteen => DecodingResult::U16(
                payload
                    .chunks_exact(2)
                    .map(|x| u16::from_be_bytes([x[0], x[1]]))
                    .collect()
            )
        };
        Ok(result)
    }

    fn decode_ascii(&mut self, voxels: usize, depth: BitDepth) -> Result<DecodingResult, VtkErrors>
    {
        let remaining = &self.data[self.position.min(self.data.len())..];
        let text = core::str::from_utf8(remaining)
            .map_err(|_| VtkErrors::Generic("ASCII payload is not valid text"))?;

        let mut tokens = text.split_whitespace();

        let result = match depth
        {
            BitDepth::Eight => DecodingResult::U8(parse_scalars::<u8>(&mut tokens, voxels)?),
            BitDepth::Sixteen => DecodingResult::U16(parse_scalars::<u16>(&mut tokens, voxels)?)
        };
        self.position = self.data.len();

        Ok(result)
    }

    /// Return the decoded header, or `None` if headers
    /// were not decoded yet
    pub const fn header(&self) -> Option<&VtkHeader>
    {
        self.header.as_ref()
    }

    /// Return `(nx, ny, nz)` or `None` if headers were not decoded
    pub fn get_dimensions(&self) -> Option<(usize, usize, usize)>
    {
        self.header
            .as_ref()
            .map(|h| (h.dimensions[0], h.dimensions[1], h.dimensions[2]))
    }

    pub fn get_depth(&self) -> Option<BitDepth>
    {
        self.header.as_ref().map(|h| h.depth)
    }
}

fn parse_scalars<'b, T: FromStr>(
    tokens: &mut impl Iterator<Item = &'b str>, voxels: usize
) -> Result<Vec<T>, VtkErrors>
{
    let mut values = Vec::with_capacity(voxels);

    for token in tokens.take(voxels)
    {
        let value = token
            .parse::<T>()
            .map_err(|_| VtkErrors::InvalidScalar(token.to_string()))?;
        values.push(value);
    }
    if values.len() != voxels
    {
        return Err(VtkErrors::IncompleteData(voxels, values.len()));
    }
    Ok(values)
}

#[cfg(test)]
mod tests
{
    use super::*;

    const HEADER_U8: &[u8] = b"# vtk DataFile Version 3.0\n\
        test volume\n\
        BINARY\n\
        DATASET STRUCTURED_POINTS\n\
        DIMENSIONS 2 2 2\n\
        SPACING 1 1 2.5\n\
        ORIGIN 0 0 0\n\
        POINT_DATA 8\n\
        SCALARS scalars unsigned_char\n\
        LOOKUP_TABLE default\n";

    #[test]
    fn test_binary_u8()
    {
        let mut file = HEADER_U8.to_vec();
        file.extend_from_slice(&[0, 1, 2, 3, 4, 5, 6, 7]);
        file.push(b'\n');

        let mut decoder = VtkDecoder::new(&file);
        let pixels = decoder.decode().unwrap();

        assert_eq!(pixels, DecodingResult::U8(vec![0, 1, 2, 3, 4, 5, 6, 7]));

        let header = decoder.header().unwrap();
        assert_eq!(header.title, "test volume");
        assert_eq!(header.spacing, [1.0, 1.0, 2.5]);
        assert_eq!(decoder.get_dimensions(), Some((2, 2, 2)));
    }

    #[test]
    fn test_payload_may_contain_newline_bytes()
    {
        let mut file = HEADER_U8.to_vec();
        file.extend_from_slice(&[b'\n', b'\n', 10, 13, 0, 255, 10, 10]);

        let pixels = VtkDecoder::new(&file).decode().unwrap();
        assert_eq!(pixels, DecodingResult::U8(vec![10, 10, 10, 13, 0, 255, 10, 10]));
    }

    #[test]
    fn test_missing_lookup_table()
    {
        let file = b"# vtk DataFile Version 2.0\n\
            t\n\
            BINARY\n\
            DATASET STRUCTURED_POINTS\n\
            DIMENSIONS 2 1 1\n\
            SCALARS s unsigned_short 1\n\
            \x01\x02\x03\x04\n";

        let pixels = VtkDecoder::new(file).decode().unwrap();
        assert_eq!(pixels, DecodingResult::U16(vec![0x0102, 0x0304]));
    }

    #[test]
    fn test_lowercase_keywords_and_aspect_ratio()
    {
        let file = b"# vtk DataFile Version 2.0\n\
            t\n\
            ascii\n\
            dataset structured_points\n\
            dimensions 3 1 1\n\
            aspect_ratio 2 2 2\n\
            scalars s unsigned_char\n\
            lookup_table default\n\
            1 2\n3\n";

        let mut decoder = VtkDecoder::new(file);
        assert_eq!(decoder.decode().unwrap(), DecodingResult::U8(vec![1, 2, 3]));
        assert_eq!(decoder.header().unwrap().spacing, [2.0; 3]);
    }

    #[test]
    fn test_ascii_disallowed()
    {
        let file = b"# vtk DataFile Version 2.0\nt\nASCII\nDATASET STRUCTURED_POINTS\n\
            DIMENSIONS 1 1 1\nSCALARS s unsigned_char\n5\n";

        let options = DecoderOptions::default().set_vtk_allow_ascii(false);
        let err = VtkDecoder::new_with_options(file, options).decode().unwrap_err();

        assert!(matches!(err, VtkErrors::AsciiNotAllowed));
    }

    #[test]
    fn test_invalid_magic()
    {
        let err = VtkDecoder::new(b"P5\n2 2\n255\n").decode().unwrap_err();
        assert!(matches!(err, VtkErrors::InvalidMagic));

        let err = VtkDecoder::new(b"").decode().unwrap_err();
        assert!(matches!(err, VtkErrors::InvalidMagic));
    }

    #[test]
    fn test_max_depth_limit()
    {
        let mut file = HEADER_U8.to_vec();
        file.extend_from_slice(&[0; 8]);

        let options = DecoderOptions::default().set_max_depth(1);
        let err = VtkDecoder::new_with_options(&file, options)
            .decode_headers()
            .unwrap_err();

        assert!(matches!(err, VtkErrors::TooLargeDimensions("depth", 2, 1)));
    }
}
