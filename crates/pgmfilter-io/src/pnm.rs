//! PGM (Portable Gray Map) format support
//!
//! Reads and writes 8-bit PGM in both the binary (`P5`) and the ASCII
//! (`P2`) variant.
//!
//! # Header layout
//!
//! ```text
//! P5                      magic token
//! # any number of comments
//! <width> <height>
//! <maxval>                expected to be 255
//! <payload>               raw bytes (P5) or decimal samples (P2)
//! ```
//!
//! Comment lines start with `#` and may appear before any header token.

use crate::format::{PgmEncoding, detect_encoding};
use crate::{IoError, IoResult};
use pgmfilter_core::{GrayRaster, MAX_PIXEL_VALUE};
use std::io::Write;
use tracing::warn;

/// Name written into the header comment of every encoded file.
pub const PRODUCER_NAME: &str = "pgmfilter";

/// Parsed PGM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    /// Sample encoding selected by the magic token
    pub encoding: PgmEncoding,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Declared maximum sample value
    pub max_value: u32,
}

impl PgmHeader {
    /// Number of samples the payload must contain.
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Whitespace as understood by the PGM header grammar (includes `\v`).
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Cursor over the header tokens of a PGM file.
struct HeaderCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and any run of `#` comment lines.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.pos < self.data.len() && is_space(self.data[self.pos]) {
                self.pos += 1;
            }
            if self.pos < self.data.len() && self.data[self.pos] == b'#' {
                while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Read an unsigned decimal header field.
    fn read_number(&mut self, what: &str) -> IoResult<u32> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::CorruptData(format!("missing {what} in header")));
        }
        // Only ASCII digits were consumed, so the slice is valid UTF-8.
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| IoError::CorruptData(format!("{what} out of range in header")))
    }
}

/// Parse the header of a PGM file.
///
/// # Returns
///
/// The header and the byte offset at which the payload begins. For `P5`
/// the offset is past the single whitespace byte that ends the header.
///
/// # Errors
///
/// - [`IoError::WrongFormat`] if the magic token is neither `P2` nor `P5`
/// - [`IoError::CorruptData`] if a header field is missing or invalid
pub fn read_header(data: &[u8]) -> IoResult<(PgmHeader, usize)> {
    let encoding = detect_encoding(data).ok_or_else(|| {
        let found = String::from_utf8_lossy(&data[..data.len().min(2)]).into_owned();
        IoError::WrongFormat(format!("expected P2 or P5 magic, found {found:?}"))
    })?;

    let mut cursor = HeaderCursor::new(data);
    cursor.pos = 2;
    let width = cursor.read_number("width")?;
    let height = cursor.read_number("height")?;
    let max_value = cursor.read_number("max value")?;

    if width == 0 || height == 0 {
        return Err(IoError::CorruptData(format!(
            "invalid dimensions {width}x{height}"
        )));
    }
    if max_value != MAX_PIXEL_VALUE as u32 {
        warn!(
            max_value,
            "PGM max value is not 255; samples are read unscaled"
        );
    }

    if encoding == PgmEncoding::Binary {
        match cursor.data.get(cursor.pos) {
            Some(&b) if is_space(b) => cursor.pos += 1,
            _ => {
                return Err(IoError::CorruptData(
                    "missing whitespace after max value".to_string(),
                ));
            }
        }
    }

    let header = PgmHeader {
        encoding,
        width,
        height,
        max_value,
    };
    Ok((header, cursor.pos))
}

/// Decode a binary (`P5`) PGM.
///
/// # Errors
///
/// - [`IoError::WrongFormat`] if the data is not a `P5` file
/// - [`IoError::CorruptData`] if fewer than `width*height` bytes follow
///   the header
pub fn read_pgm_binary(data: &[u8]) -> IoResult<GrayRaster> {
    if detect_encoding(data) != Some(PgmEncoding::Binary) {
        return Err(IoError::WrongFormat("not a binary PGM (P5)".to_string()));
    }
    let (header, offset) = read_header(data)?;
    let expected = header.sample_count();
    let payload = &data[offset..];
    if payload.len() < expected {
        return Err(IoError::CorruptData(format!(
            "read {} pixels, expected {}",
            payload.len(),
            expected
        )));
    }

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(expected)
        .map_err(|_| pgmfilter_core::Error::AllocationFailed(expected))?;
    samples.extend_from_slice(&payload[..expected]);
    Ok(GrayRaster::from_data(header.width, header.height, samples)?)
}

/// Decode an ASCII (`P2`) PGM.
///
/// Every sample must be a decimal integer in `[0, 255]` and the payload
/// must contain exactly `width*height` samples.
///
/// # Errors
///
/// - [`IoError::WrongFormat`] if the data is not a `P2` file
/// - [`IoError::CorruptData`] on an out-of-range sample, a non-numeric
///   token, or a pixel-count mismatch
pub fn read_pgm_ascii(data: &[u8]) -> IoResult<GrayRaster> {
    if detect_encoding(data) != Some(PgmEncoding::Ascii) {
        return Err(IoError::WrongFormat("not an ASCII PGM (P2)".to_string()));
    }
    let (header, offset) = read_header(data)?;
    let expected = header.sample_count();

    let mut samples = Vec::new();
    samples
        .try_reserve_exact(expected)
        .map_err(|_| pgmfilter_core::Error::AllocationFailed(expected))?;

    let mut count = 0usize;
    for token in data[offset..]
        .split(|&b| is_space(b))
        .filter(|t| !t.is_empty())
    {
        let value = std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or_else(|| {
                IoError::CorruptData(format!(
                    "unexpected token {:?} in pixel data",
                    String::from_utf8_lossy(token)
                ))
            })?;
        if !(0..=MAX_PIXEL_VALUE as i64).contains(&value) {
            return Err(IoError::CorruptData(format!(
                "pixel value {value} is not in [0-255]"
            )));
        }
        if count < expected {
            samples.push(value as u8);
        }
        count += 1;
    }

    if count != expected {
        return Err(IoError::CorruptData(format!(
            "read {count} pixels, expected {expected}"
        )));
    }
    Ok(GrayRaster::from_data(header.width, header.height, samples)?)
}

/// Encode a raster as PGM into a writer.
///
/// Writes the magic token, a comment naming the producer, the dimensions
/// and a max value of 255, followed by the samples: raw bytes for `P5`,
/// one decimal value per line for `P2`.
pub fn write_pgm_to<W: Write>(
    raster: &GrayRaster,
    mut writer: W,
    encoding: PgmEncoding,
) -> IoResult<()> {
    writer.write_all(encoding.magic())?;
    writeln!(writer)?;
    writeln!(writer, "# processed by {PRODUCER_NAME}")?;
    writeln!(writer, "{} {}", raster.width(), raster.height())?;
    writeln!(writer, "{MAX_PIXEL_VALUE}")?;

    match encoding {
        PgmEncoding::Binary => writer.write_all(raster.data())?,
        PgmEncoding::Ascii => {
            for &v in raster.data() {
                writeln!(writer, "{v}")?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
