//! pgmfilter-io - PGM image I/O
//!
//! Decodes and encodes 8-bit grayscale PGM rasters:
//!
//! - `P5` binary graymaps (raw bytes)
//! - `P2` ASCII graymaps (whitespace-separated decimal samples)
//!
//! Decoding first tries the binary variant and falls back to the ASCII
//! variant before reporting an error.

mod error;
pub mod format;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{PgmEncoding, detect_encoding};
pub use pnm::{PgmHeader, read_header, read_pgm_ascii, read_pgm_binary, write_pgm_to};

use pgmfilter_core::GrayRaster;
use std::fs;
use std::io::{BufWriter, ErrorKind};
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Read a PGM image from a file path.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if the path does not exist
/// - [`IoError::WrongFormat`] if the file is neither `P5` nor `P2`
/// - [`IoError::CorruptData`] if the header or payload is invalid
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_pgm<P: AsRef<Path>>(path: P) -> IoResult<GrayRaster> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => IoError::FileNotFound(path.to_path_buf()),
        _ => IoError::Io(e),
    })?;
    read_pgm_mem(&data)
}

/// Read a PGM image from memory.
///
/// The binary decoder runs first; if it fails, the ASCII decoder is tried.
/// When both decoders reject the data, the more specific of the two errors
/// is returned (a corrupt `P5` file reports its corruption rather than a
/// magic-token mismatch from the ASCII attempt).
pub fn read_pgm_mem(data: &[u8]) -> IoResult<GrayRaster> {
    let binary_err = match read_pgm_binary(data) {
        Ok(raster) => {
            debug!(
                width = raster.width(),
                height = raster.height(),
                "decoded binary PGM"
            );
            return Ok(raster);
        }
        Err(e) => e,
    };

    if matches!(binary_err, IoError::WrongFormat(_)) {
        debug!(error = %binary_err, "trying ASCII PGM format");
    } else {
        warn!(error = %binary_err, "binary PGM decode failed, trying ASCII PGM format");
    }
    match read_pgm_ascii(data) {
        Ok(raster) => {
            debug!(
                width = raster.width(),
                height = raster.height(),
                "decoded ASCII PGM"
            );
            Ok(raster)
        }
        Err(IoError::WrongFormat(_)) if !matches!(binary_err, IoError::WrongFormat(_)) => {
            Err(binary_err)
        }
        Err(e) => Err(e),
    }
}

/// Write a raster as PGM to a file path.
///
/// # Errors
///
/// Returns [`IoError::CannotCreateFile`] if the file cannot be created.
#[instrument(skip_all, fields(path = %path.as_ref().display(), %encoding))]
pub fn write_pgm<P: AsRef<Path>>(
    raster: &GrayRaster,
    path: P,
    encoding: PgmEncoding,
) -> IoResult<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).map_err(|source| IoError::CannotCreateFile {
        path: path.to_path_buf(),
        source,
    })?;
    write_pgm_to(raster, BufWriter::new(file), encoding)?;
    debug!(
        width = raster.width(),
        height = raster.height(),
        "wrote PGM"
    );
    Ok(())
}

/// Encode a raster as PGM into a new byte buffer.
pub fn write_pgm_mem(raster: &GrayRaster, encoding: PgmEncoding) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_pgm_to(raster, &mut out, encoding)?;
    Ok(out)
}
