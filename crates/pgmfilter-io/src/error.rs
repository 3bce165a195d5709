//! I/O error types
//!
//! Provides a unified error type for PGM decoding and encoding. Each
//! failure the codec can detect maps to one variant, so callers only need
//! to handle one error type.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for PGM I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// The input file does not exist
    #[error("couldn't read {}: file not found", .0.display())]
    FileNotFound(PathBuf),

    /// The magic token is not one this codec understands
    #[error("wrong format: {0}")]
    WrongFormat(String),

    /// The header or pixel payload is structurally invalid
    #[error("corrupt input: {0}")]
    CorruptData(String),

    /// The output file could not be created
    #[error("cannot create {}: {source}", .path.display())]
    CannotCreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Any other I/O error (permission denied, short write, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the core library (e.g. allocation failure)
    #[error("core error: {0}")]
    Core(#[from] pgmfilter_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
