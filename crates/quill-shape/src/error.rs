//! Error types for the shaping binding.

use thiserror::Error;

/// Result type for shaping operations.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Errors that can occur while loading or driving the native library.
#[derive(Error, Debug)]
pub enum ShapeError {
    /// The HarfBuzz shared library failed to load.
    #[error("failed to load harfbuzz library: {0}")]
    LibraryLoad(String),

    /// Symbol lookup failed.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// The font data was rejected by the library.
    #[error("invalid font: {0}")]
    InvalidFont(String),

    /// A native create call returned null.
    #[error("allocation failed in {0}")]
    AllocFailed(&'static str),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
