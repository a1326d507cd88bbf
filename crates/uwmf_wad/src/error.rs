//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`serde_json::Error`]
    #[cfg(feature = "serde")]
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    /// the map cannot be represented in UWMF
    #[error(transparent)]
    #[diagnostic(help("edit the map so it is finite and uses square tiles"))]
    UnsupportedGeometry(#[from] GeometryError),

    /// lump of {0} bytes does not fit in a WAD directory entry
    #[error("lump of {0} bytes does not fit in a WAD directory entry")]
    LumpTooLarge(usize),

    /// file is an invalid wad archive
    #[error("file is an invalid wad archive")]
    InvalidArchive,

    /// unable to find requested lump
    #[error("unable to find requested lump {0}")]
    LumpNotFound(#[from] LumpNotFoundError),

    /// {0}
    #[error("{0}")]
    CustomError(String),
}

/// Reasons a map is rejected before any bytes are produced
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// only non-infinite maps are supported
    #[error("only non-infinite maps are supported")]
    InfiniteMap,

    /// only maps with square tiles are supported
    #[error("only maps with square tiles are supported (found {width}x{height})")]
    NonSquareTile { width: u32, height: u32 },
}

/// Error type to provide further information when a lump has not been found
#[derive(Error, Diagnostic, Debug)]
pub enum LumpNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
