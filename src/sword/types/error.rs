//! Custom error types for the sword-commentary crate.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum SwordError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The module directory itself does not exist.
    #[error("Module directory not found: {}", .0.display())]
    ModuleNotFound(PathBuf),

    /// A required index or data stream for a testament is absent.
    #[error("Missing {stream} stream: {}", .path.display())]
    StreamMissing { stream: &'static str, path: PathBuf },

    /// No testament of the module could be opened.
    #[error("No readable testament data in {}", .0.display())]
    NoTestamentData(PathBuf),

    /// An index stream length is not a multiple of its record size.
    #[error("Truncated {context}: {len} bytes is not a multiple of the {record_size}-byte record size")]
    TruncatedRecord {
        context: &'static str,
        len: usize,
        record_size: usize,
    },

    /// A verse locator points past the end of the block index.
    #[error("Block index {index} out of range ({count} blocks)")]
    BlockOutOfRange { index: u32, count: usize },

    /// A block directory entry has a length of zero.
    #[error("Block {0} has zero length")]
    ZeroLengthBlock(u32),

    /// A compressed block could not be inflated, or lies outside the data stream.
    #[error("Corrupt compressed data in block {index}: {reason}")]
    CorruptCompressedData { index: u32, reason: String },

    /// A verse slice extends past the end of its decompressed block.
    #[error("Verse range [{start}..{end}] is out of bounds for block of size {block_len}")]
    RangeOutOfBounds {
        start: usize,
        end: usize,
        block_len: usize,
    },

    /// A sequential verse index exceeds the testament's versification total.
    #[error("Verse index {index} out of range for {testament} ({total} verses)")]
    VerseOutOfRange {
        testament: &'static str,
        index: usize,
        total: usize,
    },

    /// The declared module driver is not one of the supported layouts.
    #[error("Unknown module driver: {0}. Only zCom and zCom4 are supported.")]
    UnknownDriver(String),

    /// The module catalog is structurally invalid.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Every module a batch conversion attempted failed to decode.
    #[error("All {failed} attempted modules failed; last error: {last}")]
    AllModulesFailed { failed: usize, last: Box<SwordError> },

    /// An error serializing or parsing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using the crate's `SwordError` type.
pub type Result<T> = std::result::Result<T, SwordError>;
