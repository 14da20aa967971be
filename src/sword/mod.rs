//! Core SWORD commentary module decoder.
//!
//! # Module Organization
//!
//! - [`types`]: Errors and shared data structures
//! - [`format`]: Stream location and index parsing
//! - [`codec`]: Block decompression
//! - [`cache`]: Per-decode block cache
//! - [`versification`]: Sequential verse index → book/chapter/verse
//! - [`markup`]: OSIS/HTML to plain text
//! - [`reader`]: The module decoder
//! - [`catalog`]: Module lists for batch conversion
//! - [`convert`]: Parallel catalog conversion to JSON

pub mod cache;
pub mod catalog;
pub mod codec;
pub mod convert;
pub mod format;
pub mod markup;
pub mod reader;
pub mod types;
pub mod versification;
mod utils;

pub use reader::{decode_module, ModuleReader};
pub use types::error::{Result, SwordError};
