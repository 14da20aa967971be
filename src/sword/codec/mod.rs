//! Codec layer for block decompression.
//!
//! # Submodules
//!
//! - [`compression`][]: zlib/deflate block inflation

pub mod compression;
