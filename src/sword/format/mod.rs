//! File format parsing layer for SWORD commentary modules.
//!
//! # Module Organization
//!
//! - [`streams`]: Finds and loads the per-testament stream files
//! - [`index`]: Parses the block directory and verse locator streams
//!
//! # Architecture
//!
//! ```text
//! Per testament:
//! ┌─────────────────┐
//! │  ot.bzs         │ ← index::read_block_index()
//! ├─────────────────┤
//! │  ot.bzv         │ ← index::read_verse_index()
//! ├─────────────────┤
//! │  ot.bzz         │ ← codec::compression::inflate_block()
//! │  (zlib blocks)  │
//! └─────────────────┘
//! ```

pub mod index;
pub mod streams;
