//! Decompression of module data blocks.
//!
//! Every block in a `zCom`/`zCom4` data stream is an independent zlib
//! (deflate with zlib header) stream.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::trace;

use crate::sword::types::error::{Result, SwordError};

/// Inflates one compressed block.
///
/// # Errors
/// Returns `CorruptCompressedData` if the payload is not a valid zlib stream.
pub fn inflate_block(index: u32, payload: &[u8]) -> Result<Vec<u8>> {
    trace!("Inflating block {}: {} compressed bytes", index, payload.len());
    let mut output = Vec::with_capacity(payload.len() * 4);
    let mut decoder = ZlibDecoder::new(payload);
    decoder
        .read_to_end(&mut output)
        .map_err(|e| SwordError::CorruptCompressedData {
            index,
            reason: format!("Zlib decompression failed: {}", e),
        })?;
    trace!("Block {} inflated to {} bytes", index, output.len());
    Ok(output)
}
