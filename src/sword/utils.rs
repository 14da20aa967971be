//! Low-level byte reading utilities

use std::slice::ChunksExact;

use byteorder::{ByteOrder, LittleEndian};
use log::warn;

use super::types::error::{Result, SwordError};
use super::types::models::TrailingBytes;

/// Splits an index stream into whole fixed-size records.
///
/// A partial record at the tail is dropped under `TrailingBytes::Truncate`
/// and rejected under `TrailingBytes::Reject`.
pub fn records<'a>(
    data: &'a [u8],
    record_size: usize,
    policy: TrailingBytes,
    context: &'static str,
) -> Result<ChunksExact<'a, u8>> {
    let remainder = data.len() % record_size;
    if remainder != 0 {
        match policy {
            TrailingBytes::Reject => {
                return Err(SwordError::TruncatedRecord {
                    context,
                    len: data.len(),
                    record_size,
                });
            }
            TrailingBytes::Truncate => {
                warn!(
                    "{}: ignoring {} trailing bytes ({} bytes, {}-byte records)",
                    context,
                    remainder,
                    data.len(),
                    record_size
                );
            }
        }
    }
    Ok(data.chunks_exact(record_size))
}

/// Read a little-endian u32 at `offset` within a record.
pub fn read_u32(record: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&record[offset..offset + 4])
}

/// Read a little-endian u16 at `offset` within a record.
pub fn read_u16(record: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&record[offset..offset + 2])
}
