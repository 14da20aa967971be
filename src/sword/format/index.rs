//! # Index Stream Parsing
//!
//! Parses the two fixed-record index streams of a testament:
//!
//! ```text
//! Block index (*.bzs / *.czs), 12 bytes per record:
//! ┌────────────┬────────────┬────────────┐
//! │ offset u32 │ length u32 │ unused u32 │
//! └────────────┴────────────┴────────────┘
//!
//! Verse index (*.bzv / *.czv):
//! ┌───────────┬────────────┬─────────────────────────────┐
//! │ block u32 │ offset u32 │ length u16 (zCom)           │  10 bytes
//! │           │            │ length u32 (zCom4)          │  12 bytes
//! └───────────┴────────────┴─────────────────────────────┘
//! ```
//!
//! All integers are little-endian.

use log::debug;

use crate::sword::types::error::Result;
use crate::sword::types::models::{Block, IndexLayout, TrailingBytes, VerseLocator};
use crate::sword::utils;

/// Size of one block index record in bytes.
pub const BLOCK_RECORD_SIZE: usize = 12;

/// Parses the block directory into `(offset, length)` pairs.
///
/// The third field of each record is ignored.
pub fn read_block_index(data: &[u8], policy: TrailingBytes) -> Result<Vec<Block>> {
    let blocks: Vec<Block> = utils::records(data, BLOCK_RECORD_SIZE, policy, "block index")?
        .map(|record| Block {
            offset: utils::read_u32(record, 0),
            length: utils::read_u32(record, 4),
        })
        .collect();

    debug!("Block index: {} bytes, {} blocks", data.len(), blocks.len());
    Ok(blocks)
}

/// Parses the verse index into locators, one per sequential verse position.
pub fn read_verse_index(
    data: &[u8],
    layout: IndexLayout,
    policy: TrailingBytes,
) -> Result<Vec<VerseLocator>> {
    let locators: Vec<VerseLocator> =
        utils::records(data, layout.record_size(), policy, "verse index")?
            .map(|record| VerseLocator {
                block_index: utils::read_u32(record, 0),
                offset_in_block: utils::read_u32(record, 4),
                length: match layout {
                    IndexLayout::Compact => utils::read_u16(record, 8) as u32,
                    IndexLayout::Wide => utils::read_u32(record, 8),
                },
            })
            .collect();

    debug!(
        "Verse index ({:?}): {} bytes, {} locators",
        layout,
        data.len(),
        locators.len()
    );
    Ok(locators)
}
