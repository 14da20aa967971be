//! Lazily populated cache of decompressed blocks.
//!
//! Blocks batch the text of many consecutive verses, so each block is
//! inflated at most once per decode. The cache borrows the testament's
//! block directory and data stream and is dropped with them.

use std::collections::hash_map::{Entry, HashMap};

use log::debug;

use super::codec::compression;
use super::types::error::{Result, SwordError};
use super::types::models::Block;

pub struct BlockCache<'a> {
    blocks: &'a [Block],
    data: &'a [u8],
    inflated: HashMap<u32, Vec<u8>>,
    decompressions: usize,
}

impl<'a> BlockCache<'a> {
    pub fn new(blocks: &'a [Block], data: &'a [u8]) -> Self {
        Self {
            blocks,
            data,
            inflated: HashMap::new(),
            decompressions: 0,
        }
    }

    /// Returns the decompressed bytes of block `index`, inflating on first use.
    ///
    /// # Errors
    /// - `BlockOutOfRange` if `index` is not in the block directory
    /// - `ZeroLengthBlock` if the directory entry is empty
    /// - `CorruptCompressedData` if the range lies outside the data stream
    ///   or the payload does not inflate
    ///
    /// Failures are not cached; a later request retries.
    pub fn get_block(&mut self, index: u32) -> Result<&[u8]> {
        match self.inflated.entry(index) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                let bytes = inflate(self.blocks, self.data, index)?;
                self.decompressions += 1;
                Ok(entry.insert(bytes).as_slice())
            }
        }
    }

    /// Number of blocks currently cached.
    pub fn len(&self) -> usize {
        self.inflated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inflated.is_empty()
    }

    /// Number of inflations performed (cache misses that succeeded).
    pub fn decompressions(&self) -> usize {
        self.decompressions
    }
}

fn inflate(blocks: &[Block], data: &[u8], index: u32) -> Result<Vec<u8>> {
    let block = blocks.get(index as usize).ok_or(SwordError::BlockOutOfRange {
        index,
        count: blocks.len(),
    })?;
    if block.length == 0 {
        return Err(SwordError::ZeroLengthBlock(index));
    }

    let start = block.offset as usize;
    let end = start + block.length as usize;
    let payload = data
        .get(start..end)
        .ok_or_else(|| SwordError::CorruptCompressedData {
            index,
            reason: format!(
                "range [{}..{}] exceeds data stream of {} bytes",
                start,
                end,
                data.len()
            ),
        })?;

    let bytes = compression::inflate_block(index, payload)?;
    debug!("Block {}: {} -> {} bytes", index, payload.len(), bytes.len());
    Ok(bytes)
}
