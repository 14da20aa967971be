//! Builders for synthetic module streams.
#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use sword_commentary::sword::format::streams::TestamentStreams;
use sword_commentary::{IndexLayout, Testament, VerseLocator};

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("compress");
    encoder.finish().expect("finish compression")
}

pub fn block_index_bytes(blocks: &[(u32, u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    for &(offset, length) in blocks {
        out.extend_from_slice(&offset.to_le_bytes());
        out.extend_from_slice(&length.to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes());
    }
    out
}

pub fn verse_index_bytes(locators: &[VerseLocator], layout: IndexLayout) -> Vec<u8> {
    let mut out = Vec::new();
    for loc in locators {
        out.extend_from_slice(&loc.block_index.to_le_bytes());
        out.extend_from_slice(&loc.offset_in_block.to_le_bytes());
        match layout {
            IndexLayout::Compact => out.extend_from_slice(&(loc.length as u16).to_le_bytes()),
            IndexLayout::Wide => out.extend_from_slice(&loc.length.to_le_bytes()),
        }
    }
    out
}

pub fn locator(block_index: u32, offset_in_block: u32, length: u32) -> VerseLocator {
    VerseLocator {
        block_index,
        offset_in_block,
        length,
    }
}

/// Lays verse texts out at sequential positions, several verses per block.
pub struct TestamentBuilder {
    verses: Vec<Option<Vec<u8>>>,
    per_block: usize,
}

impl TestamentBuilder {
    pub fn new(per_block: usize) -> Self {
        Self {
            verses: Vec::new(),
            per_block,
        }
    }

    pub fn verse(mut self, position: usize, text: impl AsRef<[u8]>) -> Self {
        if self.verses.len() <= position {
            self.verses.resize(position + 1, None);
        }
        self.verses[position] = Some(text.as_ref().to_vec());
        self
    }

    /// Appends an absent verse (zero-length locator) at the end.
    pub fn absent(mut self) -> Self {
        self.verses.push(None);
        self
    }

    pub fn build(&self, layout: IndexLayout) -> TestamentStreams {
        let mut blocks = Vec::new();
        let mut data = Vec::new();
        let mut locators = Vec::new();

        for (block_number, chunk) in self.verses.chunks(self.per_block).enumerate() {
            let mut raw = Vec::new();
            for verse in chunk {
                match verse {
                    Some(text) => {
                        let offset = raw.len() as u32;
                        locators.push(locator(block_number as u32, offset, text.len() as u32));
                        raw.extend_from_slice(text);
                    }
                    None => locators.push(locator(0, 0, 0)),
                }
            }
            let compressed = zlib(&raw);
            blocks.push((data.len() as u32, compressed.len() as u32));
            data.extend_from_slice(&compressed);
        }

        TestamentStreams {
            block_index: block_index_bytes(&blocks),
            verse_index: verse_index_bytes(&locators, layout),
            data,
        }
    }

    /// Writes `<t>.<p>zs`, `<t>.<p>zv` and `<t>.<p>zz` into `dir`.
    pub fn write(&self, dir: &Path, testament: Testament, prefix: char, layout: IndexLayout) {
        write_streams(dir, testament, prefix, &self.build(layout));
    }
}

pub fn write_streams(dir: &Path, testament: Testament, prefix: char, streams: &TestamentStreams) {
    fs::create_dir_all(dir).expect("create module dir");
    let stem = testament.file_stem();
    let path = |kind: char| dir.join(format!("{}.{}z{}", stem, prefix, kind));
    fs::write(path('s'), &streams.block_index).expect("write block index");
    fs::write(path('v'), &streams.verse_index).expect("write verse index");
    fs::write(path('z'), &streams.data).expect("write block data");
}
