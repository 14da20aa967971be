//! Core data structures for SWORD commentary modules.
//!
//! This module defines the fundamental types used throughout the library:
//! - Block and verse locator records
//! - Testament, driver and layout enumerations
//! - Decode options, diagnostics and the per-module output

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use super::error::{Result, SwordError};

/// One half of a module, stored as an independent set of streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub const ALL: [Testament; 2] = [Testament::Old, Testament::New];

    /// File stem used by the module's streams (`ot.bzz`, `nt.czv`, ...).
    pub fn file_stem(&self) -> &'static str {
        match self {
            Testament::Old => "ot",
            Testament::New => "nt",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for Testament {
    type Err = SwordError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ot" | "old" => Ok(Self::Old),
            "nt" | "new" => Ok(Self::New),
            _ => Err(SwordError::InvalidCatalog(format!("Unknown testament: {}", s))),
        }
    }
}

/// A byte range inside the compressed block data stream.
///
/// The block's index is its position in the block index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub offset: u32,
    pub length: u32,
}

/// Locates one verse's raw text inside a decompressed block.
///
/// The position of a locator in the verse index is its sequential verse
/// index within the testament. A `length` of zero marks an absent verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseLocator {
    pub block_index: u32,
    pub offset_in_block: u32,
    pub length: u32,
}

impl VerseLocator {
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Record layout of the verse index stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLayout {
    /// 10-byte records: u32 block, u32 offset, u16 length.
    Compact,
    /// 12-byte records: u32 block, u32 offset, u32 length.
    Wide,
}

impl IndexLayout {
    /// Returns the byte width of one verse index record.
    pub fn record_size(&self) -> usize {
        match self {
            IndexLayout::Compact => 10,
            IndexLayout::Wide => 12,
        }
    }
}

/// The module driver declared in a module's configuration (`ModDrv=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleDriver {
    ZCom,
    ZCom4,
}

impl ModuleDriver {
    pub fn layout(&self) -> IndexLayout {
        match self {
            ModuleDriver::ZCom => IndexLayout::Compact,
            ModuleDriver::ZCom4 => IndexLayout::Wide,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModuleDriver::ZCom => "zCom",
            ModuleDriver::ZCom4 => "zCom4",
        }
    }

    /// Reads the driver from the text of a SWORD `.conf` file.
    pub fn from_conf(conf: &str) -> Result<Self> {
        conf.lines()
            .filter_map(|line| line.trim().split_once('='))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case("ModDrv"))
            .ok_or_else(|| SwordError::UnknownDriver("<no ModDrv entry>".to_string()))
            .and_then(|(_, value)| value.trim().parse())
    }

    pub fn from_conf_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
        Self::from_conf(&text)
    }
}

impl fmt::Display for ModuleDriver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModuleDriver {
    type Err = SwordError;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zcom" => Ok(Self::ZCom),
            "zcom4" => Ok(Self::ZCom4),
            _ => Err(SwordError::UnknownDriver(s.to_string())),
        }
    }
}

/// What to do with bytes left over after the last whole index record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBytes {
    /// Ignore the partial tail record (logged as a warning).
    #[default]
    Truncate,
    /// Fail with `SwordError::TruncatedRecord`.
    Reject,
}

/// Source markup dialect of the raw verse text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupDialect {
    /// OSIS structured markup (`<hi type="bold">`, `<reference>`, ...).
    #[default]
    Osis,
    /// HTML (`<span class="bld">`, `<a>`, entities).
    Html,
}

/// Texts with fewer characters than this are not treated as commentary.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 11;

/// Tunables for a module decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub min_text_chars: usize,
    pub trailing_bytes: TrailingBytes,
    pub dialect: MarkupDialect,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            trailing_bytes: TrailingBytes::default(),
            dialect: MarkupDialect::default(),
        }
    }
}

impl DecodeOptions {
    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    pub fn with_trailing_bytes(mut self, trailing_bytes: TrailingBytes) -> Self {
        self.trailing_bytes = trailing_bytes;
        self
    }

    pub fn with_dialect(mut self, dialect: MarkupDialect) -> Self {
        self.dialect = dialect;
        self
    }
}

/// A canonical book/chapter/verse position, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VerseRef {
    /// Position of the book in its testament's ordering.
    pub book_index: usize,
    pub chapter: u32,
    pub verse: u32,
    pub book_slug: &'static str,
}

impl VerseRef {
    /// Renders the canonical key, e.g. `genesis-1-1`.
    pub fn key(&self) -> String {
        format!("{}-{}-{}", self.book_slug, self.chapter, self.verse)
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}-{}", self.book_slug, self.chapter, self.verse)
    }
}

/// Why a verse was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BadBlock,
    OutOfBounds,
    TooShort,
    OutOfRange,
}

/// Per-module diagnostics collected while decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Verses written to the output.
    pub decoded: usize,
    /// Zero-length locators (absent verses, not errors).
    pub empty: usize,
    /// Verses whose block was missing, empty or corrupt.
    pub bad_block: usize,
    /// Verses whose slice ran past the end of the decompressed block.
    pub out_of_bounds: usize,
    /// Verses whose normalized text fell below the usable threshold.
    pub too_short: usize,
    /// Verses beyond the versification total.
    pub out_of_range: usize,
    /// Blocks actually inflated (cache misses).
    pub blocks_decompressed: usize,
    /// Testaments present in the module and decoded.
    pub testaments_decoded: Vec<Testament>,
    /// Testaments that were absent or unreadable.
    pub testaments_skipped: Vec<Testament>,
}

impl DecodeReport {
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::BadBlock => self.bad_block += 1,
            SkipReason::OutOfBounds => self.out_of_bounds += 1,
            SkipReason::TooShort => self.too_short += 1,
            SkipReason::OutOfRange => self.out_of_range += 1,
        }
    }

    /// Verses dropped for any reason other than being absent.
    pub fn skipped(&self) -> usize {
        self.bad_block + self.out_of_bounds + self.too_short + self.out_of_range
    }
}

/// The decoded mapping from canonical verse key to commentary text.
#[derive(Debug, Clone, Default)]
pub struct ModuleOutput {
    pub entries: BTreeMap<String, String>,
    pub report: DecodeReport,
}

impl ModuleOutput {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Serializes the entries as a single JSON object.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.entries)?
        } else {
            serde_json::to_string(&self.entries)?
        };
        Ok(json)
    }

    /// Writes the entries to `path` as a compact JSON object.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &self.entries)?;
        writer.flush()?;
        Ok(())
    }
}
