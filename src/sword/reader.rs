use std::path::{Path, PathBuf};

use log::{debug, info, trace, warn};

use super::cache::BlockCache;
use super::format::index;
use super::format::streams::{self, TestamentStreams};
use super::markup;
use super::types::error::{Result, SwordError};
use super::types::models::*;
use super::versification::Versification;

/// Decodes one commentary module into a verse-key → text mapping.
///
/// A reader owns no decode state; every call to [`decode`](Self::decode)
/// builds its own block caches and output, so independent modules can be
/// decoded on separate threads.
#[derive(Debug, Clone)]
pub struct ModuleReader {
    module_dir: PathBuf,
    driver: ModuleDriver,
    options: DecodeOptions,
    versification: Versification,
}

impl ModuleReader {
    /// Creates a reader for the module rooted at `module_dir`.
    ///
    /// `driver` selects the verse index record layout; it is declared by the
    /// module's configuration and cannot be inferred from the streams.
    pub fn new(module_dir: impl AsRef<Path>, driver: ModuleDriver) -> Self {
        Self {
            module_dir: module_dir.as_ref().to_path_buf(),
            driver,
            options: DecodeOptions::default(),
            versification: Versification::KJV,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_versification(mut self, versification: Versification) -> Self {
        self.versification = versification;
        self
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    pub fn driver(&self) -> ModuleDriver {
        self.driver
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes every testament present in the module.
    ///
    /// # Errors
    /// - `ModuleNotFound` if the module directory does not exist
    /// - `NoTestamentData` if neither testament could be read
    ///
    /// Missing or unreadable testaments and bad verses are skipped and
    /// counted in the output's [`DecodeReport`].
    pub fn decode(&self) -> Result<ModuleOutput> {
        info!(
            "Decoding {} module: {}",
            self.driver,
            self.module_dir.display()
        );
        if !self.module_dir.is_dir() {
            return Err(SwordError::ModuleNotFound(self.module_dir.clone()));
        }

        let mut output = ModuleOutput::default();
        for testament in Testament::ALL {
            match self.decode_testament_dir(testament, &mut output) {
                Ok(true) => output.report.testaments_decoded.push(testament),
                Ok(false) => {
                    warn!("No {} data found in {}", testament, self.module_dir.display());
                    output.report.testaments_skipped.push(testament);
                }
                Err(e) => {
                    warn!("Skipping {} of {}: {}", testament, self.module_dir.display(), e);
                    output.report.testaments_skipped.push(testament);
                }
            }
        }

        if output.report.testaments_decoded.is_empty() {
            return Err(SwordError::NoTestamentData(self.module_dir.clone()));
        }

        let report = &output.report;
        info!(
            "Decoded {} verses from {} ({} blocks inflated, {} verses skipped)",
            output.entries.len(),
            self.module_dir.display(),
            report.blocks_decompressed,
            report.skipped()
        );
        Ok(output)
    }

    /// Returns `Ok(false)` when the module has no data file for `testament`.
    fn decode_testament_dir(
        &self,
        testament: Testament,
        output: &mut ModuleOutput,
    ) -> Result<bool> {
        let Some(paths) = streams::locate(&self.module_dir, testament)? else {
            return Ok(false);
        };
        let streams = paths.load()?;
        self.decode_testament(testament, &streams, output)?;
        Ok(true)
    }

    /// Decodes one testament's in-memory streams into `output`.
    ///
    /// # Errors
    /// Only index-level failures (a misaligned index under
    /// `TrailingBytes::Reject`) are returned; per-verse problems are counted.
    pub fn decode_testament(
        &self,
        testament: Testament,
        streams: &TestamentStreams,
        output: &mut ModuleOutput,
    ) -> Result<()> {
        let policy = self.options.trailing_bytes;
        let blocks = index::read_block_index(&streams.block_index, policy)?;
        let locators = index::read_verse_index(&streams.verse_index, self.driver.layout(), policy)?;
        info!(
            "{}: {} blocks, {} verse locators",
            testament,
            blocks.len(),
            locators.len()
        );

        let mut cache = BlockCache::new(&blocks, &streams.data);
        let before = output.report.clone();

        for (position, locator) in locators.iter().enumerate() {
            if locator.is_empty() {
                output.report.empty += 1;
                continue;
            }

            match self.decode_verse(testament, position, locator, &mut cache) {
                Ok((key, text)) => {
                    trace!("{} ({} bytes)", key, text.len());
                    if output.entries.insert(key.clone(), text).is_some() {
                        debug!("Duplicate verse key {}; keeping the later entry", key);
                    }
                    output.report.decoded += 1;
                }
                Err(reason) => output.report.record_skip(reason),
            }
        }

        output.report.blocks_decompressed += cache.decompressions();
        let skipped = output.report.skipped() - before.skipped();
        if skipped > 0 {
            warn!(
                "{}: skipped {} verses (bad block {}, out of bounds {}, too short {}, out of range {})",
                testament,
                skipped,
                output.report.bad_block - before.bad_block,
                output.report.out_of_bounds - before.out_of_bounds,
                output.report.too_short - before.too_short,
                output.report.out_of_range - before.out_of_range,
            );
        }
        Ok(())
    }

    fn decode_verse(
        &self,
        testament: Testament,
        position: usize,
        locator: &VerseLocator,
        cache: &mut BlockCache,
    ) -> std::result::Result<(String, String), SkipReason> {
        let raw = extract_verse(cache, locator).map_err(|e| {
            debug!("{} verse {}: {}", testament, position, e);
            match e {
                SwordError::RangeOutOfBounds { .. } => SkipReason::OutOfBounds,
                _ => SkipReason::BadBlock,
            }
        })?;

        let text = markup::normalize(raw, self.options.dialect);
        if text.chars().count() < self.options.min_text_chars {
            trace!("{} verse {}: text too short, skipped", testament, position);
            return Err(SkipReason::TooShort);
        }

        let verse = self.versification.lookup(testament, position).map_err(|e| {
            debug!("{}", e);
            SkipReason::OutOfRange
        })?;
        Ok((verse.key(), text))
    }
}

/// Slices a verse's raw bytes out of its (cached) decompressed block.
pub fn extract_verse<'c>(cache: &'c mut BlockCache, locator: &VerseLocator) -> Result<&'c [u8]> {
    let block = cache.get_block(locator.block_index)?;
    let start = locator.offset_in_block as usize;
    let end = start + locator.length as usize;
    block.get(start..end).ok_or(SwordError::RangeOutOfBounds {
        start,
        end,
        block_len: block.len(),
    })
}

/// Decodes the module at `module_dir` with default options.
pub fn decode_module(module_dir: impl AsRef<Path>, driver: ModuleDriver) -> Result<ModuleOutput> {
    ModuleReader::new(module_dir, driver).decode()
}
