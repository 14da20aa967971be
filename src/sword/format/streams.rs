//! Locating and loading a testament's three streams inside a module directory.
//!
//! Modules ship each testament as three sibling files sharing one extension
//! family: `b` (`ot.bzs`, `ot.bzv`, `ot.bzz`) or `c` (`ot.czs`, ...). The
//! data directory may be nested anywhere below the module root
//! (`modules/comments/zcom/<name>/`), so the locator walks the tree.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::sword::types::error::{Result, SwordError};
use crate::sword::types::models::Testament;

/// The two file-extension families a module may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionFamily {
    /// `.bzs` / `.bzv` / `.bzz`
    Book,
    /// `.czs` / `.czv` / `.czz`
    Chapter,
}

impl ExtensionFamily {
    /// Probe order within a directory.
    pub const ALL: [ExtensionFamily; 2] = [ExtensionFamily::Book, ExtensionFamily::Chapter];

    pub fn prefix(&self) -> char {
        match self {
            ExtensionFamily::Book => 'b',
            ExtensionFamily::Chapter => 'c',
        }
    }

    fn file_name(&self, testament: Testament, suffix: char) -> String {
        format!("{}.{}z{}", testament.file_stem(), self.prefix(), suffix)
    }
}

/// Paths of one testament's block index, verse index and block data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamPaths {
    pub testament: Testament,
    pub family: ExtensionFamily,
    pub block_index: PathBuf,
    pub verse_index: PathBuf,
    pub data: PathBuf,
}

impl StreamPaths {
    fn new(dir: &Path, testament: Testament, family: ExtensionFamily) -> Self {
        Self {
            testament,
            family,
            block_index: dir.join(family.file_name(testament, 's')),
            verse_index: dir.join(family.file_name(testament, 'v')),
            data: dir.join(family.file_name(testament, 'z')),
        }
    }

    /// Reads all three streams into memory.
    pub fn load(&self) -> Result<TestamentStreams> {
        Ok(TestamentStreams {
            block_index: read_stream(&self.block_index, "block index")?,
            verse_index: read_stream(&self.verse_index, "verse index")?,
            data: read_stream(&self.data, "block data")?,
        })
    }
}

/// Whole-file contents of one testament's streams.
#[derive(Debug, Clone, Default)]
pub struct TestamentStreams {
    pub block_index: Vec<u8>,
    pub verse_index: Vec<u8>,
    pub data: Vec<u8>,
}

fn read_stream(path: &Path, stream: &'static str) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(SwordError::StreamMissing {
            stream,
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path)?;
    debug!("Read {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

/// Finds the directory holding `testament`'s block data file.
///
/// Directories are searched top-down, in name order; within a directory the
/// `b` family is preferred over `c`. Returns `None` when no data file exists.
pub fn locate(module_dir: &Path, testament: Testament) -> Result<Option<StreamPaths>> {
    if !module_dir.is_dir() {
        return Err(SwordError::ModuleNotFound(module_dir.to_path_buf()));
    }

    let mut pending = vec![module_dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        trace!("Probing {} for {} streams", dir.display(), testament);
        for family in ExtensionFamily::ALL {
            let candidate = StreamPaths::new(&dir, testament, family);
            if candidate.data.is_file() {
                debug!(
                    "Found {} streams ({}-family) in {}",
                    testament,
                    family.prefix(),
                    dir.display()
                );
                return Ok(Some(candidate));
            }
        }

        let mut children: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        // Reverse so the stack pops children in ascending name order.
        children.sort_by(|a, b| b.cmp(a));
        pending.extend(children);
    }

    Ok(None)
}
