//! Batch conversion of a [`Catalog`] into one JSON file per module.

use std::fs;
use std::path::PathBuf;

use log::{error, info, warn};
use rayon::prelude::*;

use super::catalog::{Catalog, ModuleEntry};
use super::reader::ModuleReader;
use super::types::error::{Result, SwordError};
use super::types::models::DecodeOptions;

/// A module that was decoded and written.
#[derive(Debug, Clone)]
pub struct ConvertedModule {
    pub output_path: PathBuf,
    pub verses: usize,
    pub skipped: usize,
    pub bytes: u64,
}

/// What happened to one catalog entry.
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted(ConvertedModule),
    /// The module directory does not exist under the source root.
    NotFound(PathBuf),
    Failed(SwordError),
}

/// One catalog entry and its outcome, in catalog order.
#[derive(Debug)]
pub struct ModuleConversion {
    pub name: String,
    pub outcome: ConversionOutcome,
}

impl ModuleConversion {
    /// Whether a decode was attempted (the directory existed).
    pub fn attempted(&self) -> bool {
        !matches!(self.outcome, ConversionOutcome::NotFound(_))
    }
}

/// Decodes every catalog module on a rayon pool of `jobs` threads
/// (`None` lets rayon choose) and writes each to its output path.
///
/// Per-module failures are reported in the returned list rather than
/// aborting the batch. Only setup failures (creating the output
/// directory, building the pool) are returned as errors.
pub fn convert_catalog(
    catalog: &Catalog,
    options: DecodeOptions,
    jobs: Option<usize>,
) -> Result<Vec<ModuleConversion>> {
    fs::create_dir_all(&catalog.output_dir)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or(0))
        .build()
        .map_err(|e| SwordError::Io(std::io::Error::other(e)))?;

    Ok(pool.install(|| {
        catalog
            .modules
            .par_iter()
            .map(|entry| ModuleConversion {
                name: entry.name.clone(),
                outcome: convert_module(catalog, entry, options),
            })
            .collect()
    }))
}

fn convert_module(
    catalog: &Catalog,
    entry: &ModuleEntry,
    options: DecodeOptions,
) -> ConversionOutcome {
    let module_dir = catalog.module_dir(entry);
    if !module_dir.is_dir() {
        warn!("Skipping {}: directory not found ({})", entry.name, module_dir.display());
        return ConversionOutcome::NotFound(module_dir);
    }

    match write_module(catalog, entry, module_dir, options) {
        Ok(converted) => ConversionOutcome::Converted(converted),
        Err(e) => {
            error!("{}: {}", entry.name, e);
            ConversionOutcome::Failed(e)
        }
    }
}

fn write_module(
    catalog: &Catalog,
    entry: &ModuleEntry,
    module_dir: PathBuf,
    options: DecodeOptions,
) -> Result<ConvertedModule> {
    let decoded = ModuleReader::new(module_dir, entry.driver()?)
        .with_options(options)
        .decode()?;

    let output_path = catalog.output_path(entry);
    decoded.write_json(&output_path)?;
    let bytes = fs::metadata(&output_path)?.len();
    info!("Wrote {} ({:.1} MB)", output_path.display(), bytes as f64 / 1024.0 / 1024.0);

    Ok(ConvertedModule {
        output_path,
        verses: decoded.len(),
        skipped: decoded.report.skipped(),
        bytes,
    })
}

/// Fails with [`SwordError::AllModulesFailed`] when at least one module
/// was attempted and none of the attempts succeeded. The error carries
/// the last failure in catalog order.
pub fn ensure_any_converted(results: Vec<ModuleConversion>) -> Result<()> {
    let mut failed = 0;
    let mut last = None;
    for result in results {
        match result.outcome {
            ConversionOutcome::Converted(_) => return Ok(()),
            ConversionOutcome::NotFound(_) => {}
            ConversionOutcome::Failed(e) => {
                failed += 1;
                last = Some(e);
            }
        }
    }
    match last {
        Some(last) => Err(SwordError::AllModulesFailed {
            failed,
            last: Box::new(last),
        }),
        None => Ok(()),
    }
}
