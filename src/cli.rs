//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use sword_commentary::{DecodeOptions, MarkupDialect, ModuleDriver, Testament, TrailingBytes};

/// Convert SWORD commentary modules to verse-keyed JSON
#[derive(Parser, Debug)]
#[command(name = "sword-commentary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by the decoding commands.
#[derive(clap::Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Discard commentary shorter than this many characters
    #[arg(long, default_value_t = sword_commentary::DEFAULT_MIN_TEXT_CHARS)]
    pub min_chars: usize,

    /// Reject index streams whose length is not a whole number of records
    #[arg(long)]
    pub strict: bool,

    /// Treat verse text as HTML instead of OSIS markup
    #[arg(long)]
    pub html: bool,
}

impl DecodeArgs {
    pub fn options(&self) -> DecodeOptions {
        DecodeOptions::default()
            .with_min_text_chars(self.min_chars)
            .with_trailing_bytes(if self.strict {
                TrailingBytes::Reject
            } else {
                TrailingBytes::Truncate
            })
            .with_dialect(if self.html {
                MarkupDialect::Html
            } else {
                MarkupDialect::Osis
            })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a single module directory
    Decode {
        /// Module directory (searched recursively for ot/nt streams)
        dir: PathBuf,

        /// Module driver: zCom (10-byte verse records) or zCom4 (12-byte)
        #[arg(long, value_parser = parse_driver, required_unless_present = "conf")]
        driver: Option<ModuleDriver>,

        /// Read the driver from a SWORD .conf file (ModDrv=)
        #[arg(long, conflicts_with = "driver")]
        conf: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Decode every module of a catalog, one worker per module
    Convert {
        /// Catalog JSON file (built-in module list if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Override the catalog's source directory
        #[arg(long)]
        source: Option<PathBuf>,

        /// Override the catalog's output directory
        #[arg(long)]
        out: Option<PathBuf>,

        /// Number of modules decoded concurrently (default: all cores)
        #[arg(short, long)]
        jobs: Option<usize>,

        #[command(flatten)]
        decode: DecodeArgs,
    },

    /// Print the verse key for a sequential verse index
    Lookup {
        /// Testament: ot or nt
        #[arg(value_parser = parse_testament)]
        testament: Testament,

        /// 0-based sequential verse index
        index: usize,
    },
}

fn parse_driver(s: &str) -> Result<ModuleDriver, String> {
    s.parse().map_err(|e: sword_commentary::SwordError| e.to_string())
}

fn parse_testament(s: &str) -> Result<Testament, String> {
    s.parse().map_err(|e: sword_commentary::SwordError| e.to_string())
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
