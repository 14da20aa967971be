//! # sword-commentary
//!
//! A decoder for compressed SWORD commentary modules (`zCom` and `zCom4`).
//! Turns a module's per-testament block index, verse index and zlib block
//! streams into a mapping from canonical verse keys (`genesis-1-1`) to
//! plain commentary text.
//!
//! ```no_run
//! use sword_commentary::{ModuleDriver, ModuleReader};
//!
//! let output = ModuleReader::new("data/sword-modules/MHC", ModuleDriver::ZCom4)
//!     .decode()
//!     .unwrap();
//! println!("{:?}", output.get("genesis-1-1"));
//! ```
pub mod sword;

// Re-export the main types for convenience
pub use sword::{
    catalog::{Catalog, ModuleEntry},
    decode_module,
    types::models::{
        Block,
        DecodeOptions,
        DecodeReport,
        DEFAULT_MIN_TEXT_CHARS,
        IndexLayout,
        MarkupDialect,
        ModuleDriver,
        ModuleOutput,
        Testament,
        TrailingBytes,
        VerseLocator,
        VerseRef,
    },
    ModuleReader,
    Result,
    SwordError,
};
