//! Replace a range of lines in a text file, keeping a `.bak` copy of the original.
//!
//! One run reads the target, swaps lines `start_line..=end_line` (1-based) for
//! a replacement block, copies the original to `<path>.bak` and writes the
//! result over the target. Runs against the same file must not overlap.

// Splice configuration
pub mod config;

// File operations module
pub mod file;

// Line range policy
pub mod range;

// Splice engine
pub mod splice;

// JSON output module
pub mod json;

// Tracing setup
pub mod logging;

// Re-exports
pub use config::{SpliceConfig, ConfigError, load_config, parse_config};
pub use file::{FileContent, FileError, read_file, backup_path, create_backup, checksum};
pub use range::{LineRange, RangePolicy, RangeError, SliceBounds};
pub use splice::{
    SpliceOutcome, SpliceReport, SpliceError,
    document_newline, inserted_block, splice_lines, splice_file, verify_checksum,
};
pub use json::{SpliceResponse, generate_execution_id};
