/*!
 * Fizzz - File Size Subdirectory Sorter
 *
 * Splits the files of a directory into N subdirectories whose total sizes
 * are roughly equal:
 * - Non-recursive scan with glob/regex exclusions
 * - Greedy size-balancing partition
 * - Copy (with metadata) or move into `{prefix}{index}` directories
 * - Dry-run reporting
 */

pub mod cli_style;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{BalanceConfig, LogLevel, TransferMode};
pub use crate::core::{
    materialize, partition, plan, scan, Bin, BinLayout, FileEntry, MaterializeOutcome,
    MaterializeStats, Partition,
};
pub use error::{FizzzError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
