/*!
 * Core balancing operations: scan, partition, materialize
 */

pub mod bin;
pub mod dry_run;
pub mod filter;
pub mod materialize;
pub mod metadata;
pub mod partition;
pub mod scan;

pub use bin::{Bin, BinLayout, FileEntry};
pub use dry_run::{DryRunOperation, DryRunSimulator, DryRunSummary};
pub use filter::{ExcludeFilter, FilterError};
pub use materialize::{materialize, preflight, realize, simulate, MaterializeOutcome, MaterializeStats};
pub use partition::{partition, Partition};
pub use scan::{scan, scan_excluding};

use crate::config::BalanceConfig;
use crate::error::Result;

/// Scan the configured source directory and partition it
///
/// Nothing is written; pass the result to [`materialize`] to act on it.
pub fn plan(config: &BalanceConfig) -> Result<Partition> {
    config.validate()?;

    let filter = ExcludeFilter::from_patterns(config.exclude_patterns.as_slice())?;
    let entries = scan(&config.source_dir, &filter)?;
    let layout = BinLayout::new(&config.dest_dir, &config.prefix);

    partition(entries, config.bins, &layout)
}
