/*!
 * Dry-run simulation mode
 *
 * Records what a materialization would do without touching the filesystem.
 */

use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::TransferMode;

/// Dry-run operation tracker
#[derive(Debug, Clone, Default)]
pub struct DryRunSimulator {
    operations: Vec<DryRunOperation>,
}

/// Types of operations that can be simulated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DryRunOperation {
    CreateDirectory {
        path: PathBuf,
    },
    /// Target exists and --force lets the run populate it anyway
    ReuseDirectory {
        path: PathBuf,
    },
    Transfer {
        mode: TransferMode,
        source: PathBuf,
        dest: PathBuf,
        size: u64,
    },
}

impl DryRunSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory creation
    pub fn record_mkdir(&mut self, path: &Path) {
        info!("[DRY-RUN] Would create directory: {}", path.display());
        self.operations.push(DryRunOperation::CreateDirectory {
            path: path.to_path_buf(),
        });
    }

    /// Record writing into an already existing directory
    pub fn record_reuse(&mut self, path: &Path) {
        info!("[DRY-RUN] Would reuse existing directory: {}", path.display());
        self.operations.push(DryRunOperation::ReuseDirectory {
            path: path.to_path_buf(),
        });
    }

    /// Record a copy or move
    pub fn record_transfer(&mut self, mode: TransferMode, source: &Path, dest: &Path, size: u64) {
        info!(
            "[DRY-RUN] Would {}: {} -> {} ({} bytes)",
            mode.verb(),
            source.display(),
            dest.display(),
            size
        );
        self.operations.push(DryRunOperation::Transfer {
            mode,
            source: source.to_path_buf(),
            dest: dest.to_path_buf(),
            size,
        });
    }

    /// Get summary statistics
    pub fn summary(&self) -> DryRunSummary {
        let mut summary = DryRunSummary::default();

        for op in &self.operations {
            match op {
                DryRunOperation::CreateDirectory { .. } => summary.mkdir_count += 1,
                DryRunOperation::ReuseDirectory { .. } => summary.reuse_count += 1,
                DryRunOperation::Transfer { mode, size, .. } => {
                    match mode {
                        TransferMode::Copy => summary.copy_count += 1,
                        TransferMode::Move => summary.move_count += 1,
                    }
                    summary.total_bytes += size;
                }
            }
        }

        summary
    }
}

/// Summary statistics for dry-run operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DryRunSummary {
    pub copy_count: usize,
    pub move_count: usize,
    pub mkdir_count: usize,
    pub reuse_count: usize,
    pub total_bytes: u64,
}
