/*!
 * Realizing a partition on disk
 *
 * All target directories are checked before any file is touched. After that,
 * bins are realized one after another; a failure part way through leaves the
 * files handled so far in place.
 */

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use super::bin::{Bin, FileEntry};
use super::dry_run::DryRunSimulator;
use super::metadata::copy_with_metadata;
use super::partition::Partition;
use crate::config::{BalanceConfig, TransferMode};
use crate::error::{FizzzError, Result};

/// Statistics about a materialization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub files_copied: u64,
    pub files_moved: u64,
    pub bytes_transferred: u64,
    pub dirs_created: u64,
    pub duration: Duration,
}

impl MaterializeStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn merge(&mut self, other: &MaterializeStats) {
        self.files_copied += other.files_copied;
        self.files_moved += other.files_moved;
        self.bytes_transferred += other.bytes_transferred;
        self.dirs_created += other.dirs_created;
    }
}

/// What a call to [`materialize`] did
#[derive(Debug)]
pub enum MaterializeOutcome {
    Realized {
        stats: MaterializeStats,
        existing: Vec<PathBuf>,
    },
    Simulated(DryRunSimulator),
}

/// Check every bin's target directory before anything is written
///
/// Returns the targets that already exist. Without `force` the first one is
/// an error.
pub fn preflight(partition: &Partition, force: bool) -> Result<Vec<PathBuf>> {
    let mut existing = Vec::new();

    for bin in partition.bins() {
        let target = bin.target();
        if !target.exists() {
            continue;
        }
        if !force {
            return Err(FizzzError::AlreadyExists(target.to_path_buf()));
        }
        if !target.is_dir() {
            return Err(FizzzError::InvalidPath(target.to_path_buf()));
        }
        warn!(
            "Destination {} already exists, continuing because of --force",
            target.display()
        );
        existing.push(target.to_path_buf());
    }

    Ok(existing)
}

/// Copy or move every file of `bin` into its target directory
pub fn realize(bin: &Bin, mode: TransferMode) -> Result<MaterializeStats> {
    realize_with_progress(bin, mode, &ProgressBar::hidden())
}

fn realize_with_progress(
    bin: &Bin,
    mode: TransferMode,
    progress: &ProgressBar,
) -> Result<MaterializeStats> {
    let mut stats = MaterializeStats::new();
    let target = bin.target();

    if !target.exists() {
        std::fs::create_dir_all(target)?;
        stats.dirs_created += 1;
        debug!("Created {}", target.display());
    }

    for entry in bin.entries() {
        let dest = destination_for(target, entry)?;
        let bytes = match mode {
            TransferMode::Copy => {
                let bytes = copy_with_metadata(&entry.path, &dest)?;
                stats.files_copied += 1;
                bytes
            }
            TransferMode::Move => {
                move_file(&entry.path, &dest)?;
                stats.files_moved += 1;
                entry.size
            }
        };
        stats.bytes_transferred += bytes;
        progress.inc(entry.size);
        debug!("{} {} -> {}", mode.verb(), entry.path.display(), dest.display());
    }

    info!(
        "Realized {}: {} file(s), {} bytes",
        bin.name(),
        bin.file_count(),
        bin.total_size()
    );
    Ok(stats)
}

/// Record what realizing `partition` would do, without touching the filesystem
pub fn simulate(partition: &Partition, config: &BalanceConfig) -> Result<DryRunSimulator> {
    let existing = preflight(partition, config.force)?;
    let mut sim = DryRunSimulator::new();

    for bin in partition.bins() {
        let target = bin.target();
        if existing.iter().any(|p| p == target) {
            sim.record_reuse(target);
        } else {
            sim.record_mkdir(target);
        }
        for entry in bin.entries() {
            let dest = destination_for(target, entry)?;
            sim.record_transfer(config.transfer_mode, &entry.path, &dest, entry.size);
        }
    }

    Ok(sim)
}

/// Realize a whole partition, or simulate it when `config.dry_run` is set
pub fn materialize(partition: &Partition, config: &BalanceConfig) -> Result<MaterializeOutcome> {
    if config.dry_run {
        return simulate(partition, config).map(MaterializeOutcome::Simulated);
    }

    let start_time = Instant::now();
    let existing = preflight(partition, config.force)?;

    let progress = if config.show_progress {
        let pb = ProgressBar::new(partition.total_size());
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) {msg}")
                .map_err(|e| FizzzError::Config(format!("Invalid progress template: {}", e)))?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut stats = MaterializeStats::new();
    for bin in partition.bins() {
        progress.set_message(bin.name().to_string());
        let bin_stats = realize_with_progress(bin, config.transfer_mode, &progress)?;
        stats.merge(&bin_stats);
    }
    progress.finish_and_clear();

    stats.duration = start_time.elapsed();
    Ok(MaterializeOutcome::Realized { stats, existing })
}

fn destination_for(target: &Path, entry: &FileEntry) -> Result<PathBuf> {
    let name = entry
        .file_name()
        .ok_or_else(|| FizzzError::InvalidPath(entry.path.clone()))?;
    Ok(target.join(name))
}

/// Rename, falling back to copy + remove only when the target is on another
/// filesystem. Any other rename failure is returned as is so a file is never
/// left in both places.
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    match std::fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!(
                "{} is on another filesystem than {}, copying instead",
                source.display(),
                dest.display()
            );
            copy_with_metadata(source, dest)?;
            std::fs::remove_file(source)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::CrossesDevices
}
