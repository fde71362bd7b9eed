/*!
 * Size-balanced partitioning of files into bins
 *
 * Greedy heuristic:
 * 1. Sort the pool ascending by size and compute the goal size
 *    (total / bins, truncated).
 * 2. Seed every bin, in creation order, with the largest remaining file.
 * 3. Visit the bins in reverse creation order (smallest seed first). Each bin
 *    still below the goal takes the file that lands its total closest to the
 *    goal. Repeat until the pool is empty.
 * 4. If a whole pass assigns nothing (every bin is at or above the goal),
 *    the leftovers go round-robin, largest first, to the bins ordered by
 *    current total.
 *
 * The result approximates equal totals; it is not an optimal packing.
 */

use serde::Serialize;
use tracing::debug;

use super::bin::{Bin, BinLayout, FileEntry};
use crate::error::{FizzzError, Result};

/// The complete assignment of files to bins for one run
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    goal_size: u64,
    bins: Vec<Bin>,
}

impl Partition {
    /// Target total each bin was filled towards
    pub fn goal_size(&self) -> u64 {
        self.goal_size
    }

    /// Bins in creation order
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn total_size(&self) -> u64 {
        self.bins.iter().map(Bin::total_size).sum()
    }

    pub fn file_count(&self) -> usize {
        self.bins.iter().map(Bin::file_count).sum()
    }

    /// Difference between the largest and smallest bin total
    pub fn spread(&self) -> u64 {
        let totals = self.bins.iter().map(Bin::total_size);
        match (totals.clone().max(), totals.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }
}

/// Split `entries` into `bin_count` bins of roughly equal total size
///
/// Every bin receives at least one file, so there must be at least as many
/// entries as bins.
pub fn partition(
    entries: Vec<FileEntry>,
    bin_count: usize,
    layout: &BinLayout,
) -> Result<Partition> {
    if bin_count == 0 {
        return Err(FizzzError::Config(
            "Number of directories must be at least 1".to_string(),
        ));
    }
    if entries.len() < bin_count {
        return Err(FizzzError::InsufficientFiles {
            files: entries.len(),
            bins: bin_count,
        });
    }

    let mut pool = entries;
    pool.sort_by_key(|e| e.size);

    let total_size: u64 = pool.iter().map(|e| e.size).sum();
    let goal_size = total_size / bin_count as u64;
    debug!(
        "Partitioning {} file(s), {} bytes into {} bin(s), goal {} bytes",
        pool.len(),
        total_size,
        bin_count,
        goal_size
    );

    let mut bins: Vec<Bin> = (0..bin_count).map(|i| Bin::new(i, layout)).collect();

    for bin in bins.iter_mut() {
        if let Some(seed) = pool.pop() {
            debug!("Seeding {} with {} ({} bytes)", bin.name(), seed.path.display(), seed.size);
            bin.assign(seed);
        }
    }

    let fill_order: Vec<usize> = (0..bin_count).rev().collect();

    while !pool.is_empty() {
        let mut assigned_any = false;

        for &idx in &fill_order {
            let bin = &mut bins[idx];
            if bin.total_size() >= goal_size {
                continue;
            }
            let Some(pick) = closest_fit(&pool, goal_size, bin.total_size()) else {
                break;
            };

            let entry = pool.remove(pick);
            debug!(
                "Topping up {} ({} bytes) with {} ({} bytes)",
                bin.name(),
                bin.total_size(),
                entry.path.display(),
                entry.size
            );
            bin.assign(entry);
            assigned_any = true;
        }

        if !assigned_any {
            distribute_leftovers(&mut bins, std::mem::take(&mut pool));
        }
    }

    Ok(Partition { goal_size, bins })
}

/// Index of the pool entry bringing `current` closest to `goal`
///
/// Ties go to the first candidate, i.e. the smallest file.
fn closest_fit(pool: &[FileEntry], goal: u64, current: u64) -> Option<usize> {
    pool.iter()
        .enumerate()
        .min_by_key(|(_, e)| goal.abs_diff(current.saturating_add(e.size)))
        .map(|(idx, _)| idx)
}

/// Hand out what is left once every bin has reached the goal
fn distribute_leftovers(bins: &mut [Bin], pool: Vec<FileEntry>) {
    let mut order: Vec<usize> = (0..bins.len()).collect();
    order.sort_by_key(|&i| (bins[i].total_size(), i));

    debug!(
        "All bins at goal, distributing {} leftover file(s)",
        pool.len()
    );

    for (entry, &idx) in pool.into_iter().rev().zip(order.iter().cycle()) {
        debug!(
            "Leftover {} ({} bytes) -> {}",
            entry.path.display(),
            entry.size,
            bins[idx].name()
        );
        bins[idx].assign(entry);
    }
}
