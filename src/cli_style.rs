/*!
 * Fizzz CLI Style System
 *
 * Styled console output: the partition table, run summaries and
 * error/warning lines.
 */

use std::cmp::Ordering;

use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{style, StyledObject};

use crate::core::{DryRunSummary, MaterializeStats, Partition};

// ============================================================================
// THEME COLORS
// ============================================================================

/// Brand colors for consistent styling
pub struct Theme;

impl Theme {
    /// Primary accent color (cyan/blue)
    pub fn primary<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan()
    }

    /// Success color (green)
    pub fn success<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).green()
    }

    /// Warning color (yellow)
    pub fn warning<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).yellow()
    }

    /// Error color (red)
    pub fn error<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).red()
    }

    /// Muted/secondary text (dim)
    pub fn muted<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).dim()
    }

    /// Header style (bold cyan)
    pub fn header<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan().bold()
    }
}

// ============================================================================
// ICONS
// ============================================================================

/// Unicode icons for visual feedback
pub struct Icons;

impl Icons {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const INFO: &'static str = "ℹ";
    pub const FOLDER: &'static str = "📁";
    pub const ARROW_RIGHT: &'static str = "→";
}

// ============================================================================
// HEADERS
// ============================================================================

/// Program name and version line
pub fn print_banner() {
    println!(
        "\n{} {}",
        Theme::header("Fizzz"),
        Theme::muted(format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    println!("{}\n", Theme::muted("File Size Subdirectory Sorter"));
}

/// Draw a section header with a line
pub fn section_header(title: &str) {
    let line_len = 50 - title.len().min(40);
    println!(
        "\n{} {}",
        Theme::header(title),
        Theme::muted("─".repeat(line_len))
    );
}

// ============================================================================
// TABLES
// ============================================================================

/// Create a styled data table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a minimal table (no outer borders)
pub fn create_minimal_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_NO_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a key-value table for stats
pub fn stats_table(items: &[(&str, String)]) -> Table {
    let mut table = create_minimal_table();

    for (key, value) in items {
        table.add_row(vec![
            Cell::new(key).fg(Color::Cyan),
            Cell::new(value)
                .fg(Color::White)
                .add_attribute(Attribute::Bold),
        ]);
    }

    table
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// One row per bin: name, file count, total size and distance from the goal
pub fn partition_table(partition: &Partition) -> Table {
    let mut table = create_table();
    table.set_header(vec![
        header_cell("Directory"),
        header_cell("Files"),
        header_cell("Size"),
        header_cell("Bytes"),
        header_cell("vs Goal"),
    ]);

    let goal = partition.goal_size();
    for bin in partition.bins() {
        let delta = goal_delta(bin.total_size(), goal);
        let delta_color = match bin.total_size().cmp(&goal) {
            Ordering::Greater => Color::Yellow,
            Ordering::Less => Color::Magenta,
            Ordering::Equal => Color::Green,
        };

        table.add_row(vec![
            Cell::new(format!("{} {}", Icons::FOLDER, bin.name())),
            Cell::new(bin.file_count()).set_alignment(CellAlignment::Right),
            Cell::new(format_bytes(bin.total_size())).set_alignment(CellAlignment::Right),
            Cell::new(bin.total_size())
                .fg(Color::DarkGrey)
                .set_alignment(CellAlignment::Right),
            Cell::new(delta).fg(delta_color).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Totals shown under the partition table
pub fn partition_summary_table(partition: &Partition) -> Table {
    stats_table(&[
        ("Files", partition.file_count().to_string()),
        ("Total Size", format_bytes(partition.total_size())),
        ("Goal Per Directory", format_bytes(partition.goal_size())),
        ("Spread (max - min)", format_bytes(partition.spread())),
    ])
}

/// Summary of a completed copy/move run
pub fn materialize_summary_table(stats: &MaterializeStats) -> Table {
    let mut items = Vec::new();
    if stats.files_copied > 0 {
        items.push(("Files Copied", stats.files_copied.to_string()));
    }
    if stats.files_moved > 0 {
        items.push(("Files Moved", stats.files_moved.to_string()));
    }
    items.push(("Directories Created", stats.dirs_created.to_string()));
    items.push(("Data", format_bytes(stats.bytes_transferred)));
    items.push(("Duration", format_duration(stats.duration.as_secs_f64())));
    stats_table(&items)
}

/// Summary of what a dry run would have done
pub fn dry_run_summary_table(summary: &DryRunSummary) -> Table {
    let mut items = Vec::new();
    if summary.copy_count > 0 {
        items.push(("Files to copy", summary.copy_count.to_string()));
    }
    if summary.move_count > 0 {
        items.push(("Files to move", summary.move_count.to_string()));
    }
    items.push(("Directories to create", summary.mkdir_count.to_string()));
    if summary.reuse_count > 0 {
        items.push(("Existing directories reused", summary.reuse_count.to_string()));
    }
    items.push(("Total data size", format_bytes(summary.total_bytes)));
    stats_table(&items)
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Signed, human-readable distance of `total` from `goal`
pub fn goal_delta(total: u64, goal: u64) -> String {
    if total >= goal {
        format!("+{}", format_bytes(total - goal))
    } else {
        format!("-{}", format_bytes(goal - total))
    }
}

/// Format bytes into human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f = bytes as f64;
    let base = 1024.0_f64;
    let exp = (bytes_f.ln() / base.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f / base.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.2} {}", value, UNITS[exp])
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else if secs < 3600.0 {
        let mins = (secs / 60.0).floor();
        let remaining = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining)
    } else {
        let hours = (secs / 3600.0).floor();
        let mins = ((secs % 3600.0) / 60.0).floor();
        format!("{}h {}m", hours, mins)
    }
}

/// Print a styled error message with optional suggestion
pub fn print_error(message: &str, suggestion: Option<&str>) {
    eprintln!(
        "\n{} {}",
        Theme::error(format!("{} Error:", Icons::ERROR)),
        message
    );

    if let Some(hint) = suggestion {
        eprintln!(
            "  {} {}",
            Theme::muted(Icons::ARROW_RIGHT),
            Theme::muted(hint)
        );
    }
    eprintln!();
}

/// Print a styled warning message
pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        Theme::warning(Icons::WARNING.to_string()),
        Theme::warning(message)
    );
}

/// Print a styled success message
pub fn print_success(message: &str) {
    println!(
        "{} {}",
        Theme::success(Icons::SUCCESS.to_string()),
        Theme::success(message)
    );
}

/// Print a styled info message
pub fn print_info(message: &str) {
    println!("{} {}", Theme::primary(Icons::INFO.to_string()), message);
}

// ============================================================================
// TESTS
// ============================================================================
