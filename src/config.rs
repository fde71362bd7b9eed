/*!
 * Configuration types for Fizzz
 */

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FizzzError, Result};

/// Main configuration for a balancing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Number of target subdirectories (bins)
    #[serde(default = "get_cpu_count")]
    pub bins: usize,

    /// Directory holding the files to distribute
    #[serde(default = "default_dir")]
    pub source_dir: PathBuf,

    /// Base directory the subdirectories are created in
    #[serde(default = "default_dir")]
    pub dest_dir: PathBuf,

    /// Subdirectory name prefix, followed by the bin index
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Copy or move files into the subdirectories
    #[serde(default)]
    pub transfer_mode: TransferMode,

    /// Report the plan only, never touch the filesystem
    #[serde(default)]
    pub dry_run: bool,

    /// Allow populating subdirectories that already exist
    #[serde(default)]
    pub force: bool,

    /// Enable verbose logging (shorthand for log_level = debug)
    #[serde(default)]
    pub verbose: bool,

    /// Log level for diagnostic output
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log file path (None = stdout)
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// File name patterns skipped by the scanner (glob, or regex with a `regex:` prefix)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Emit the partition plan as JSON
    #[serde(default)]
    pub json_output: bool,

    /// Show a progress bar while realizing bins
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            bins: get_cpu_count(),
            source_dir: default_dir(),
            dest_dir: default_dir(),
            prefix: default_prefix(),
            transfer_mode: TransferMode::Copy,
            dry_run: false,
            force: false,
            verbose: false,
            log_level: LogLevel::Info,
            log_file: None,
            exclude_patterns: default_exclude_patterns(),
            json_output: false,
            show_progress: true,
        }
    }
}

/// How files reach their subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Copy files, preserving permissions and timestamps
    #[default]
    Copy,

    /// Move files out of the source directory
    Move,
}

impl TransferMode {
    pub fn verb(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only errors
    Error,

    /// Warnings and errors
    Warn,

    /// Info, warnings, and errors
    #[default]
    Info,

    /// Debug and above
    Debug,

    /// All messages including traces
    Trace,
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    "processor".to_string()
}

fn default_exclude_patterns() -> Vec<String> {
    vec![".*".to_string()]
}

impl BalanceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            FizzzError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| FizzzError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values no run can work with
    pub fn validate(&self) -> Result<()> {
        if self.bins == 0 {
            return Err(FizzzError::Config(
                "Number of directories must be at least 1".to_string(),
            ));
        }
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(FizzzError::Config(format!(
                "Invalid directory prefix '{}'",
                self.prefix
            )));
        }
        Ok(())
    }
}

/// Get the number of available CPU cores
pub fn get_cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = BalanceConfig::default();
        assert_eq!(config.transfer_mode, TransferMode::Copy);
        assert_eq!(config.prefix, "processor");
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert_eq!(config.dest_dir, PathBuf::from("."));
        assert_eq!(config.exclude_patterns, vec![".*".to_string()]);
        assert_eq!(config.bins, get_cpu_count());
        assert!(!config.dry_run);
        assert!(!config.force);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cpu_count() {
        let count = get_cpu_count();
        assert!(count > 0, "CPU count should be greater than 0");
    }

    #[test]
    fn test_validate_rejects_zero_bins() {
        let config = BalanceConfig {
            bins: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(FizzzError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        for prefix in ["", "a/b", "a\\b"] {
            let config = BalanceConfig {
                prefix: prefix.to_string(),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "prefix {:?}", prefix);
        }
    }

    #[test]
    fn test_transfer_mode_verb() {
        assert_eq!(TransferMode::Copy.verb(), "copy");
        assert_eq!(TransferMode::Move.verb(), "move");
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        assert_eq!(LogLevel::Info.to_tracing_level(), tracing::Level::INFO);
        assert_eq!(LogLevel::Debug.to_tracing_level(), tracing::Level::DEBUG);
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
    }

    #[test]
    fn test_partial_toml() {
        let toml_str = r#"
bins = 8
prefix = "shard"
transfer_mode = "move"
exclude_patterns = [".*", "*.tmp"]
"#;

        let config: BalanceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bins, 8);
        assert_eq!(config.prefix, "shard");
        assert_eq!(config.transfer_mode, TransferMode::Move);
        assert_eq!(config.exclude_patterns.len(), 2);
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert!(config.show_progress);
        assert!(!config.force);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fizzz.toml");

        let config = BalanceConfig {
            bins: 3,
            prefix: "part".to_string(),
            force: true,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = BalanceConfig::from_file(&path).unwrap();
        assert_eq!(loaded.bins, 3);
        assert_eq!(loaded.prefix, "part");
        assert!(loaded.force);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "bins = \"many\"").unwrap();

        assert!(matches!(
            BalanceConfig::from_file(&path),
            Err(FizzzError::Config(_))
        ));
    }
}
