/*!
 * File name exclusion rules for the scanner
 *
 * Patterns are matched against the bare file name, not the full path.
 * Supported forms:
 * - Plain glob: ".*", "*.tmp"
 * - Explicit glob: "glob:*~"
 * - Regex: "regex:^core\.[0-9]+$"
 */

use glob::Pattern as GlobPattern;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur while compiling exclusion patterns
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

/// A single compiled exclusion rule
#[derive(Debug, Clone)]
enum ExcludeRule {
    Glob(GlobPattern),
    Regex(Regex),
}

impl ExcludeRule {
    fn parse(pattern: &str) -> Result<Self, FilterError> {
        let pattern = pattern.trim();

        if let Some(rest) = pattern.strip_prefix("regex:") {
            let rest = rest.trim();
            let compiled = Regex::new(rest).map_err(|e| FilterError::InvalidRegex {
                pattern: rest.to_string(),
                source: e,
            })?;
            return Ok(ExcludeRule::Regex(compiled));
        }

        // Default to glob if no prefix specified
        let glob = pattern.strip_prefix("glob:").map(str::trim).unwrap_or(pattern);
        let compiled = GlobPattern::new(glob).map_err(|e| FilterError::InvalidGlob {
            pattern: glob.to_string(),
            source: e,
        })?;
        Ok(ExcludeRule::Glob(compiled))
    }

    fn matches(&self, file_name: &str) -> bool {
        match self {
            ExcludeRule::Glob(p) => p.matches(file_name),
            ExcludeRule::Regex(r) => r.is_match(file_name),
        }
    }

    fn pattern_string(&self) -> &str {
        match self {
            ExcludeRule::Glob(p) => p.as_str(),
            ExcludeRule::Regex(r) => r.as_str(),
        }
    }
}

/// A set of exclusion rules; a file is excluded if any rule matches
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    rules: Vec<ExcludeRule>,
}

impl ExcludeFilter {
    /// Create a filter that excludes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a filter from configured patterns
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let rules = patterns
            .iter()
            .map(|p| ExcludeRule::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The first rule matching a file name; `None` keeps the file
    pub fn matching_pattern(&self, file_name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(file_name))
            .map(ExcludeRule::pattern_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excludes(filter: &ExcludeFilter, name: &str) -> bool {
        filter.matching_pattern(name).is_some()
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let filter = ExcludeFilter::new();
        assert!(!excludes(&filter, ".hidden"));
        assert!(!excludes(&filter, "data.bin"));
    }

    #[test]
    fn test_default_dotfile_pattern() {
        let filter = ExcludeFilter::from_patterns(&[".*"]).unwrap();
        assert!(excludes(&filter, ".DS_Store"));
        assert!(excludes(&filter, ".gitignore"));
        assert!(!excludes(&filter, "reads.fasta"));
        assert!(!excludes(&filter, "a.b.c"));
    }

    #[test]
    fn test_glob_and_regex_patterns() {
        let filter =
            ExcludeFilter::from_patterns(&["glob:*~", "regex:^core\\.[0-9]+$", "*.tmp"]).unwrap();
        assert!(excludes(&filter, "notes.txt~"));
        assert!(excludes(&filter, "core.1234"));
        assert!(excludes(&filter, "scratch.tmp"));
        assert!(!excludes(&filter, "core.dump"));
        assert!(!excludes(&filter, "notes.txt"));
    }

    #[test]
    fn test_matching_pattern_reports_rule() {
        let filter = ExcludeFilter::from_patterns(&[".*", "*.log"]).unwrap();
        assert_eq!(filter.matching_pattern("run.log"), Some("*.log"));
        assert_eq!(filter.matching_pattern(".env"), Some(".*"));
        assert_eq!(filter.matching_pattern("run.txt"), None);
    }

    #[test]
    fn test_invalid_patterns() {
        let err = ExcludeFilter::from_patterns(&["[unclosed"]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidGlob { .. }));

        let err = ExcludeFilter::from_patterns(&["regex:(unclosed"]).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegex { .. }));
    }
}
