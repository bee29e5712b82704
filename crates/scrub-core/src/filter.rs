use glob::Pattern;

/// Glob-based filter for file paths that should never be reported
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<Pattern>,
}

impl PathFilter {
    /// Create a filter from pattern strings, dropping any that fail to compile
    pub fn new(patterns: Vec<String>) -> Self {
        let compiled: Vec<Pattern> = patterns
            .into_iter()
            .filter_map(|p| match Pattern::new(&p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    tracing::warn!("Ignoring invalid glob pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();

        Self { patterns: compiled }
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_ignores_nothing() {
        let filter = PathFilter::default();
        assert!(!filter.is_ignored("secret.txt"));
    }

    #[test]
    fn test_directory_patterns() {
        let filter = PathFilter::new(vec!["vendor/**".to_string(), "**/*.lock".to_string()]);

        assert!(filter.is_ignored("vendor/lib/a.go"));
        assert!(filter.is_ignored("Cargo.lock"));
        assert!(filter.is_ignored("sub/dir/yarn.lock"));
        assert!(!filter.is_ignored("src/vendor.rs"));
    }

    #[test]
    fn test_invalid_pattern_is_dropped() {
        let filter = PathFilter::new(vec!["[".to_string(), "*.pem".to_string()]);
        assert!(filter.is_ignored("key.pem"));
        assert!(!filter.is_ignored("["));
    }
}
