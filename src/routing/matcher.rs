//! Excluded-path matching.
//!
//! # Responsibilities
//! - Match path prefixes on segment boundaries (`/api` matches `/api/clubs`,
//!   not `/apiary`)
//! - Match exact paths (`/robots.txt`)
//! - Match static files by extension (last segment contains a dot)
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex, so matching stays O(n) in the number of rules
//! - Query strings are never part of the matched path

use crate::config::schema::ExclusionConfig;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix on segment boundaries.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher. A trailing slash on the prefix is
    /// ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        if self.prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Matches one exact path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Matches paths that name a file, i.e. whose last segment has an extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtensionMatcher;

impl Matcher for FileExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        path.rsplit('/')
            .next()
            .map(|segment| segment.contains('.'))
            .unwrap_or(false)
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Compile the configured exclusion rules.
    pub fn from_config(config: &ExclusionConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = Vec::new();
        for path in &config.exact {
            matchers.push(Box::new(ExactPathMatcher::new(path.clone())));
        }
        for prefix in &config.prefixes {
            matchers.push(Box::new(PathPrefixMatcher::new(prefix.clone())));
        }
        if config.skip_file_extensions {
            matchers.push(Box::new(FileExtensionMatcher));
        }
        Self::new(matchers)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, path: &str) -> bool {
        // Any matcher may pass (OR)
        self.matchers.iter().any(|m| m.matches(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_prefix_matcher() {
        let matcher = PathPrefixMatcher::new("/api");
        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/clubs"));
        assert!(!matcher.matches("/apiary"));
        assert!(!matcher.matches("/en/api"));

        let trailing = PathPrefixMatcher::new("/_next/");
        assert!(trailing.matches("/_next/static/chunk"));
    }

    #[test]
    fn test_root_prefix_matches_everything() {
        let matcher = PathPrefixMatcher::new("/");
        assert!(matcher.matches("/"));
        assert!(matcher.matches("/clubs"));
    }

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/robots.txt");
        assert!(matcher.matches("/robots.txt"));
        assert!(!matcher.matches("/robots.txt/x"));
        assert!(!matcher.matches("/en/robots.txt"));
    }

    #[test]
    fn test_file_extension_matcher() {
        let matcher = FileExtensionMatcher;
        assert!(matcher.matches("/favicon.ico"));
        assert!(matcher.matches("/assets/app.js"));
        assert!(!matcher.matches("/clubs/germany"));
        assert!(!matcher.matches("/v1.0/clubs"));
        assert!(!matcher.matches("/"));
    }

    #[test]
    fn test_default_exclusions() {
        let matcher = AnyMatcher::from_config(&ExclusionConfig::default());
        for path in ["/api/clubs", "/_next/static/x", "/robots.txt", "/sitemap.xml", "/favicon.ico", "/healthz", "/images/logo"] {
            assert!(matcher.matches(path), "{path} should be excluded");
        }
        for path in ["/", "/clubs", "/en/clubs", "/club/roundnet-berlin"] {
            assert!(!matcher.matches(path), "{path} should be localized");
        }
    }

    #[test]
    fn test_extensions_can_be_disabled() {
        let config = ExclusionConfig {
            prefixes: Vec::new(),
            exact: Vec::new(),
            skip_file_extensions: false,
        };
        let matcher = AnyMatcher::from_config(&config);
        assert!(matcher.is_empty());
        assert!(!matcher.matches("/favicon.ico"));
    }
}
