//! Per-request locale resolution.
//!
//! # Responsibilities
//! - Pass excluded paths through untouched
//! - Accept an explicit locale prefix as authoritative
//! - Detect a locale for unprefixed paths and build the redirect target
//!
//! # Design Decisions
//! - Pure function of its inputs; immutable after construction
//! - Exclusions are checked before any locale logic
//! - Total: there is no failed resolution, only fallback to the default

use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::locale::{detect_locale, localize, Locale, UrlLocalizer};
use crate::routing::matcher::{AnyMatcher, Matcher};

/// Request signals relevant to locale resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveRequest<'a> {
    /// URL path, starting with `/`.
    pub path: &'a str,
    /// Raw query string without the `?`.
    pub query: Option<&'a str>,
    /// Value of the locale preference cookie.
    pub cookie_locale: Option<&'a str>,
    /// Raw `Accept-Language` header value.
    pub accept_language: Option<&'a str>,
}

impl<'a> ResolveRequest<'a> {
    /// Build from a path that may carry a query string.
    pub fn from_path_and_query(path_and_query: &'a str) -> Self {
        let (path, query) = match path_and_query.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path_and_query, None),
        };
        Self {
            path,
            query,
            ..Self::default()
        }
    }

    pub fn with_cookie(mut self, cookie_locale: Option<&'a str>) -> Self {
        self.cookie_locale = cookie_locale;
        self
    }

    pub fn with_accept_language(mut self, accept_language: Option<&'a str>) -> Self {
        self.accept_language = accept_language;
        self
    }
}

/// Outcome for a path subject to localization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub locale: Locale,
    pub path_without_locale: String,
    /// Where to redirect, when the path carried no locale.
    pub redirect_target: Option<String>,
}

impl ResolvedRoute {
    pub fn needs_redirect(&self) -> bool {
        self.redirect_target.is_some()
    }
}

impl Serialize for ResolvedRoute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResolvedRoute", 4)?;
        state.serialize_field("locale", &self.locale)?;
        state.serialize_field("path_without_locale", &self.path_without_locale)?;
        state.serialize_field("needs_redirect", &self.needs_redirect())?;
        state.serialize_field("redirect_target", &self.redirect_target)?;
        state.end()
    }
}

/// Result of resolving one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Excluded path; handle without any locale logic.
    PassThrough,
    Localized(ResolvedRoute),
}

/// Decides locale and redirect for each request.
#[derive(Debug)]
pub struct LocaleResolver {
    localizer: Arc<UrlLocalizer>,
    exclusions: AnyMatcher,
}

impl LocaleResolver {
    pub fn new(localizer: Arc<UrlLocalizer>, exclusions: AnyMatcher) -> Self {
        Self {
            localizer,
            exclusions,
        }
    }

    pub fn localizer(&self) -> &UrlLocalizer {
        &self.localizer
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclusions.matches(path)
    }

    pub fn resolve(&self, request: &ResolveRequest<'_>) -> Resolution {
        let path = request.path;
        if self.is_excluded(path) {
            return Resolution::PassThrough;
        }

        if let Some((locale, _)) = self.localizer.split_locale(path) {
            return Resolution::Localized(ResolvedRoute {
                locale: locale.clone(),
                path_without_locale: self.localizer.delocalize(path),
                redirect_target: None,
            });
        }

        let locale = detect_locale(
            self.localizer.registry(),
            request.cookie_locale,
            request.accept_language,
        );

        let mut target = localize(path, locale);
        if let Some(query) = request.query.filter(|q| !q.is_empty()) {
            target.push('?');
            target.push_str(query);
        }

        Resolution::Localized(ResolvedRoute {
            locale: locale.clone(),
            path_without_locale: path.to_string(),
            redirect_target: Some(target),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ExclusionConfig, LocalesConfig};
    use crate::locale::LocaleRegistry;

    fn resolver() -> LocaleResolver {
        let registry = LocaleRegistry::from_config(&LocalesConfig::default()).unwrap();
        let localizer = UrlLocalizer::new(Arc::new(registry), "https://roundnet-directory.eu");
        LocaleResolver::new(
            Arc::new(localizer),
            AnyMatcher::from_config(&ExclusionConfig::default()),
        )
    }

    fn localized(resolution: Resolution) -> ResolvedRoute {
        match resolution {
            Resolution::Localized(route) => route,
            Resolution::PassThrough => panic!("expected a localized route"),
        }
    }

    #[test]
    fn test_prefixed_path_resolves_immediately() {
        let resolver = resolver();
        for locale in ["en", "de", "fr", "es", "it"] {
            let path = format!("/{locale}/clubs/germany");
            let route = localized(resolver.resolve(&ResolveRequest::from_path_and_query(&path)));
            assert!(!route.needs_redirect());
            assert_eq!(route.locale, locale);
            assert_eq!(route.path_without_locale, "/clubs/germany");
        }
    }

    #[test]
    fn test_bare_locale_root() {
        let route = localized(resolver().resolve(&ResolveRequest::from_path_and_query("/de")));
        assert!(!route.needs_redirect());
        assert_eq!(route.path_without_locale, "/");
    }

    #[test]
    fn test_path_locale_beats_signals() {
        let request = ResolveRequest::from_path_and_query("/it/clubs")
            .with_cookie(Some("de"))
            .with_accept_language(Some("fr"));
        let route = localized(resolver().resolve(&request));
        assert_eq!(route.locale, "it");
        assert!(!route.needs_redirect());
    }

    #[test]
    fn test_serialized_route_carries_needs_redirect() {
        let json = serde_json::to_value(resolver().resolve(&ResolveRequest::from_path_and_query("/clubs"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "outcome": "localized",
                "locale": "en",
                "path_without_locale": "/clubs",
                "needs_redirect": true,
                "redirect_target": "/en/clubs",
            })
        );

        let json = serde_json::to_value(resolver().resolve(&ResolveRequest::from_path_and_query("/de/clubs"))).unwrap();
        assert_eq!(json["needs_redirect"], false);
        assert_eq!(json["redirect_target"], serde_json::Value::Null);

        let json = serde_json::to_value(resolver().resolve(&ResolveRequest::from_path_and_query("/api/clubs"))).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "pass_through" }));
    }

    #[test]
    fn test_root_redirects_to_default() {
        let route = localized(resolver().resolve(&ResolveRequest::from_path_and_query("/")));
        assert_eq!(route.locale, "en");
        assert_eq!(route.redirect_target.as_deref(), Some("/en"));
        assert_eq!(route.path_without_locale, "/");
    }

    #[test]
    fn test_unprefixed_path_redirects_with_query() {
        let request = ResolveRequest::from_path_and_query("/clubs/germany?page=2&sort=name")
            .with_accept_language(Some("fr;q=0.9,de;q=0.95"));
        let route = localized(resolver().resolve(&request));
        assert_eq!(route.locale, "de");
        assert_eq!(route.redirect_target.as_deref(), Some("/de/clubs/germany?page=2&sort=name"));
        assert_eq!(route.path_without_locale, "/clubs/germany");
    }

    #[test]
    fn test_cookie_takes_precedence() {
        let request = ResolveRequest::from_path_and_query("/clubs")
            .with_cookie(Some("de"))
            .with_accept_language(Some("fr"));
        let route = localized(resolver().resolve(&request));
        assert_eq!(route.redirect_target.as_deref(), Some("/de/clubs"));
    }

    #[test]
    fn test_unknown_segment_is_not_a_locale() {
        let request = ResolveRequest::from_path_and_query("/xx/clubs").with_accept_language(Some("xx,yy"));
        let route = localized(resolver().resolve(&request));
        assert_eq!(route.locale, "en");
        assert_eq!(route.redirect_target.as_deref(), Some("/en/xx/clubs"));
    }

    #[test]
    fn test_redirect_target_starts_with_locale() {
        let resolver = resolver();
        for path in ["/clubs", "/club/roundnet-berlin", "/english", "/DE/clubs"] {
            let route = localized(resolver.resolve(&ResolveRequest::from_path_and_query(path)));
            let target = route.redirect_target.expect("unprefixed path must redirect");
            assert!(target.starts_with(&format!("/{}", route.locale)), "{target}");
        }
    }

    #[test]
    fn test_excluded_paths_pass_through() {
        let resolver = resolver();
        for path in ["/api/clubs", "/robots.txt", "/favicon.ico", "/sitemap.xml", "/_next/static/app.js"] {
            let request = ResolveRequest::from_path_and_query(path).with_cookie(Some("de"));
            assert_eq!(resolver.resolve(&request), Resolution::PassThrough, "{path}");
        }
    }

    #[test]
    fn test_empty_query_is_dropped() {
        let route = localized(resolver().resolve(&ResolveRequest::from_path_and_query("/clubs?")));
        assert_eq!(route.redirect_target.as_deref(), Some("/en/clubs"));
    }
}
