//! Locale-prefixed path and URL construction.
//!
//! `localize` and [`UrlLocalizer::delocalize`] are inverses modulo slash
//! normalization: for any unprefixed path `p` and supported locale `l`,
//! `delocalize(localize(p, l)) == normalize(p)`.

use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::registry::{Locale, LocaleRegistry};

/// hreflang value for the fallback alternate.
pub const X_DEFAULT: &str = "x-default";

/// Collapse a path to one leading slash and no empty segments.
///
/// ```text
/// ""               -> "/"
/// "clubs//germany/" -> "/clubs/germany"
/// ```
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Prefix a path with `/{locale}`. The root localizes to `/{locale}`.
pub fn localize(path: &str, locale: &Locale) -> String {
    let normalized = normalize(path);
    if normalized == "/" {
        format!("/{}", locale.code())
    } else {
        format!("/{}{}", locale.code(), normalized)
    }
}

/// Ordered hreflang to absolute URL pairs, `x-default` last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alternates {
    entries: Vec<(String, String)>,
}

impl Alternates {
    pub fn get(&self, hreflang: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(tag, _)| tag == hreflang)
            .map(|(_, url)| url.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, u)| (t.as_str(), u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Alternates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, url) in &self.entries {
            map.serialize_entry(tag, url)?;
        }
        map.end()
    }
}

/// An entry of a language switcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageLink {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub href: String,
    pub active: bool,
}

/// Builds locale-aware paths and absolute URLs for one site.
#[derive(Debug, Clone)]
pub struct UrlLocalizer {
    registry: Arc<LocaleRegistry>,
    site_url: String,
}

impl UrlLocalizer {
    /// `site_url` is the absolute base URL; a trailing slash is ignored.
    pub fn new(registry: Arc<LocaleRegistry>, site_url: &str) -> Self {
        Self {
            registry,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Split a path into its locale prefix and the remainder.
    ///
    /// Only an exact first segment counts: `/en` and `/en/...` carry a
    /// locale, `/english` and `/xx/...` do not.
    pub fn split_locale<'p>(&self, path: &'p str) -> Option<(&Locale, &'p str)> {
        let rest = path.strip_prefix('/')?;
        let (first, tail) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        self.registry.get(first).map(|locale| (locale, tail))
    }

    /// Strip a leading locale segment; other paths are returned unchanged.
    pub fn delocalize(&self, path: &str) -> String {
        match self.split_locale(path) {
            Some((_, tail)) => normalize(tail),
            None => path.to_string(),
        }
    }

    /// Site URL plus normalized path.
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, normalize(path))
    }

    /// Absolute URL of `path` in `locale`. Any locale prefix on `path` is
    /// replaced.
    pub fn canonical_url(&self, path: &str, locale: &Locale) -> String {
        self.absolute_url(&localize(&self.delocalize(path), locale))
    }

    /// One absolute URL per supported locale keyed by hreflang, in
    /// declaration order, then `x-default` for the default locale.
    pub fn alternates_for(&self, path: &str) -> Alternates {
        let clean = self.delocalize(path);
        let mut entries: Vec<(String, String)> = self
            .registry
            .iter()
            .map(|(locale, settings)| {
                (
                    settings.hreflang().to_string(),
                    self.absolute_url(&localize(&clean, locale)),
                )
            })
            .collect();

        entries.push((
            X_DEFAULT.to_string(),
            self.absolute_url(&localize(&clean, self.registry.default_locale())),
        ));

        Alternates { entries }
    }

    /// Localize an in-site href. External, fragment and `mailto:` hrefs are
    /// left alone.
    pub fn localize_href(&self, href: &str, locale: &Locale) -> String {
        if is_external_href(href) {
            href.to_string()
        } else {
            localize(href, locale)
        }
    }

    /// Links to `path` in every locale, marking `current` as active.
    pub fn language_links(&self, path: &str, current: &Locale) -> Vec<LanguageLink> {
        let clean = self.delocalize(path);
        self.registry
            .iter()
            .map(|(locale, settings)| LanguageLink {
                code: locale.code().to_string(),
                name: settings.name.clone(),
                flag: settings.flag.clone(),
                href: localize(&clean, locale),
                active: locale == current,
            })
            .collect()
    }
}

fn is_external_href(href: &str) -> bool {
    href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("//")
        || href.starts_with('#')
        || href.starts_with("mailto:")
}
